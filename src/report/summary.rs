use std::io::{self, Write};

use super::table::{INDEX_COLUMN, ReportTable};

/// Explicit layout for printed summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportFormat {
    pub column_width: usize,
    pub precision: usize,
}

impl Default for ReportFormat {
    fn default() -> Self {
        Self {
            column_width: 12,
            precision: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` below two values.
    pub std: Option<f64>,
    pub min: f64,
    /// 25th, 50th and 75th percentiles, linearly interpolated.
    pub quartiles: [f64; 3],
    pub max: f64,
}

/// Describes every numeric column of the table except the row index.
pub fn summarize(table: &ReportTable) -> Vec<ColumnSummary> {
    let Some(first) = table.rows.first() else {
        return Vec::new();
    };

    table
        .columns
        .iter()
        .enumerate()
        .filter(|(index, column)| {
            column.as_str() != INDEX_COLUMN
                && first.get(*index).and_then(|cell| cell.as_f64()).is_some()
        })
        .filter_map(|(index, column)| describe(column, &table.numeric_values(index)))
        .collect()
}

fn describe(column: &str, values: &[f64]) -> Option<ColumnSummary> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let variance = values
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / (count - 1) as f64;
        Some(variance.sqrt())
    } else {
        None
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let quartiles = [0.25, 0.5, 0.75].map(|fraction| percentile(&sorted, fraction));

    Some(ColumnSummary {
        column: column.to_string(),
        count,
        mean,
        std,
        min: sorted[0],
        quartiles,
        max: sorted[count - 1],
    })
}

/// Percentile of non-empty sorted values, interpolating between neighbours.
fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    let position = fraction * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

pub fn print_summary<W: Write>(
    out: &mut W,
    title: &str,
    summaries: &[ColumnSummary],
    format: &ReportFormat,
) -> io::Result<()> {
    let name_width = summaries
        .iter()
        .map(|summary| summary.column.len())
        .max()
        .unwrap_or(0)
        .max(INDEX_COLUMN.len());
    let width = format.column_width;
    let precision = format.precision;

    writeln!(out, "{title}")?;
    writeln!(
        out,
        "{:<name_width$} {:>width$} {:>width$} {:>width$} {:>width$} {:>width$} {:>width$} {:>width$} {:>width$}",
        "", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    )?;
    for summary in summaries {
        let std = match summary.std {
            Some(value) => format!("{value:.precision$}"),
            None => "NaN".to_string(),
        };
        let [lower, median, upper] = summary.quartiles;
        writeln!(
            out,
            "{:<name_width$} {:>width$} {:>width$.precision$} {:>width$} {:>width$.precision$} {:>width$.precision$} {:>width$.precision$} {:>width$.precision$} {:>width$.precision$}",
            summary.column,
            summary.count,
            summary.mean,
            std,
            summary.min,
            lower,
            median,
            upper,
            summary.max
        )?;
    }
    Ok(())
}
