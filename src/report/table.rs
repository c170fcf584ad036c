use std::fmt;

use super::ScoredRow;
use crate::hypothesis::HYPOTHESIS_COLUMNS;
use crate::scoring::{MATCH_COLUMNS, RowScores};

pub const INDEX_COLUMN: &str = "index";
pub const GOLD_COLUMNS: [&str; 5] = [
    "gold_word_texts",
    "gold_roots",
    "gold_postags",
    "gold_forms",
    "gold_ambiguity",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Number(f64),
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Text(_) => None,
            Self::Integer(value) => Some(*value as f64),
            Self::Number(value) => Some(*value),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

/// Column-oriented view of scored rows shared by the printers and writers.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    pub fn from_scored(rows: &[ScoredRow]) -> Self {
        let columns = std::iter::once(INDEX_COLUMN.to_string())
            .chain(HYPOTHESIS_COLUMNS.iter().map(|column| column.to_string()))
            .chain(GOLD_COLUMNS.iter().map(|column| column.to_string()))
            .chain(RowScores::ambiguity_columns())
            .chain(MATCH_COLUMNS.iter().map(|column| column.name.to_string()))
            .collect();

        let rows = rows.iter().map(row_cells).collect();
        Self { columns, rows }
    }

    /// Numeric values of one column, skipping text cells.
    pub fn numeric_values(&self, index: usize) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.get(index).and_then(Cell::as_f64))
            .collect()
    }
}

fn row_cells(row: &ScoredRow) -> Vec<Cell> {
    let hypothesis = &row.hypothesis;
    let gold = &row.gold;

    let mut cells = vec![
        Cell::Integer(row.index as i64),
        Cell::Text(hypothesis.word_text.clone()),
        Cell::Text(hypothesis.roots.clone()),
        Cell::Text(hypothesis.postags.clone()),
        Cell::Text(hypothesis.forms.clone()),
        Cell::Text(gold.word_text.clone()),
        Cell::Text(gold.root.clone()),
        Cell::Text(gold.postag.clone()),
        Cell::Text(gold.form.clone()),
        Cell::Integer(gold.ambiguity as i64),
    ];
    cells.extend(
        row.scores
            .ambiguity
            .iter()
            .map(|count| Cell::Integer(*count as i64)),
    );
    cells.extend(row.scores.matches.iter().map(|value| Cell::Number(*value)));
    cells
}
