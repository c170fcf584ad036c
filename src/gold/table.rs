use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::line::{GoldLineParser, Resolution};
use crate::error::EvalError;
use crate::model::GoldRow;

/// Rows recovered from one gold file, in file order.
#[derive(Debug, Clone, Default)]
pub struct GoldTable {
    pub rows: Vec<GoldRow>,
    /// Word texts joined by single spaces; the analyzer input for this file.
    pub text: String,
    pub skipped_lines: usize,
    pub unmarked_fallbacks: usize,
}

impl GoldTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn read_gold_file(parser: &GoldLineParser, path: &Path) -> Result<GoldTable, EvalError> {
    let raw = fs::read_to_string(path).map_err(|source| EvalError::io(path, source))?;
    let name = path.display().to_string();
    Ok(build_gold_table(parser, &name, raw.lines()))
}

pub fn build_gold_table<'a, I>(parser: &GoldLineParser, name: &str, lines: I) -> GoldTable
where
    I: IntoIterator<Item = &'a str>,
{
    let mut table = GoldTable::default();

    for (index, line) in lines.into_iter().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            debug!(file = %name, line = line_number, "skipping blank line");
            continue;
        }

        let parsed = match parser.parse(line) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(
                    file = %name,
                    line = line_number,
                    content = %line.trim(),
                    error = %err,
                    "syntax error in gold line; skipped"
                );
                table.skipped_lines += 1;
                continue;
            }
        };

        if parsed.resolution == Resolution::Unmarked {
            debug!(
                file = %name,
                line = line_number,
                word = %parsed.row.word_text,
                "no candidate marked correct; using the first"
            );
            table.unmarked_fallbacks += 1;
        }

        table.rows.push(parsed.row);
    }

    table.text = table
        .rows
        .iter()
        .map(|row| row.word_text.as_str())
        .collect::<Vec<&str>>()
        .join(" ");

    if table.unmarked_fallbacks > 0 {
        warn!(
            file = %name,
            count = table.unmarked_fallbacks,
            "ambiguous gold lines without a marked candidate fell back to the first candidate"
        );
    }

    table
}
