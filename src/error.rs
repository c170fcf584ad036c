use std::path::PathBuf;

use thiserror::Error;

/// Failures recognised by the evaluation pipeline.
///
/// `Format` is recovered per line by the gold table builder. Every other
/// variant is recovered per file by the evaluate command, which logs a warning
/// and moves on to the next gold file.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("malformed analysis ({field_count} fields): {content}")]
    Format { field_count: usize, content: String },

    #[error("missing field `{column}`{}", row_suffix(.row))]
    MissingField {
        column: String,
        row: Option<usize>,
    },

    #[error("hypothesis has {hypothesis_rows} rows but gold has {gold_rows}")]
    RowCountMismatch {
        hypothesis_rows: usize,
        gold_rows: usize,
    },

    #[error("row {index} is misaligned: hypothesis `{hypothesis}` vs gold `{gold}`")]
    Alignment {
        index: usize,
        hypothesis: String,
        gold: String,
    },

    #[error("analyzer failed: {0}")]
    Analyzer(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EvalError {
    pub fn format(field_count: usize, content: impl Into<String>) -> Self {
        Self::Format {
            field_count,
            content: content.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(row) => format!(" in row {row}"),
        None => String::new(),
    }
}
