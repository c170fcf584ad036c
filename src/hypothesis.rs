//! Hypothesis tables produced by the morphological analyzer.
//!
//! The analyzer is an external program. It reads the flattened gold text on
//! stdin and prints a tab-separated table with a header line naming at least
//! `word_texts`, `roots`, `postags` and `forms`, one row per token. A table
//! produced earlier can also be read from a file next to the gold file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use crate::error::EvalError;
use crate::model::HypothesisRow;

pub const WORD_TEXTS_COLUMN: &str = "word_texts";
pub const HYPOTHESIS_COLUMNS: [&str; 4] = [WORD_TEXTS_COLUMN, "roots", "postags", "forms"];

/// Supplies the hypothesis table for one gold file.
pub trait HypothesisSource {
    fn hypothesis_for(&self, gold_path: &Path, text: &str) -> Result<Vec<HypothesisRow>, EvalError>;
}

/// Runs an external analyzer once per gold file.
#[derive(Debug, Clone)]
pub struct CommandAnalyzer {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandAnalyzer {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl HypothesisSource for CommandAnalyzer {
    fn hypothesis_for(&self, gold_path: &Path, text: &str) -> Result<Vec<HypothesisRow>, EvalError> {
        debug!(
            program = %self.program.display(),
            gold = %gold_path.display(),
            bytes = text.len(),
            "running analyzer"
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                EvalError::Analyzer(format!(
                    "failed to execute {}: {err}",
                    self.program.display()
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| EvalError::Analyzer("analyzer stdin unavailable".to_string()))?;
        let input = text.to_string();
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output().map_err(|err| {
            EvalError::Analyzer(format!(
                "failed to wait for {}: {err}",
                self.program.display()
            ))
        })?;

        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                return Err(EvalError::Analyzer(format!(
                    "failed to write analyzer input: {err}"
                )));
            }
            Err(_) => {
                return Err(EvalError::Analyzer(
                    "analyzer input writer panicked".to_string(),
                ));
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EvalError::Analyzer(format!(
                "{} returned non-zero exit status: {}",
                self.program.display(),
                stderr.trim()
            )));
        }

        let raw = String::from_utf8(output.stdout).map_err(|err| {
            EvalError::Analyzer(format!("analyzer output is not UTF-8: {err}"))
        })?;
        parse_hypothesis_table(&raw)
    }
}

/// Reads `<gold path><suffix>` instead of running an analyzer.
#[derive(Debug, Clone)]
pub struct TableFileSource {
    suffix: String,
}

impl TableFileSource {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn table_path(&self, gold_path: &Path) -> PathBuf {
        let mut name = gold_path.as_os_str().to_owned();
        name.push(&self.suffix);
        PathBuf::from(name)
    }
}

impl HypothesisSource for TableFileSource {
    fn hypothesis_for(&self, gold_path: &Path, _text: &str) -> Result<Vec<HypothesisRow>, EvalError> {
        let path = self.table_path(gold_path);
        let raw = fs::read_to_string(&path).map_err(|source| EvalError::io(&path, source))?;
        parse_hypothesis_table(&raw)
    }
}

/// Parses a tab-separated hypothesis table.
///
/// Fails with `MissingField` when the header lacks a required column or a
/// row is too short to hold one.
pub fn parse_hypothesis_table(raw: &str) -> Result<Vec<HypothesisRow>, EvalError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| EvalError::Analyzer(format!("unreadable hypothesis header: {err}")))?
        .clone();

    let mut positions = [0_usize; 4];
    for (slot, column) in positions.iter_mut().zip(HYPOTHESIS_COLUMNS) {
        *slot = headers
            .iter()
            .position(|header| header.trim() == column)
            .ok_or_else(|| EvalError::MissingField {
                column: column.to_string(),
                row: None,
            })?;
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record
            .map_err(|err| EvalError::Analyzer(format!("unreadable hypothesis row {index}: {err}")))?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let mut values = [""; 4];
        for ((value, position), column) in values.iter_mut().zip(positions).zip(HYPOTHESIS_COLUMNS) {
            *value = record.get(position).ok_or_else(|| EvalError::MissingField {
                column: column.to_string(),
                row: Some(index),
            })?;
        }

        let [word_text, roots, postags, forms] = values;
        rows.push(HypothesisRow {
            word_text: word_text.to_string(),
            roots: roots.to_string(),
            postags: postags.to_string(),
            forms: forms.to_string(),
        });
    }

    Ok(rows)
}
