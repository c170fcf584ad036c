use anyhow::{Context, Result};
use regex::Regex;

use super::parse_analysis_cell;
use crate::error::EvalError;
use crate::model::GoldRow;

const CORRECTION_MARKER: &str = "|| %";
const CORRECT_CANDIDATE_MARKER: char = '+';
const NOISE_MARKER: &str = "*";

/// How the correct analysis of a gold line was chosen.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    /// Taken from the text after a `|| %` correction marker.
    Correction,
    /// The first candidate ending in `+`.
    Marked,
    /// The line lists a single candidate.
    Sole,
    /// Several candidates and none marked; the first one was used.
    Unmarked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub row: GoldRow,
    pub resolution: Resolution,
}

pub struct GoldLineParser {
    field_separator: Regex,
}

impl GoldLineParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // A whitespace run holding a tab, or two or more spaces.
            field_separator: Regex::new(r"[ ]*\t[ \t]*|  +")
                .context("failed to compile gold field separator regex")?,
        })
    }

    pub fn parse(&self, line: &str) -> Result<ParsedLine, EvalError> {
        let line = line.trim();
        let mut fields: Vec<&str> = self.field_separator.split(line).collect();
        if fields.len() > 2 && fields.last() == Some(&NOISE_MARKER) {
            fields.pop();
        }
        if fields.len() < 2 {
            return Err(EvalError::format(fields.len(), line));
        }

        let ambiguity = fields.len() - 1;
        let last_index = fields.len() - 1;
        fields[last_index] = strip_noise_marker(fields[last_index]);

        let candidates = &fields[1..];
        let (chosen, resolution) = resolve_candidate(candidates);
        let cell = parse_analysis_cell(chosen)?;

        Ok(ParsedLine {
            row: GoldRow {
                word_text: fields[0].to_string(),
                root: cell.root,
                postag: cell.postag,
                form: cell.form,
                ambiguity,
            },
            resolution,
        })
    }
}

fn strip_noise_marker(field: &str) -> &str {
    match field.trim_end().strip_suffix(NOISE_MARKER) {
        Some(stripped) => stripped.trim_end(),
        None => field,
    }
}

fn resolve_candidate<'a>(candidates: &[&'a str]) -> (&'a str, Resolution) {
    let last = candidates[candidates.len() - 1];
    if let Some((_, correction)) = last.split_once(CORRECTION_MARKER) {
        return (correction, Resolution::Correction);
    }

    if let Some(marked) = candidates
        .iter()
        .copied()
        .find(|candidate| candidate.ends_with(CORRECT_CANDIDATE_MARKER))
    {
        return (marked, Resolution::Marked);
    }

    let resolution = if candidates.len() == 1 {
        Resolution::Sole
    } else {
        Resolution::Unmarked
    };
    (candidates[0], resolution)
}
