use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute of an analysis that the analyzer proposes candidates for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Attribute {
    Forms,
    Postags,
    Roots,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::Forms, Attribute::Postags, Attribute::Roots];

    pub fn column(self) -> &'static str {
        match self {
            Self::Forms => "forms",
            Self::Postags => "postags",
            Self::Roots => "roots",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisCell {
    pub root: String,
    pub postag: String,
    pub form: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldRow {
    pub word_text: String,
    pub root: String,
    pub postag: String,
    pub form: String,
    pub ambiguity: usize,
}

impl GoldRow {
    pub fn value(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::Forms => &self.form,
            Attribute::Postags => &self.postag,
            Attribute::Roots => &self.root,
        }
    }
}

/// One analyzer row; every attribute holds `|`-joined candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HypothesisRow {
    pub word_text: String,
    pub roots: String,
    pub postags: String,
    pub forms: String,
}

impl HypothesisRow {
    pub fn candidates(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::Forms => &self.forms,
            Attribute::Postags => &self.postags,
            Attribute::Roots => &self.roots,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub manifest_version: u32,
    pub generated_at: String,
    pub seed: Option<u64>,
    pub file_count: usize,
    pub scored_count: usize,
    pub skipped_count: usize,
    pub files: Vec<FileSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSummary {
    pub path: String,
    pub sha256: Option<String>,
    pub status: FileStatus,
    pub reason: Option<String>,
    pub gold_rows: usize,
    pub skipped_lines: usize,
    pub unmarked_fallbacks: usize,
    pub means: BTreeMap<String, f64>,
    pub outputs: Vec<String>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Scored,
    Skipped,
}
