//! Joins hypothesis and gold rows, scores them and shapes the report table.

mod align;
mod summary;
mod table;

use rand::Rng;

use crate::model::{GoldRow, HypothesisRow};
use crate::scoring::{RowScores, score_row};

pub use align::{AlignedRow, align};
pub use summary::{ColumnSummary, ReportFormat, print_summary, summarize};
pub use table::{Cell, ReportTable};

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow {
    pub index: usize,
    pub hypothesis: HypothesisRow,
    pub gold: GoldRow,
    pub scores: RowScores,
}

pub fn assemble<R: Rng + ?Sized>(aligned: &[AlignedRow<'_>], rng: &mut R) -> Vec<ScoredRow> {
    aligned
        .iter()
        .enumerate()
        .map(|(index, row)| ScoredRow {
            index,
            hypothesis: row.hypothesis.clone(),
            gold: row.gold.clone(),
            scores: score_row(row.hypothesis, row.gold, rng),
        })
        .collect()
}
