use crate::error::EvalError;
use crate::model::{GoldRow, HypothesisRow};

#[derive(Debug, Clone, Copy)]
pub struct AlignedRow<'a> {
    pub hypothesis: &'a HypothesisRow,
    pub gold: &'a GoldRow,
}

/// Pairs rows by position after checking that both sides hold the same
/// word sequence.
pub fn align<'a>(
    hypothesis: &'a [HypothesisRow],
    gold: &'a [GoldRow],
) -> Result<Vec<AlignedRow<'a>>, EvalError> {
    if hypothesis.len() != gold.len() {
        return Err(EvalError::RowCountMismatch {
            hypothesis_rows: hypothesis.len(),
            gold_rows: gold.len(),
        });
    }

    hypothesis
        .iter()
        .zip(gold)
        .enumerate()
        .map(|(index, (hypothesis, gold))| {
            if hypothesis.word_text != gold.word_text {
                return Err(EvalError::Alignment {
                    index,
                    hypothesis: hypothesis.word_text.clone(),
                    gold: gold.word_text.clone(),
                });
            }
            Ok(AlignedRow { hypothesis, gold })
        })
        .collect()
}
