//! Scoring of hypothesis candidate sets against gold values.

use rand::Rng;

use crate::model::{Attribute, GoldRow, HypothesisRow};

const CANDIDATE_DELIMITER: char = '|';

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MatchPolicy {
    /// The gold value is one of the candidates.
    Exact,
    /// The hypothesis is a single candidate equal to the gold value.
    Unambiguous,
    /// Membership credit divided by the number of candidates.
    Fractional,
    /// One uniformly drawn candidate equals the gold value.
    RandomOne,
}

/// Distinct candidates of one hypothesis cell in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet<'a> {
    values: Vec<&'a str>,
}

impl<'a> CandidateSet<'a> {
    pub fn parse(cell: &'a str) -> Self {
        let mut values = Vec::<&str>::new();
        for value in cell.split(CANDIDATE_DELIMITER) {
            if !values.contains(&value) {
                values.push(value);
            }
        }
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|candidate| *candidate == value)
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.values.get(index).copied()
    }
}

pub fn score_aux<R: Rng + ?Sized>(
    candidates: &CandidateSet<'_>,
    gold: &str,
    policy: MatchPolicy,
    rng: &mut R,
) -> f64 {
    match policy {
        MatchPolicy::Exact => indicator(candidates.contains(gold)),
        MatchPolicy::Unambiguous => {
            if candidates.len() > 1 {
                0.0
            } else {
                indicator(candidates.contains(gold))
            }
        }
        MatchPolicy::Fractional => {
            if candidates.contains(gold) {
                1.0 / candidates.len() as f64
            } else {
                0.0
            }
        }
        MatchPolicy::RandomOne => {
            if candidates.is_empty() {
                return 0.0;
            }
            let index = rng.gen_range(0..candidates.len());
            indicator(candidates.get(index) == Some(gold))
        }
    }
}

/// Conjunctive score: the minimum of the per-attribute scores.
pub fn score<R: Rng + ?Sized>(
    hypothesis: &HypothesisRow,
    gold: &GoldRow,
    attributes: &[Attribute],
    policy: MatchPolicy,
    rng: &mut R,
) -> f64 {
    attributes
        .iter()
        .map(|attribute| {
            let candidates = CandidateSet::parse(hypothesis.candidates(*attribute));
            score_aux(&candidates, gold.value(*attribute), policy, rng)
        })
        .fold(1.0, f64::min)
}

fn indicator(matched: bool) -> f64 {
    if matched { 1.0 } else { 0.0 }
}

/// A score column of the report: a policy applied to a set of attributes.
#[derive(Debug, Clone, Copy)]
pub struct MatchColumn {
    pub name: &'static str,
    pub attributes: &'static [Attribute],
    pub policy: MatchPolicy,
}

const POSTAGS_AND_FORMS: &[Attribute] = &[Attribute::Postags, Attribute::Forms];

pub const MATCH_COLUMNS: &[MatchColumn] = &[
    MatchColumn {
        name: "forms_match",
        attributes: &[Attribute::Forms],
        policy: MatchPolicy::Exact,
    },
    MatchColumn {
        name: "postags_match",
        attributes: &[Attribute::Postags],
        policy: MatchPolicy::Exact,
    },
    MatchColumn {
        name: "roots_match",
        attributes: &[Attribute::Roots],
        policy: MatchPolicy::Exact,
    },
    MatchColumn {
        name: "postags_and_forms_match",
        attributes: POSTAGS_AND_FORMS,
        policy: MatchPolicy::Exact,
    },
    MatchColumn {
        name: "postags_and_forms_match_one",
        attributes: POSTAGS_AND_FORMS,
        policy: MatchPolicy::RandomOne,
    },
    MatchColumn {
        name: "all_match",
        attributes: &Attribute::ALL,
        policy: MatchPolicy::Exact,
    },
    MatchColumn {
        name: "all_match_unamb",
        attributes: &Attribute::ALL,
        policy: MatchPolicy::Unambiguous,
    },
    MatchColumn {
        name: "all_match_one",
        attributes: &Attribute::ALL,
        policy: MatchPolicy::RandomOne,
    },
    MatchColumn {
        name: "all_match_frac",
        attributes: &Attribute::ALL,
        policy: MatchPolicy::Fractional,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct RowScores {
    /// Distinct candidate counts, in `Attribute::ALL` order.
    pub ambiguity: [usize; 3],
    /// One value per entry of `MATCH_COLUMNS`.
    pub matches: Vec<f64>,
}

impl RowScores {
    pub fn ambiguity_columns() -> impl Iterator<Item = String> {
        Attribute::ALL
            .into_iter()
            .map(|attribute| format!("{}_amb", attribute.column()))
    }

    pub fn match_value(&self, name: &str) -> Option<f64> {
        MATCH_COLUMNS
            .iter()
            .position(|column| column.name == name)
            .and_then(|index| self.matches.get(index).copied())
    }
}

pub fn score_row<R: Rng + ?Sized>(
    hypothesis: &HypothesisRow,
    gold: &GoldRow,
    rng: &mut R,
) -> RowScores {
    let ambiguity =
        Attribute::ALL.map(|attribute| CandidateSet::parse(hypothesis.candidates(attribute)).len());
    let matches = MATCH_COLUMNS
        .iter()
        .map(|column| score(hypothesis, gold, column.attributes, column.policy, rng))
        .collect();

    RowScores { ambiguity, matches }
}
