//! Plain text to the analyzer's JSON input envelope.
//!
//! Every line starting with an ASCII letter or digit is a paragraph. The
//! tokenizer is deliberately simple and drops symbols it does not know.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Envelope {
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub id: String,
    pub sentences: Vec<Sentence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
}

pub struct Segmenter {
    token: Regex,
    paragraph_start: Regex,
}

impl Segmenter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            token: Regex::new(r"[\d%]+|[\w'-]+|[.,!?;(){}%]")
                .context("failed to compile token regex")?,
            paragraph_start: Regex::new(r"^[A-Za-z0-9]")
                .context("failed to compile paragraph start regex")?,
        })
    }

    pub fn is_paragraph(&self, line: &str) -> bool {
        self.paragraph_start.is_match(line)
    }

    pub fn tokens<'a>(&self, line: &'a str) -> Vec<&'a str> {
        self.token.find_iter(line).map(|m| m.as_str()).collect()
    }

    pub fn sentences(&self, line: &str) -> Vec<Sentence> {
        let mut sentences = Vec::new();
        let mut words = Vec::new();
        for token in self.tokens(line.trim()) {
            words.push(Word {
                text: token.to_string(),
            });
            if is_sentence_end(token) {
                sentences.push(Sentence {
                    words: std::mem::take(&mut words),
                });
            }
        }
        if !words.is_empty() {
            sentences.push(Sentence { words });
        }
        sentences
    }

    pub fn paragraphs(&self, id: &str, raw: &str) -> Vec<Paragraph> {
        raw.lines()
            .filter(|line| self.is_paragraph(line))
            .map(|line| Paragraph {
                id: id.to_string(),
                sentences: self.sentences(line),
            })
            .collect()
    }
}

fn is_sentence_end(token: &str) -> bool {
    matches!(token, "." | "!" | "?")
}
