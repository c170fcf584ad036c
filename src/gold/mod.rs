//! Gold-standard annotation parsing.
//!
//! A gold file holds one word per line followed by its candidate analyses:
//!
//! ```text
//! on    ole+0||V b||    ole+0||V vad||+
//! Noorte    Noor+te||H pl g||    Noorte+0||H sg g|| %noor+te||S pl g||
//! ```
//!
//! A trailing `+` marks the correct candidate, `|| %` appends a correction
//! when none of the listed candidates is right, and a trailing `*` is a
//! highlight left by annotators that carries no meaning.

mod cell;
mod line;
mod table;
#[cfg(test)]
mod tests;

pub use cell::parse_analysis_cell;
pub use line::{GoldLineParser, Resolution};
pub use table::{GoldTable, build_gold_table, read_gold_file};
