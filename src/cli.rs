use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::report::ReportFormat;

#[derive(Parser, Debug)]
#[command(
    name = "morpheval",
    version,
    about = "Evaluate a morphological analyzer against a hand-annotated gold standard"
)]
pub struct Cli {
    /// 0 prints warnings only; 1 adds per-file statistics and notices; 2 adds debug logs.
    #[arg(long, global = true, default_value_t = 0)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score analyzer output against gold-standard files.
    Evaluate(EvaluateArgs),
    /// Convert plain-text files into the analyzer's JSON input envelope.
    Segment(SegmentArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Gold-standard files.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [OutputType::Csv]
    )]
    pub output_types: Vec<OutputType>,

    /// Analyzer program; reads text on stdin and prints a hypothesis table.
    #[arg(
        long,
        conflicts_with = "hypothesis_suffix",
        required_unless_present = "hypothesis_suffix"
    )]
    pub analyzer: Option<PathBuf>,

    #[arg(long = "analyzer-arg", allow_hyphen_values = true)]
    pub analyzer_args: Vec<String>,

    /// Read hypothesis tables from `<FILE><SUFFIX>` instead of running an analyzer.
    #[arg(long)]
    pub hypothesis_suffix: Option<String>,

    /// Seed for the single-random-pick scores.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write a JSON summary of the run.
    #[arg(long)]
    pub summary_path: Option<PathBuf>,

    #[arg(long, default_value_t = 12)]
    pub column_width: usize,

    #[arg(long, default_value_t = 2)]
    pub precision: usize,
}

impl EvaluateArgs {
    pub fn report_format(&self) -> ReportFormat {
        ReportFormat {
            column_width: self.column_width,
            precision: self.precision,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputType {
    /// Tab-delimited text.
    Csv,
    /// Spreadsheet workbook.
    Excel,
    /// SQLite database with a `report` table.
    Sqlite,
}

impl OutputType {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "xlsx",
            Self::Sqlite => "sqlite",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SegmentArgs {
    /// Plain-text files, one paragraph per line.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_defaults_to_delimited_output() {
        let cli = Cli::try_parse_from([
            "morpheval",
            "evaluate",
            "--hypothesis-suffix",
            ".hyp.tsv",
            "a.txt",
            "b.txt",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.verbosity, 0);
        let Commands::Evaluate(args) = cli.command else {
            panic!("expected evaluate command");
        };
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.output_types, vec![OutputType::Csv]);
        assert_eq!(args.report_format(), ReportFormat::default());
    }

    #[test]
    fn output_types_accept_comma_list() {
        let cli = Cli::try_parse_from([
            "morpheval",
            "--verbosity",
            "2",
            "evaluate",
            "--output-types",
            "csv,excel",
            "--analyzer",
            "etana",
            "--analyzer-arg",
            "-lex",
            "gold.txt",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.verbosity, 2);
        let Commands::Evaluate(args) = cli.command else {
            panic!("expected evaluate command");
        };
        assert_eq!(args.output_types, vec![OutputType::Csv, OutputType::Excel]);
        assert_eq!(args.analyzer_args, vec!["-lex".to_string()]);
    }

    #[test]
    fn evaluate_requires_a_hypothesis_source() {
        let result = Cli::try_parse_from(["morpheval", "evaluate", "gold.txt"]);
        assert!(result.is_err());

        let both = Cli::try_parse_from([
            "morpheval",
            "evaluate",
            "--analyzer",
            "etana",
            "--hypothesis-suffix",
            ".tsv",
            "gold.txt",
        ]);
        assert!(both.is_err());
    }
}
