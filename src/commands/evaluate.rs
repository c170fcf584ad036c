use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::cli::{EvaluateArgs, OutputType};
use crate::error::EvalError;
use crate::gold::{GoldLineParser, GoldTable, read_gold_file};
use crate::hypothesis::{CommandAnalyzer, HypothesisSource, TableFileSource};
use crate::model::{FileStatus, FileSummary, RunSummary};
use crate::output::write_report;
use crate::report::{ColumnSummary, ReportTable, align, assemble, print_summary, summarize};
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

const SUMMARY_MANIFEST_VERSION: u32 = 1;

pub fn run(args: EvaluateArgs, verbosity: u8) -> Result<()> {
    let parser = GoldLineParser::new()?;
    let source = hypothesis_source(&args)?;
    let output_types = distinct_output_types(&args.output_types);
    let format = args.report_format();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(files = args.files.len(), seed = ?args.seed, "starting evaluation");

    let mut files = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let sha256 = args
            .summary_path
            .as_ref()
            .and_then(|_| sha256_file(path).ok());

        let evaluation = match evaluate_file(path, &parser, source.as_ref(), &mut rng) {
            Ok(evaluation) => evaluation,
            Err(err) => {
                warn!(file = %path.display(), error = %err, "skipped file");
                files.push(skipped_summary(path, sha256, &err));
                continue;
            }
        };

        if verbosity > 0 {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            print_summary(
                &mut out,
                &path.display().to_string(),
                &evaluation.summaries,
                &format,
            )
            .context("failed to print summary statistics")?;
        }

        let mut outputs = Vec::with_capacity(output_types.len());
        for output_type in &output_types {
            let written = write_report(path, *output_type, &evaluation.table)
                .with_context(|| format!("failed to write report for {}", path.display()))?;
            info!(file = %path.display(), output = %written.display(), "wrote report");
            outputs.push(written.display().to_string());
        }

        files.push(scored_summary(path, sha256, &evaluation, outputs));
    }

    let scored_count = files
        .iter()
        .filter(|file| file.status == FileStatus::Scored)
        .count();
    let skipped_count = files.len() - scored_count;

    if let Some(summary_path) = &args.summary_path {
        let summary = RunSummary {
            manifest_version: SUMMARY_MANIFEST_VERSION,
            generated_at: now_utc_string(),
            seed: args.seed,
            file_count: files.len(),
            scored_count,
            skipped_count,
            files,
        };
        write_json_pretty(summary_path, &summary)?;
        info!(path = %summary_path.display(), "wrote run summary");
    }

    info!(scored = scored_count, skipped = skipped_count, "evaluation completed");
    Ok(())
}

/// Everything derived from one gold file before it is persisted.
#[derive(Debug, Clone)]
pub struct FileEvaluation {
    pub gold: GoldTable,
    pub table: ReportTable,
    pub summaries: Vec<ColumnSummary>,
}

pub fn evaluate_file<R: Rng + ?Sized>(
    path: &Path,
    parser: &GoldLineParser,
    source: &dyn HypothesisSource,
    rng: &mut R,
) -> Result<FileEvaluation, EvalError> {
    let gold = read_gold_file(parser, path)?;
    info!(
        file = %path.display(),
        rows = gold.len(),
        skipped_lines = gold.skipped_lines,
        "loaded gold standard"
    );
    if gold.is_empty() {
        warn!(file = %path.display(), "gold file has no usable rows");
    }

    let hypothesis = source.hypothesis_for(path, &gold.text)?;
    let aligned = align(&hypothesis, &gold.rows)?;
    let scored = assemble(&aligned, rng);
    let table = ReportTable::from_scored(&scored);
    let summaries = summarize(&table);

    Ok(FileEvaluation {
        gold,
        table,
        summaries,
    })
}

fn hypothesis_source(args: &EvaluateArgs) -> Result<Box<dyn HypothesisSource>> {
    match (&args.analyzer, &args.hypothesis_suffix) {
        (Some(program), None) => Ok(Box::new(CommandAnalyzer::new(
            program.clone(),
            args.analyzer_args.clone(),
        ))),
        (None, Some(suffix)) => Ok(Box::new(TableFileSource::new(suffix.clone()))),
        _ => bail!("exactly one of --analyzer or --hypothesis-suffix is required"),
    }
}

fn distinct_output_types(requested: &[OutputType]) -> Vec<OutputType> {
    let mut distinct = Vec::<OutputType>::with_capacity(requested.len());
    for output_type in requested {
        if !distinct.contains(output_type) {
            distinct.push(*output_type);
        }
    }
    distinct
}

fn scored_summary(
    path: &Path,
    sha256: Option<String>,
    evaluation: &FileEvaluation,
    outputs: Vec<String>,
) -> FileSummary {
    let means = evaluation
        .summaries
        .iter()
        .map(|summary| (summary.column.clone(), summary.mean))
        .collect::<BTreeMap<String, f64>>();

    FileSummary {
        path: path.display().to_string(),
        sha256,
        status: FileStatus::Scored,
        reason: None,
        gold_rows: evaluation.gold.len(),
        skipped_lines: evaluation.gold.skipped_lines,
        unmarked_fallbacks: evaluation.gold.unmarked_fallbacks,
        means,
        outputs,
    }
}

fn skipped_summary(path: &Path, sha256: Option<String>, err: &EvalError) -> FileSummary {
    FileSummary {
        path: path.display().to_string(),
        sha256,
        status: FileStatus::Skipped,
        reason: Some(err.to_string()),
        gold_rows: 0,
        skipped_lines: 0,
        unmarked_fallbacks: 0,
        means: BTreeMap::new(),
        outputs: Vec::new(),
    }
}
