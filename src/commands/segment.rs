use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::SegmentArgs;
use crate::segment::{Envelope, Segmenter};

pub fn run(args: SegmentArgs) -> Result<()> {
    let segmenter = Segmenter::new()?;
    let mut envelope = Envelope::default();

    for path in &args.files {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let paragraphs = segmenter.paragraphs(&path.display().to_string(), &raw);
        info!(file = %path.display(), paragraphs = paragraphs.len(), "segmented");
        envelope.paragraphs.extend(paragraphs);
    }

    let data = serde_json::to_string_pretty(&envelope).context("failed to serialize envelope")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{data}").context("failed to write envelope")?;
    Ok(())
}
