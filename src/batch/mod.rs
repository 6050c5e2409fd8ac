//! JSONL batch processing: one `{"id", "text"}` record per line in, the same
//! ids with corrected text out.

use anyhow::{anyhow, Context, Result};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::processor::PostProcessor;

/// One transcript. The id is carried through untouched, whatever its JSON
/// type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: serde_json::Value,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Use the misspell-corrected candidate when the selector fails
    pub fallback_to_base: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            fallback_to_base: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub fallbacks: usize,
}

/// Parse JSONL content, skipping blank lines.
pub fn parse_records(content: &str) -> Result<Vec<Record>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Malformed record on line {}", index + 1))
        })
        .collect()
}

/// Serialize records as JSONL, keeping non-ASCII text verbatim.
pub fn render_records(records: &[Record]) -> Result<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record).context("Failed to serialize record")?);
        out.push('\n');
    }
    Ok(out)
}

/// Correct every record in order.
pub async fn process_records(
    processor: &PostProcessor,
    records: Vec<Record>,
    options: &BatchOptions,
    progress: Option<&ProgressBar>,
) -> Result<(Vec<Record>, BatchReport)> {
    let mut report = BatchReport::default();
    let mut out = Vec::with_capacity(records.len());

    for record in records {
        let candidates = processor.candidates(&record.text);
        let chosen = match processor.select(&candidates).await {
            Ok(chosen) => chosen,
            Err(err) if options.fallback_to_base => {
                warn!(
                    "Selector failed for record {}: {}; using base candidate",
                    record.id, err
                );
                report.fallbacks += 1;
                candidates.base().to_string()
            }
            Err(err) => {
                return Err(anyhow!(err).context(format!("Selector failed for record {}", record.id)));
            }
        };

        let text = processor.format(&chosen);
        debug!("Record {}: {:?} -> {:?}", record.id, record.text, text);

        out.push(Record {
            id: record.id,
            text,
        });
        report.processed += 1;

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    Ok((out, report))
}

/// Read `input`, correct every record and write the results to `output`,
/// creating the output directory if needed.
pub async fn run_file(
    processor: &PostProcessor,
    input: &Path,
    output: &Path,
    options: &BatchOptions,
    progress: Option<&ProgressBar>,
) -> Result<BatchReport> {
    let content = fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read input file {:?}", input))?;
    let records = parse_records(&content)?;
    info!("Read {} records from {:?}", records.len(), input);

    if let Some(pb) = progress {
        pb.set_length(records.len() as u64);
    }

    let (corrected, report) = process_records(processor, records, options, progress).await?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }
    fs::write(output, render_records(&corrected)?)
        .await
        .with_context(|| format!("Failed to write output file {:?}", output))?;

    info!(
        "Wrote {} records to {:?} ({} selector fallbacks)",
        report.processed, output, report.fallbacks
    );
    Ok(report)
}
