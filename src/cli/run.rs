//! CLI handler for batch correction of JSONL files.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::{run_file, BatchOptions};
use crate::cli::args::RunCliArgs;
use crate::config::Config;
use crate::processor::PostProcessor;

pub async fn handle_run_command(config: &Config, args: RunCliArgs) -> Result<()> {
    let processor = PostProcessor::from_config(config)?;
    let options = BatchOptions {
        fallback_to_base: config.batch.fallback_to_base && !args.strict,
    };

    let pb = if args.no_progress {
        None
    } else {
        Some(create_progress_bar())
    };

    let report = run_file(&processor, &args.input, &args.output, &options, pb.as_ref()).await?;

    if let Some(pb) = pb {
        pb.finish_with_message("Complete");
    }

    println!(
        "Processed {} records with the {} selector ({} fallbacks). Output written to {}",
        report.processed,
        processor.selector_name(),
        report.fallbacks,
        args.output.display()
    );

    Ok(())
}

fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
