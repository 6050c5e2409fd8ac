//! CLI handlers for correcting a single transcript.

use anyhow::Result;

use crate::cli::args::TextCliArgs;
use crate::config::Config;
use crate::processor::PostProcessor;

pub async fn handle_fix_command(config: &Config, args: TextCliArgs) -> Result<()> {
    let processor = PostProcessor::from_config(config)?;
    let corrected = processor.process_one(&args.text).await?;
    println!("{}", corrected);
    Ok(())
}

pub fn handle_candidates_command(config: &Config, args: TextCliArgs) -> Result<()> {
    let processor = PostProcessor::from_config(config)?;
    let candidates = processor.candidates(&args.text);

    for candidate in candidates.iter() {
        println!("[{:<11}] {}", candidate.kind, candidate.text);
    }

    Ok(())
}
