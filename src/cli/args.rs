use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "transcript-fix")]
#[command(about = "Clean up noisy speech-to-text transcripts", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: <config dir>/transcript-fix/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the name lexicon path
    #[arg(long, global = true)]
    pub names: Option<PathBuf>,

    /// Override the misspell map path
    #[arg(long, global = true)]
    pub misspell: Option<PathBuf>,

    /// Override the selector (original, most-edited, remote)
    #[arg(long, global = true)]
    pub selector: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Correct a JSONL file of {"id", "text"} records
    Run(RunCliArgs),
    /// Correct a single transcript and print it
    Fix(TextCliArgs),
    /// Print the candidate rewrites of a transcript
    Candidates(TextCliArgs),
    /// Inspect the configuration
    Config(ConfigCliArgs),
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct RunCliArgs {
    /// Input JSONL file
    #[arg(short, long, default_value = "data/noisy_transcripts.jsonl")]
    pub input: PathBuf,
    /// Output JSONL file
    #[arg(short, long, default_value = "out/corrected.jsonl")]
    pub output: PathBuf,
    /// Abort on the first selector failure instead of using the base candidate
    #[arg(long)]
    pub strict: bool,
    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(ClapArgs, Debug)]
pub struct TextCliArgs {
    /// Transcript text
    pub text: String,
}

#[derive(ClapArgs, Debug)]
pub struct ConfigCliArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the default config file path
    Path,
}
