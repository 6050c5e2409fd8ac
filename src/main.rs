use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use transcript_fix::cli::{
    handle_candidates_command, handle_config_command, handle_fix_command, handle_run_command,
    load_config, Cli, CliCommand,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let CliCommand::Version = cli.command {
        println!("transcript-fix {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = load_config(&cli)?;

    match cli.command {
        CliCommand::Run(args) => handle_run_command(&config, args).await,
        CliCommand::Fix(args) => handle_fix_command(&config, args).await,
        CliCommand::Candidates(args) => handle_candidates_command(&config, args),
        CliCommand::Config(args) => handle_config_command(&config, args),
        CliCommand::Version => Ok(()),
    }
}
