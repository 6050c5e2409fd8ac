//! CLI handler for inspecting the configuration.

use anyhow::{Context, Result};

use crate::cli::args::{ConfigCliArgs, ConfigCommand};
use crate::config::Config;

pub fn handle_config_command(config: &Config, args: ConfigCliArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let rendered =
                toml::to_string_pretty(config).context("Failed to serialize config")?;
            print!("{}", rendered);
        }
        ConfigCommand::Path => {
            println!("{}", Config::config_path()?.display());
        }
    }

    Ok(())
}
