pub mod args;
pub mod config;
pub mod fix;
pub mod run;

pub use args::{Cli, CliCommand, ConfigCommand};
pub use config::handle_config_command;
pub use fix::{handle_candidates_command, handle_fix_command};
pub use run::handle_run_command;

use crate::config::Config;
use anyhow::Result;

/// Load the configuration and apply the global command-line overrides.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(names) = &cli.names {
        config.resources.names_path = names.clone();
    }
    if let Some(misspell) = &cli.misspell {
        config.resources.misspell_path = misspell.clone();
    }
    if let Some(selector) = &cli.selector {
        config.selector.kind = selector.clone();
    }

    config.validate()?;
    Ok(config)
}
