use crate::candidates::MAX_CANDIDATES;
use crate::global;
use crate::normalizer::DEFAULT_NAME_THRESHOLD;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub resources: ResourcesConfig,
    pub rules: RulesConfig,
    pub selector: SelectorConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Newline-delimited list of canonical names
    pub names_path: PathBuf,
    /// JSON object mapping misspelled words to their corrections
    pub misspell_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Minimum similarity (0-100) for a fuzzy name replacement
    pub name_threshold: u8,
    /// Upper bound on candidates handed to the selector (1-5)
    pub max_candidates: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One of "original", "most-edited", "remote"
    pub kind: String,
    /// Scoring service URL, required for the remote selector
    pub endpoint: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Use the misspell-corrected candidate when the selector fails
    pub fallback_to_base: bool,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            names_path: PathBuf::from("data/names_lexicon.txt"),
            misspell_path: PathBuf::from("data/misspell_map.json"),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            name_threshold: DEFAULT_NAME_THRESHOLD,
            max_candidates: MAX_CANDIDATES,
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            kind: "most-edited".to_string(),
            endpoint: None,
            timeout_seconds: 30,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            fallback_to_base: true,
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing default file is created with default values; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let config_path = Self::config_path()?;
                if !config_path.exists() {
                    info!(
                        "Config file not found, creating default at {:?}",
                        config_path
                    );
                    let config = Self::default();
                    config.save_to(&config_path)?;
                    return Ok(config);
                }
                Self::load_from(&config_path)?
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.rules.name_threshold > 100 {
            bail!(
                "rules.name_threshold must be between 0 and 100, got {}",
                self.rules.name_threshold
            );
        }
        if !(1..=MAX_CANDIDATES).contains(&self.rules.max_candidates) {
            bail!(
                "rules.max_candidates must be between 1 and {}, got {}",
                MAX_CANDIDATES,
                self.rules.max_candidates
            );
        }
        if self.selector.kind == "remote"
            && self
                .selector
                .endpoint
                .as_deref()
                .map_or(true, |e| e.trim().is_empty())
        {
            bail!("selector.endpoint is required when selector.kind = \"remote\"");
        }
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}
