//! Load-once reference data: the misspelling map and the name lexicon.
//!
//! Both are read at startup and never mutated afterwards. Any failure to
//! read or parse them is fatal for the caller.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Failed to read {kind} at {path:?}: {source}")]
    Read {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse misspell map at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Misspell map at {path:?} has an empty replacement for '{key}'")]
    EmptyReplacement { path: PathBuf, key: String },
}

/// Lowercase misspelled word -> canonical replacement.
#[derive(Debug, Clone, Default)]
pub struct MisspellMap {
    entries: HashMap<String, String>,
}

impl MisspellMap {
    /// Build from pairs; keys are lower-cased and trimmed, a later duplicate
    /// key replaces an earlier one.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(key, value)| (key.trim().to_lowercase(), value))
            .filter(|(key, _)| !key.is_empty())
            .collect();

        Self { entries }
    }

    /// Load a JSON object of `"misspelled": "correct"` pairs.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ResourceError::Read {
            kind: "misspell map",
            path: path.to_path_buf(),
            source,
        })?;

        let raw: HashMap<String, String> =
            serde_json::from_str(&content).map_err(|source| ResourceError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some((key, _)) = raw.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ResourceError::EmptyReplacement {
                path: path.to_path_buf(),
                key: key.clone(),
            });
        }

        let map = Self::from_pairs(raw);
        info!("Loaded {} misspellings from {:?}", map.len(), path);
        Ok(map)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Keys without whitespace; only these take part in substitution.
    pub fn single_word_keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .keys()
            .map(String::as_str)
            .filter(|key| !key.contains(char::is_whitespace))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical names in file order plus their case-folded set.
#[derive(Debug, Clone, Default)]
pub struct NameLexicon {
    names: Vec<String>,
    folded: HashSet<String>,
}

impl NameLexicon {
    /// Build from names; entries are trimmed and blank ones dropped.
    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        let folded = names.iter().map(|name| name.to_lowercase()).collect();

        Self { names, folded }
    }

    /// Load a newline-delimited list of names.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ResourceError::Read {
            kind: "name lexicon",
            path: path.to_path_buf(),
            source,
        })?;

        let lexicon = Self::from_names(content.lines().map(String::from));
        info!("Loaded {} names from {:?}", lexicon.len(), path);
        Ok(lexicon)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Exact, case-insensitive membership; `word` must already be lower-cased.
    pub fn contains_folded(&self, word: &str) -> bool {
        self.folded.contains(word)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
