use anyhow::{bail, Context, Result};
use rapidfuzz::distance::indel;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tracing::info;

use crate::config::SelectorConfig;

pub mod remote;

pub use remote::RemoteSelector;

#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("No candidates to choose from")]
    NoCandidates,

    #[error("Selector returned a string that is not a candidate: {0:?}")]
    NotACandidate(String),

    #[error("Selector returned {got} scores for {expected} candidates")]
    ScoreCount { expected: usize, got: usize },

    #[error("Selector request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Selector responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode selector response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type SelectorFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, SelectorError>> + Send + 'a>>;

/// Picks one string out of a candidate list.
///
/// Implementations must return a member of `candidates`.
pub trait Selector: Send + Sync {
    fn name(&self) -> &'static str;

    fn choose_best<'a>(&'a self, candidates: &'a [String]) -> SelectorFuture<'a>;
}

/// Always returns the first candidate, the untouched transcript.
#[derive(Debug, Default, Clone, Copy)]
pub struct OriginalSelector;

impl Selector for OriginalSelector {
    fn name(&self) -> &'static str {
        "original"
    }

    fn choose_best<'a>(&'a self, candidates: &'a [String]) -> SelectorFuture<'a> {
        Box::pin(async move { candidates.first().cloned().ok_or(SelectorError::NoCandidates) })
    }
}

/// Offline selector preferring the candidate the rules changed the most.
///
/// Distance is the insert/delete edit count against the first candidate;
/// ties go to the earlier candidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct MostEditedSelector;

impl MostEditedSelector {
    pub fn pick(candidates: &[String]) -> Result<String, SelectorError> {
        let original = candidates.first().ok_or(SelectorError::NoCandidates)?;

        let mut best = original;
        let mut best_distance = 0;
        for candidate in &candidates[1..] {
            let distance = indel::distance(original.chars(), candidate.chars());
            if distance > best_distance {
                best = candidate;
                best_distance = distance;
            }
        }

        Ok(best.clone())
    }
}

impl Selector for MostEditedSelector {
    fn name(&self) -> &'static str {
        "most-edited"
    }

    fn choose_best<'a>(&'a self, candidates: &'a [String]) -> SelectorFuture<'a> {
        Box::pin(async move { Self::pick(candidates) })
    }
}

/// Build the selector named in the configuration.
pub fn build_selector(config: &SelectorConfig) -> Result<Box<dyn Selector>> {
    let selector: Box<dyn Selector> = match config.kind.as_str() {
        "original" => Box::new(OriginalSelector),
        "most-edited" => Box::new(MostEditedSelector),
        "remote" => {
            let endpoint = config
                .endpoint
                .clone()
                .filter(|e| !e.trim().is_empty())
                .context("endpoint is required for the remote selector")?;
            Box::new(RemoteSelector::new(endpoint, config.timeout_seconds)?)
        }
        other => bail!(
            "Unknown selector '{}'. Supported selectors: original, most-edited, remote",
            other
        ),
    };

    info!("Using {} selector", selector.name());
    Ok(selector)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_original_selector() {
        let candidates = strings(&["raw", "fixed"]);
        assert_eq!(OriginalSelector.choose_best(&candidates).await.unwrap(), "raw");
    }

    #[tokio::test]
    async fn test_most_edited_selector() {
        let candidates = strings(&["call double five", "call 55", "Call 55"]);
        let best = MostEditedSelector.choose_best(&candidates).await.unwrap();
        assert_eq!(best, "Call 55");
    }

    #[test]
    fn test_most_edited_tie_goes_to_earlier() {
        let candidates = strings(&["abc", "abd", "abe"]);
        assert_eq!(MostEditedSelector::pick(&candidates).unwrap(), "abd");
    }

    #[tokio::test]
    async fn test_empty_candidates_is_an_error() {
        let empty: Vec<String> = Vec::new();
        assert!(matches!(
            OriginalSelector.choose_best(&empty).await,
            Err(SelectorError::NoCandidates)
        ));
        assert!(matches!(
            MostEditedSelector.choose_best(&empty).await,
            Err(SelectorError::NoCandidates)
        ));
    }

    #[test]
    fn test_build_selector() {
        let mut config = SelectorConfig::default();
        assert_eq!(build_selector(&config).unwrap().name(), "most-edited");

        config.kind = "original".to_string();
        assert_eq!(build_selector(&config).unwrap().name(), "original");

        config.kind = "remote".to_string();
        assert!(build_selector(&config).is_err());

        config.endpoint = Some("http://127.0.0.1:9/score".to_string());
        assert_eq!(build_selector(&config).unwrap().name(), "remote");

        config.kind = "bert".to_string();
        let err = build_selector(&config).err().unwrap();
        assert!(err.to_string().contains("Unknown selector"));
    }
}
