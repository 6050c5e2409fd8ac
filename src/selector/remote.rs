use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use super::{Selector, SelectorError, SelectorFuture};

#[derive(Debug, Serialize)]
struct ScoreRequest<'a> {
    candidates: &'a [String],
}

/// Either the chosen string or one score per candidate.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ScoreResponse {
    Best { best: String },
    Scores { scores: Vec<f64> },
}

/// Turn a scoring service response into one of the candidates.
pub fn resolve(candidates: &[String], response: ScoreResponse) -> Result<String, SelectorError> {
    if candidates.is_empty() {
        return Err(SelectorError::NoCandidates);
    }

    match response {
        ScoreResponse::Best { best } => {
            if candidates.contains(&best) {
                Ok(best)
            } else {
                Err(SelectorError::NotACandidate(best))
            }
        }
        ScoreResponse::Scores { scores } => {
            if scores.len() != candidates.len() {
                return Err(SelectorError::ScoreCount {
                    expected: candidates.len(),
                    got: scores.len(),
                });
            }

            let mut best = 0;
            for (i, score) in scores.iter().enumerate().skip(1) {
                if *score > scores[best] {
                    best = i;
                }
            }
            Ok(candidates[best].clone())
        }
    }
}

/// Delegates selection to an HTTP scoring service (e.g. a masked-LM
/// pseudo-likelihood ranker).
///
/// Request body: `{"candidates": [...]}`. Response body: `{"best": "..."}`
/// or `{"scores": [...]}`.
pub struct RemoteSelector {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteSelector {
    pub fn new(endpoint: String, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to build HTTP client for remote selector")?;

        info!("Initialized remote selector with endpoint: {}", endpoint);

        Ok(Self { client, endpoint })
    }

    async fn score(&self, candidates: &[String]) -> Result<String, SelectorError> {
        if candidates.is_empty() {
            return Err(SelectorError::NoCandidates);
        }

        debug!("Scoring {} candidates via {}", candidates.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ScoreRequest { candidates })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                "Remote selector request failed with status {}: {}",
                status, body
            );
            return Err(SelectorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ScoreResponse = serde_json::from_str(&body)?;
        resolve(candidates, parsed)
    }
}

impl Selector for RemoteSelector {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn choose_best<'a>(&'a self, candidates: &'a [String]) -> SelectorFuture<'a> {
        Box::pin(self.score(candidates))
    }
}
