use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::collections::HashMap;
use tracing::debug;

use crate::normalizer::TranscriptionNormalizer;
use crate::resources::MisspellMap;

/// Whole-word dictionary substitution of common ASR misspellings.
///
/// Only single-word keys take part; a key containing whitespace can never
/// match a `\b…\b` word and is skipped when the pattern is built.
pub struct MisspellCorrector {
    pattern: Option<Regex>,
    replacements: HashMap<String, String>,
}

impl MisspellCorrector {
    pub fn new(map: &MisspellMap) -> Result<Self> {
        let mut keys: Vec<&str> = map.single_word_keys().collect();
        if keys.is_empty() {
            debug!("Misspell map has no single-word keys; corrector is a no-op");
            return Ok(Self {
                pattern: None,
                replacements: HashMap::new(),
            });
        }

        // Longest first so a key never shadows a longer key it prefixes
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let alternation = keys
            .iter()
            .map(|key| regex::escape(key))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\b({})\b", alternation))
            .context("Failed to compile misspelling pattern")?;

        let replacements = keys
            .iter()
            .filter_map(|key| map.get(key).map(|value| (key.to_string(), value.to_string())))
            .collect();

        debug!("Compiled misspelling pattern over {} keys", keys.len());

        Ok(Self {
            pattern: Some(pattern),
            replacements,
        })
    }
}

impl TranscriptionNormalizer for MisspellCorrector {
    fn normalize(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };

        pattern
            .replace_all(text, |caps: &Captures| {
                let matched = &caps[0];
                self.replacements
                    .get(&matched.to_lowercase())
                    .cloned()
                    .unwrap_or_else(|| matched.to_string())
            })
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "MisspellCorrector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector(pairs: &[(&str, &str)]) -> MisspellCorrector {
        let map = MisspellMap::from_pairs(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        MisspellCorrector::new(&map).unwrap()
    }

    #[test]
    fn test_replaces_whole_words_case_insensitively() {
        let c = corrector(&[("recieve", "receive"), ("adress", "address")]);
        assert_eq!(
            c.normalize("I did not RECIEVE the adress"),
            "I did not receive the address"
        );
    }

    #[test]
    fn test_ignores_partial_words() {
        let c = corrector(&[("teh", "the")]);
        assert_eq!(c.normalize("tehran teh"), "tehran the");
    }

    #[test]
    fn test_multi_word_keys_are_ignored() {
        let c = corrector(&[("g mail", "gmail")]);
        assert_eq!(c.normalize("my g mail id"), "my g mail id");
    }

    #[test]
    fn test_longer_key_wins_over_prefix() {
        let c = corrector(&[("acc", "account"), ("accnt", "account")]);
        assert_eq!(c.normalize("my accnt and acc"), "my account and account");
    }

    #[test]
    fn test_is_idempotent_on_corrected_text() {
        let c = corrector(&[("recieve", "receive"), ("wich", "which"), ("tommorow", "tomorrow")]);
        let once = c.normalize("wich day will you recieve it tommorow");
        let twice = c.normalize(&once);
        assert_eq!(once, "which day will you receive it tomorrow");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_map_is_noop() {
        let c = corrector(&[]);
        assert_eq!(c.normalize("anything goes"), "anything goes");
    }
}
