//! The per-record correction flow: candidates, selection, postformatting.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::candidates::{CandidateGenerator, CandidateSet};
use crate::config::{Config, RulesConfig};
use crate::postformat::Postformatter;
use crate::resources::{MisspellMap, NameLexicon};
use crate::selector::{build_selector, Selector, SelectorError};

pub struct PostProcessor {
    generator: CandidateGenerator,
    selector: Box<dyn Selector>,
    formatter: Postformatter,
}

impl PostProcessor {
    pub fn new(
        misspell_map: &MisspellMap,
        lexicon: NameLexicon,
        rules: &RulesConfig,
        selector: Box<dyn Selector>,
    ) -> Result<Self> {
        let generator = CandidateGenerator::new(
            misspell_map,
            &lexicon,
            rules.name_threshold,
            rules.max_candidates,
        )?;

        Ok(Self {
            generator,
            selector,
            formatter: Postformatter::new(lexicon),
        })
    }

    /// Load the resources named in `config` and build the configured selector.
    pub fn from_config(config: &Config) -> Result<Self> {
        let lexicon = NameLexicon::load(&config.resources.names_path)
            .context("Failed to load name lexicon")?;
        let misspell_map = MisspellMap::load(&config.resources.misspell_path)
            .context("Failed to load misspell map")?;
        let selector = build_selector(&config.selector)?;

        info!(
            "Post-processor ready: {} names, {} misspellings, {} selector",
            lexicon.len(),
            misspell_map.len(),
            selector.name()
        );

        Self::new(&misspell_map, lexicon, &config.rules, selector)
    }

    pub fn selector_name(&self) -> &'static str {
        self.selector.name()
    }

    pub fn candidates(&self, text: &str) -> CandidateSet {
        self.generator.generate(text)
    }

    /// Ask the selector for the best candidate; a string outside the set is
    /// rejected.
    pub async fn select(&self, candidates: &CandidateSet) -> Result<String, SelectorError> {
        let texts = candidates.texts();
        let chosen = self.selector.choose_best(&texts).await?;

        match candidates.kind_of(&chosen) {
            Some(kind) => {
                debug!("{} selector chose the {} candidate", self.selector.name(), kind);
                Ok(chosen)
            }
            None => Err(SelectorError::NotACandidate(chosen)),
        }
    }

    pub fn format(&self, chosen: &str) -> String {
        self.formatter.format(chosen)
    }

    /// Correct one transcript. Selector failures are returned to the caller.
    pub async fn process_one(&self, text: &str) -> Result<String, SelectorError> {
        let candidates = self.candidates(text);
        let chosen = self.select(&candidates).await?;
        Ok(self.format(&chosen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{MostEditedSelector, OriginalSelector, SelectorFuture};

    struct Inventing;

    impl Selector for Inventing {
        fn name(&self) -> &'static str {
            "inventing"
        }

        fn choose_best<'a>(&'a self, _candidates: &'a [String]) -> SelectorFuture<'a> {
            Box::pin(async { Ok::<_, SelectorError>("something new".to_string()) })
        }
    }

    fn processor(selector: Box<dyn Selector>) -> PostProcessor {
        let map = MisspellMap::from_pairs(vec![("numbr".to_string(), "number".to_string())]);
        let lexicon = NameLexicon::from_names(vec!["Alok".to_string(), "Ansh".to_string()]);
        PostProcessor::new(&map, lexicon, &RulesConfig::default(), selector).unwrap()
    }

    #[tokio::test]
    async fn test_process_one_full_flow() {
        let p = processor(Box::new(MostEditedSelector));
        let out = p
            .process_one("can alok call my numbr nine eight double seven six")
            .await
            .unwrap();
        assert_eq!(out, "Can Alok call my number 98776?");
    }

    #[tokio::test]
    async fn test_original_selector_still_formats() {
        let p = processor(Box::new(OriginalSelector));
        let out = p.process_one("ansh sent it").await.unwrap();
        assert_eq!(out, "Ansh sent it.");
    }

    #[tokio::test]
    async fn test_empty_transcript() {
        let p = processor(Box::new(OriginalSelector));
        assert_eq!(p.process_one("").await.unwrap(), ".");
    }

    #[tokio::test]
    async fn test_selector_output_must_be_a_candidate() {
        let p = processor(Box::new(Inventing));
        let err = p.process_one("hello").await.unwrap_err();
        assert!(matches!(err, SelectorError::NotACandidate(s) if s == "something new"));
    }
}
