//! Candidate generation: one transcript in, a small ordered set of rewrites out.

use anyhow::Result;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::normalizer::{
    CurrencyNormalizer, EmailNormalizer, MisspellCorrector, NameCorrector, NormalizationPipeline,
    NumberNormalizer, TranscriptionNormalizer,
};
use crate::resources::{MisspellMap, NameLexicon};

pub const MAX_CANDIDATES: usize = 5;

/// Which rewrite produced a candidate, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateKind {
    Original,
    Base,
    Full,
    NoNames,
    NoNumbers,
    EmailNames,
}

impl CandidateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateKind::Original => "original",
            CandidateKind::Base => "base",
            CandidateKind::Full => "full",
            CandidateKind::NoNames => "no-names",
            CandidateKind::NoNumbers => "no-numbers",
            CandidateKind::EmailNames => "email-names",
        }
    }
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Rule stages a pipeline can be assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Email,
    Numbers,
    Currency,
    Names,
}

/// The rewrites derived from the misspell-corrected base text, in order.
pub const PIPELINES: [(CandidateKind, &[Stage]); 4] = [
    (
        CandidateKind::Full,
        &[Stage::Email, Stage::Numbers, Stage::Currency, Stage::Names],
    ),
    (
        CandidateKind::NoNames,
        &[Stage::Email, Stage::Numbers, Stage::Currency],
    ),
    (CandidateKind::NoNumbers, &[Stage::Email, Stage::Names]),
    (CandidateKind::EmailNames, &[Stage::Email, Stage::Names]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub text: String,
    pub kind: CandidateKind,
}

/// Deduplicated candidates in priority order, original first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    fn with_original(original: &str) -> Self {
        Self {
            candidates: vec![Candidate {
                text: original.to_string(),
                kind: CandidateKind::Original,
            }],
        }
    }

    /// Add a candidate unless an equal string is already present.
    fn insert(&mut self, text: String, kind: CandidateKind) -> bool {
        if self.candidates.iter().any(|c| c.text == text) {
            return false;
        }
        self.candidates.push(Candidate { text, kind });
        true
    }

    fn truncate(&mut self, limit: usize) {
        self.candidates.truncate(limit.max(1));
    }

    pub fn original(&self) -> &str {
        &self.candidates[0].text
    }

    /// The misspell-corrected text, or the original when correction changed
    /// nothing.
    pub fn base(&self) -> &str {
        self.get(CandidateKind::Base).unwrap_or_else(|| self.original())
    }

    pub fn get(&self, kind: CandidateKind) -> Option<&str> {
        self.candidates
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.text.as_str())
    }

    pub fn kind_of(&self, text: &str) -> Option<CandidateKind> {
        self.candidates.iter().find(|c| c.text == text).map(|c| c.kind)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.kind_of(text).is_some()
    }

    pub fn texts(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.text.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Composes the rule stages into the candidate set for one transcript.
pub struct CandidateGenerator {
    misspell: MisspellCorrector,
    email: EmailNormalizer,
    numbers: NumberNormalizer,
    currency: CurrencyNormalizer,
    names: NameCorrector,
    max_candidates: usize,
}

impl CandidateGenerator {
    pub fn new(
        misspell_map: &MisspellMap,
        lexicon: &NameLexicon,
        name_threshold: u8,
        max_candidates: usize,
    ) -> Result<Self> {
        Ok(Self {
            misspell: MisspellCorrector::new(misspell_map)?,
            email: EmailNormalizer::new()?,
            numbers: NumberNormalizer::new(),
            currency: CurrencyNormalizer::new()?,
            names: NameCorrector::new(lexicon, name_threshold),
            max_candidates: max_candidates.clamp(1, MAX_CANDIDATES),
        })
    }

    fn stage(&self, stage: Stage) -> &dyn TranscriptionNormalizer {
        match stage {
            Stage::Email => &self.email,
            Stage::Numbers => &self.numbers,
            Stage::Currency => &self.currency,
            Stage::Names => &self.names,
        }
    }

    pub fn pipeline(&self, kind: CandidateKind) -> Option<NormalizationPipeline<'_>> {
        PIPELINES
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(k, stages)| {
                let stages = stages.iter().map(|s| self.stage(*s)).collect();
                NormalizationPipeline::new(k.as_str(), stages)
            })
    }

    /// Misspell-corrected text every other pipeline starts from.
    pub fn base(&self, text: &str) -> String {
        self.misspell.normalize(text)
    }

    pub fn generate(&self, text: &str) -> CandidateSet {
        let mut set = CandidateSet::with_original(text);

        let base = self.base(text);
        set.insert(base.clone(), CandidateKind::Base);

        for (kind, _) in PIPELINES.iter() {
            if let Some(pipeline) = self.pipeline(*kind) {
                set.insert(pipeline.run(&base), *kind);
            }
        }

        set.truncate(self.max_candidates);
        debug!("Generated {} candidates for {:?}", set.len(), text);
        set
    }
}
