use tracing::debug;

use crate::normalizer::TranscriptionNormalizer;

/// An ordered list of stages run one after another over a transcript.
pub struct NormalizationPipeline<'a> {
    name: &'static str,
    stages: Vec<&'a dyn TranscriptionNormalizer>,
}

impl<'a> NormalizationPipeline<'a> {
    pub fn new(name: &'static str, stages: Vec<&'a dyn TranscriptionNormalizer>) -> Self {
        Self { name, stages }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run every stage in order
    pub fn run(&self, text: &str) -> String {
        self.stages.iter().fold(text.to_string(), |acc, stage| {
            debug!("Running {} in {} pipeline", stage.name(), self.name);
            stage.normalize(&acc)
        })
    }
}
