/// A single text rewrite stage applied to a transcript.
///
/// Stages are pure: the same input always yields the same output and no
/// state is mutated after construction, so one instance can be shared across
/// records and threads.
pub trait TranscriptionNormalizer: Send + Sync {
    /// Rewrite the transcript
    fn normalize(&self, text: &str) -> String;

    /// Get the name of this stage for logging
    fn name(&self) -> &'static str;
}
