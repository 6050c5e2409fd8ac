mod currency;
mod email;
mod misspell;
mod names;
mod numbers;
mod pipeline;
mod rewrite_rule;
mod transcription_normalizer;

pub use currency::{indian_group, CurrencyNormalizer};
pub use email::{collapse_spelled_letters, EmailNormalizer};
pub use misspell::MisspellCorrector;
pub use names::{NameCorrector, DEFAULT_NAME_THRESHOLD};
pub(crate) use names::is_edge_punctuation;
pub use numbers::{normalize_numbers_spoken, words_to_digits, NumberNormalizer};
pub use pipeline::NormalizationPipeline;
pub use rewrite_rule::{apply_chain, RewriteRule};
pub use transcription_normalizer::TranscriptionNormalizer;
