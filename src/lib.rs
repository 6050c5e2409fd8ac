//! Rule-based correction of noisy ASR transcripts.
//!
//! A transcript is rewritten by several pipelines of pure normalization
//! stages, a [`selector::Selector`] picks one rewrite, and the
//! [`postformat::Postformatter`] fixes name casing and sentence punctuation.

pub mod batch;
pub mod candidates;
pub mod cli;
pub mod config;
pub mod global;
pub mod normalizer;
pub mod postformat;
pub mod processor;
pub mod resources;
pub mod selector;

pub use candidates::{Candidate, CandidateGenerator, CandidateKind, CandidateSet};
pub use processor::PostProcessor;
