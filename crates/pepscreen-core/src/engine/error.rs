use super::config::ConfigError;
use crate::core::models::sequence::SequenceError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Configuration error: {source}")]
    Configuration {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid parent sequence: {source}")]
    Sequence {
        #[from]
        source: SequenceError,
    },

    #[error("Enumeration of {size} combinations exceeds the configured maximum of {cap}")]
    EnumerationTooLarge { size: u128, cap: u64 },

    #[error("Docking result for '{sequence}' lacks required metric '{metric}'")]
    MissingMetric { sequence: String, metric: String },

    #[error("Metric '{metric}' for '{sequence}' is not a finite number: {value}")]
    InvalidMetric {
        sequence: String,
        metric: String,
        value: f64,
    },

    #[error("Candidate '{sequence}' appears more than once in the ranking input")]
    DuplicateCandidate { sequence: String },

    #[error("No candidates to rank")]
    EmptyInput,
}
