//! Error taxonomy for the triage core.
//!
//! Only one error is recoverable per-request: [`TriageError::InsufficientInput`],
//! raised when the normalized text is too short to classify meaningfully.
//! Everything else is an initialization-time failure (rule table loading,
//! model validation) that must halt startup before any request is served.
//! Rule matching and derivation are total and have no error cases at all.

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    /// The normalized text carries too few tokens to classify. Callers should
    /// prompt the user for a more detailed description; urgency matching is
    /// unaffected and can still be surfaced independently.
    #[error(
        "symptom description is too short to classify ({token_count} usable tokens, need at least {min})"
    )]
    InsufficientInput { token_count: usize, min: usize },

    /// The injected specialty model declares an empty label set. Detected
    /// when the classifier adapter is constructed, never per-request.
    #[error("specialty model declares no labels")]
    EmptyLabelSet,

    /// An urgency rule table failed validation.
    #[error("invalid rule table: {0}")]
    InvalidRuleTable(String),

    #[error("failed to read rule table file: {0}")]
    RulesFileRead(std::io::Error),

    #[error("failed to parse rule table file: {0}")]
    RulesFileParse(serde_path_to_error::Error<serde_yaml::Error>),
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;
