//! Specialty classifier capability.
//!
//! The triage engine consumes the statistical specialty classifier as a
//! black box: normalized text in, posterior distribution over a closed label
//! set out. This crate defines that boundary as the [`SpecialtyModel`] trait
//! and ships the production implementation, [`LinearSpecialtyModel`], which
//! evaluates a linear bag-of-features model loaded from a JSON artifact.
//!
//! Training the model is out of scope for this repository; the artifact is
//! produced offline and treated as immutable input configuration. All
//! artifact validation happens at load time; prediction itself is infallible
//! and deterministic for a fixed artifact.

pub mod linear;

pub use linear::LinearSpecialtyModel;

/// Errors raised while loading a model artifact.
///
/// These are initialization errors: the process must not serve requests if
/// the artifact is missing or corrupt.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    ArtifactRead(std::io::Error),
    #[error("failed to parse model artifact: {0}")]
    ArtifactParse(serde_json::Error),
    #[error("model artifact declares no labels")]
    EmptyLabelSet,
    #[error("model artifact is inconsistent: {0}")]
    ShapeMismatch(String),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Text-to-specialty classification capability.
///
/// Implementations must be pure and deterministic for a fixed model, and
/// safe to share read-only across concurrent requests.
pub trait SpecialtyModel: Send + Sync {
    /// The closed label set established at training time. Order is fixed and
    /// matches the distribution returned by
    /// [`predict_distribution`](Self::predict_distribution).
    fn labels(&self) -> &[String];

    /// Returns the posterior probability for each label, aligned with
    /// [`labels`](Self::labels). The values are non-negative and sum to 1.
    fn predict_distribution(&self, text: &str) -> Vec<f64>;
}
