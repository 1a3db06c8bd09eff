//! Tokenizer/lemmatizer capability for clinical Spanish text.
//!
//! The triage engine never tokenizes text itself; it works through the
//! [`Lemmatizer`] trait so that the linguistic model is an injected,
//! read-only collaborator. This crate also ships the production
//! implementation, [`LexiconLemmatizer`], which is backed by a JSON lexicon
//! artifact (surface form → lemma, plus a stopword list).
//!
//! ## Negation exceptions
//!
//! Clinical text inverts meaning with short function words ("no presenta
//! fiebre" vs "presenta fiebre"), and exactly those words are usually
//! stopwords. The words in [`DEFAULT_NEGATION_EXCEPTIONS`] are therefore
//! removed from the stopword set **once, at construction**; the lemmatizer
//! is immutable afterwards, so no per-request reconfiguration can occur and
//! concurrent requests may share one instance behind an `Arc`.

pub mod lexicon;

pub use lexicon::LexiconLemmatizer;

/// Negation and minimizer words that must never be treated as stopwords.
///
/// Dropping any of these during normalization would invert or soften the
/// clinical meaning of the surrounding text.
pub const DEFAULT_NEGATION_EXCEPTIONS: &[&str] = &[
    "no", "sin", "ni", "nunca", "jamás", "tampoco", "nada", "poco", "apenas",
];

/// Errors raised while constructing a lemmatizer.
///
/// These are initialization errors: they surface at process startup and are
/// never produced per-request. Tokenization itself is infallible.
#[derive(Debug, thiserror::Error)]
pub enum NlpError {
    #[error("failed to read lexicon artifact: {0}")]
    ArtifactRead(std::io::Error),
    #[error("failed to parse lexicon artifact: {0}")]
    ArtifactParse(serde_json::Error),
    #[error("lexicon artifact contains no lemma entries")]
    EmptyLexicon,
}

pub type NlpResult<T> = std::result::Result<T, NlpError>;

/// One token produced by a [`Lemmatizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The surface form as it appeared in the input.
    pub surface: String,
    /// Dictionary base form of the token.
    pub lemma: String,
    /// Whether the surface form is a stopword (negation exceptions are never
    /// stopwords).
    pub is_stopword: bool,
    /// Whether the token carries no alphabetic content.
    pub is_punctuation: bool,
}

/// Tokenization and lemmatization capability.
///
/// Implementations must be deterministic for a fixed artifact version and
/// safe to share read-only across concurrent requests.
pub trait Lemmatizer: Send + Sync {
    /// Splits `text` into tokens and annotates each with its lemma,
    /// stopword status and punctuation status, preserving source order.
    fn tokenize_and_lemmatize(&self, text: &str) -> Vec<Token>;
}
