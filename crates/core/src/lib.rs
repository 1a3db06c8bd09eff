//! # Triage Core
//!
//! Decision logic for the symptom triage engine.
//!
//! Given a free-text symptom description (Spanish), this crate produces a
//! single recommendation record combining three coupled results:
//! - the predicted medical specialty (via an injected classifier model),
//! - a Manchester-style urgency level (via an ordered keyword rule table),
//! - a referral to the appropriate tier of care.
//!
//! The pipeline is evaluated per request with no cross-request state:
//!
//! ```text
//! raw text ──► Normalizer ──► normalized text ──► SpecialtyClassifier ──► (label, confidence)
//! raw text ──────────────────────────────────────► RuleTable ───────────► urgency rule
//! (urgency, label, confidence) ──► derivation + advice ──► TriageAssessment
//! ```
//!
//! The urgency matcher deliberately consumes the **raw** text: urgency
//! phrases such as "no respira" are built from exactly the function words
//! normalization would alter.
//!
//! Linguistic and statistical models are injected through the
//! [`triage_nlp::Lemmatizer`] and [`triage_model::SpecialtyModel`] traits,
//! constructed once at process startup and shared read-only.
//!
//! **No API concerns**: HTTP servers, CLI parsing and response rendering
//! belong in `api-rest`, `cli` and the root runner.

pub mod advice;
pub mod classify;
pub mod config;
pub mod derivation;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod rules;

#[cfg(test)]
pub(crate) mod test_support;

pub use advice::SpecialtyAdvice;
pub use classify::{Classification, SpecialtyClassifier, MIN_CLASSIFY_TOKENS};
pub use config::ArtifactPaths;
pub use derivation::{derive, FacilityTier, Referral};
pub use engine::{TriageAssessment, TriageEngine};
pub use error::{TriageError, TriageResult};
pub use normalize::{NormalizedText, Normalizer};
pub use rules::{RuleTable, UrgencyRule};
pub use triage_types::{Confidence, ConfidenceTier, UrgencyLevel};
