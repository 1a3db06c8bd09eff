//! Specialty classifier adapter.
//!
//! Wraps the injected [`SpecialtyModel`] capability and enforces the
//! minimum-input precondition: near-empty text would only yield meaningless
//! low-confidence predictions, so it is rejected before the model is ever
//! invoked.

use crate::error::{TriageError, TriageResult};
use crate::normalize::NormalizedText;
use std::sync::Arc;
use triage_model::SpecialtyModel;
use triage_types::Confidence;

/// Minimum number of normalized tokens required to attempt classification.
pub const MIN_CLASSIFY_TOKENS: usize = 2;

/// The classifier's answer: arg-max label and its posterior probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Always a member of the model's closed label set, never free text.
    pub specialty: String,
    pub confidence: Confidence,
}

/// Adapter from normalized text to a [`Classification`].
pub struct SpecialtyClassifier {
    model: Arc<dyn SpecialtyModel>,
}

impl SpecialtyClassifier {
    /// Wraps a model, verifying it declares at least one label.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::EmptyLabelSet`] for a model with no labels.
    /// This is an initialization error; construction happens once at startup.
    pub fn new(model: Arc<dyn SpecialtyModel>) -> TriageResult<Self> {
        if model.labels().is_empty() {
            return Err(TriageError::EmptyLabelSet);
        }
        Ok(Self { model })
    }

    /// Classifies normalized text into a specialty.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InsufficientInput`] when `text` has fewer than
    /// [`MIN_CLASSIFY_TOKENS`] tokens; the model is not invoked in that case.
    pub fn classify(&self, text: &NormalizedText) -> TriageResult<Classification> {
        let token_count = text.token_count();
        if token_count < MIN_CLASSIFY_TOKENS {
            return Err(TriageError::InsufficientInput {
                token_count,
                min: MIN_CLASSIFY_TOKENS,
            });
        }

        let labels = self.model.labels();
        let distribution = self.model.predict_distribution(&text.joined());

        // Arg-max with first-wins tie-break over the model's fixed label
        // order; `best` stays within `labels` even if the distribution is
        // shorter than the label set.
        let mut best = 0;
        let mut best_probability = f64::NEG_INFINITY;
        for (index, probability) in distribution.iter().enumerate().take(labels.len()) {
            if *probability > best_probability {
                best = index;
                best_probability = *probability;
            }
        }

        Ok(Classification {
            specialty: labels[best].clone(),
            confidence: Confidence::clamped(distribution.get(best).copied().unwrap_or(0.0)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeModel;

    fn text_of(tokens: &[&str]) -> NormalizedText {
        use crate::normalize::Normalizer;
        use crate::test_support::spanish_lemmatizer;
        Normalizer::new(Arc::new(spanish_lemmatizer())).normalize(&tokens.join(" "))
    }

    #[test]
    fn test_empty_text_is_insufficient() {
        let classifier =
            SpecialtyClassifier::new(Arc::new(FakeModel::new(&[("NEUROLOGÍA", 1.0)])))
                .expect("valid model");
        let result = classifier.classify(&text_of(&[]));
        assert!(matches!(
            result,
            Err(TriageError::InsufficientInput { token_count: 0, min: 2 })
        ));
    }

    #[test]
    fn test_single_token_is_insufficient() {
        let classifier =
            SpecialtyClassifier::new(Arc::new(FakeModel::new(&[("NEUROLOGÍA", 1.0)])))
                .expect("valid model");
        let result = classifier.classify(&text_of(&["fiebre"]));
        assert!(matches!(
            result,
            Err(TriageError::InsufficientInput { token_count: 1, min: 2 })
        ));
    }

    #[test]
    fn test_two_tokens_reach_the_model() {
        let classifier =
            SpecialtyClassifier::new(Arc::new(FakeModel::new(&[("NEUROLOGÍA", 0.7), ("DERMATOLOGÍA", 0.3)])))
                .expect("valid model");
        let classification = classifier
            .classify(&text_of(&["fiebre", "alta"]))
            .expect("classifies");
        assert_eq!(classification.specialty, "NEUROLOGÍA");
        assert!((classification.confidence.value() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_arg_max_picks_the_most_probable_label() {
        let classifier = SpecialtyClassifier::new(Arc::new(FakeModel::new(&[
            ("CARDIOLOGÍA/CIRCULATORIO", 0.2),
            ("OTORRINOLARINGOLOGÍA", 0.5),
            ("DERMATOLOGÍA", 0.3),
        ])))
        .expect("valid model");
        let classification = classifier
            .classify(&text_of(&["dolor", "garganta"]))
            .expect("classifies");
        assert_eq!(classification.specialty, "OTORRINOLARINGOLOGÍA");
    }

    #[test]
    fn test_ties_resolve_to_first_label() {
        let classifier = SpecialtyClassifier::new(Arc::new(FakeModel::new(&[
            ("CARDIOLOGÍA/CIRCULATORIO", 0.5),
            ("NEUROLOGÍA", 0.5),
        ])))
        .expect("valid model");
        let classification = classifier
            .classify(&text_of(&["dolor", "cabeza"]))
            .expect("classifies");
        assert_eq!(classification.specialty, "CARDIOLOGÍA/CIRCULATORIO");
    }

    #[test]
    fn test_empty_label_set_rejected_at_construction() {
        let result = SpecialtyClassifier::new(Arc::new(FakeModel::new(&[])));
        assert!(matches!(result, Err(TriageError::EmptyLabelSet)));
    }

    #[test]
    fn test_confidence_is_clamped_into_unit_interval() {
        // A misbehaving model reporting 1.2 must not leak out of range.
        let classifier =
            SpecialtyClassifier::new(Arc::new(FakeModel::new(&[("NEUROLOGÍA", 1.2)])))
                .expect("valid model");
        let classification = classifier
            .classify(&text_of(&["dolor", "cabeza"]))
            .expect("classifies");
        assert_eq!(classification.confidence.value(), 1.0);
    }
}
