//! The assembled triage pipeline.
//!
//! [`TriageEngine`] owns the normalizer, classifier adapter and rule table,
//! all constructed once at startup from injected capabilities. Each call to
//! [`TriageEngine::assess`] evaluates the full pipeline for one request and
//! returns an immutable [`TriageAssessment`]; nothing is persisted and no
//! state crosses requests, so one engine can be shared read-only across
//! concurrent requests.

use crate::advice::{advice_for, SpecialtyAdvice};
use crate::classify::SpecialtyClassifier;
use crate::derivation::{derive, FacilityTier};
use crate::error::TriageResult;
use crate::normalize::Normalizer;
use crate::rules::{RuleTable, UrgencyRule};
use std::sync::Arc;
use triage_model::SpecialtyModel;
use triage_nlp::Lemmatizer;
use triage_types::{Confidence, UrgencyLevel};

/// The final composed recommendation record.
///
/// One instance per request: constructed, returned, discarded.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TriageAssessment {
    /// Predicted specialty, a member of the model's closed label set.
    pub specialty: String,
    /// Posterior probability of the predicted specialty.
    pub confidence: Confidence,
    pub urgency_level: UrgencyLevel,
    pub urgency_name: String,
    pub target_wait: String,
    /// Presentation colour of the urgency level.
    pub colour: String,
    pub facility_tier: FacilityTier,
    pub facility: String,
    pub action: String,
    pub message: String,
    pub advice: SpecialtyAdvice,
    /// The normalized form the classifier saw, for transparency.
    pub normalized_text: String,
}

/// The triage decision engine.
pub struct TriageEngine {
    normalizer: Normalizer,
    classifier: SpecialtyClassifier,
    rules: RuleTable,
}

impl TriageEngine {
    /// Builds an engine from its injected collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TriageError::EmptyLabelSet`] if the model declares no
    /// labels.
    pub fn new(
        lemmatizer: Arc<dyn Lemmatizer>,
        model: Arc<dyn SpecialtyModel>,
        rules: RuleTable,
    ) -> TriageResult<Self> {
        Ok(Self {
            normalizer: Normalizer::new(lemmatizer),
            classifier: SpecialtyClassifier::new(model)?,
            rules,
        })
    }

    /// Runs the full pipeline for one symptom description.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TriageError::InsufficientInput`] when the normalized
    /// text is too short to classify. Urgency matching has already succeeded
    /// at that point; use [`TriageEngine::match_urgency`] to surface it
    /// alongside the prompt for more detail.
    pub fn assess(&self, raw_text: &str) -> TriageResult<TriageAssessment> {
        let urgency = self.rules.match_urgency(raw_text);
        let normalized = self.normalizer.normalize(raw_text);
        let classification = self.classifier.classify(&normalized)?;
        let referral = derive(urgency.level, &classification.specialty);
        let advice = advice_for(&classification.specialty);

        tracing::debug!(
            level = urgency.level.as_u8(),
            specialty = %classification.specialty,
            confidence = classification.confidence.value(),
            "assessed symptom description"
        );

        Ok(TriageAssessment {
            specialty: classification.specialty,
            confidence: classification.confidence,
            urgency_level: urgency.level,
            urgency_name: urgency.name.clone(),
            target_wait: urgency.target_wait.clone(),
            colour: urgency.colour.clone(),
            facility_tier: referral.tier,
            facility: referral.facility,
            action: referral.action,
            message: referral.message,
            advice,
            normalized_text: normalized.joined(),
        })
    }

    /// Urgency matching alone. Total: never fails, even on empty input.
    pub fn match_urgency(&self, raw_text: &str) -> &UrgencyRule {
        self.rules.match_urgency(raw_text)
    }

    /// The rule table the engine was built with.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }
}
