//! Clinical text normalization.
//!
//! Turns raw symptom text into the canonical token sequence the specialty
//! classifier was trained on: letters only, lower-cased, lemmatized,
//! stopwords removed. Negation words survive because the lemmatizer is
//! constructed with them exempted from its stopword set: "no presenta
//! fiebre" and "presenta fiebre" must never normalize to the same sequence.
//!
//! The urgency rule matcher does **not** consume this output; it works on
//! raw text (see [`crate::rules`]).

use std::sync::Arc;
use triage_nlp::Lemmatizer;

/// An ordered sequence of lemma tokens produced by [`Normalizer::normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    tokens: Vec<String>,
}

impl NormalizedText {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The space-joined form handed to the classifier.
    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }
}

impl std::fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

/// Text normalizer over an injected tokenizer/lemmatizer capability.
///
/// Deterministic for a fixed lemmatizer; no side effects. Cheap to share
/// behind the engine.
pub struct Normalizer {
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl Normalizer {
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Self { lemmatizer }
    }

    /// Normalizes `raw` into a lemma token sequence.
    ///
    /// Steps: strip every character that is not alphabetic (accented vowels
    /// and ñ are alphabetic) or whitespace, lower-case, tokenize and
    /// lemmatize, drop stopwords and punctuation tokens, drop tokens whose
    /// surface form is a single character, keep source order.
    ///
    /// An empty input is legal and yields an empty sequence; the caller
    /// decides how to react.
    pub fn normalize(&self, raw: &str) -> NormalizedText {
        let cleaned: String = raw
            .chars()
            .map(|c| {
                if c.is_alphabetic() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();
        let lowered = cleaned.to_lowercase();

        let tokens = self
            .lemmatizer
            .tokenize_and_lemmatize(&lowered)
            .into_iter()
            .filter(|t| {
                !t.is_punctuation && !t.is_stopword && t.surface.chars().count() > 1
            })
            .map(|t| t.lemma)
            .collect();

        NormalizedText { tokens }
    }
}
