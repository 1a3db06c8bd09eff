//! Shared fakes and fixtures for unit tests.

use std::collections::HashMap;
use triage_model::SpecialtyModel;
use triage_nlp::{LexiconLemmatizer, DEFAULT_NEGATION_EXCEPTIONS};

/// A small Spanish lexicon good enough for pipeline tests. Lemma targets are
/// their own lemmas so normalization stays idempotent.
pub(crate) fn spanish_lemmatizer() -> LexiconLemmatizer {
    let lemmas = HashMap::from([
        ("duele".to_string(), "doler".to_string()),
        ("dolores".to_string(), "dolor".to_string()),
        ("tiene".to_string(), "tener".to_string()),
        ("presenta".to_string(), "presentar".to_string()),
        ("siente".to_string(), "sentir".to_string()),
    ]);
    let stopwords = [
        "el", "la", "los", "las", "de", "del", "me", "se", "le", "y", "o", "un", "una",
        "que", "en", "no", "sin", "ni",
    ]
    .into_iter()
    .map(str::to_string);

    LexiconLemmatizer::new(lemmas, stopwords, DEFAULT_NEGATION_EXCEPTIONS)
        .expect("test lexicon is valid")
}

/// A specialty model returning one fixed distribution regardless of input.
pub(crate) struct FakeModel {
    labels: Vec<String>,
    distribution: Vec<f64>,
}

impl FakeModel {
    pub(crate) fn new(entries: &[(&str, f64)]) -> Self {
        Self {
            labels: entries.iter().map(|(l, _)| l.to_string()).collect(),
            distribution: entries.iter().map(|(_, p)| *p).collect(),
        }
    }
}

impl SpecialtyModel for FakeModel {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn predict_distribution(&self, _text: &str) -> Vec<f64> {
        self.distribution.clone()
    }
}
