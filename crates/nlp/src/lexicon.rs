//! Lexicon-backed lemmatizer implementation.
//!
//! The lexicon artifact is a JSON document produced offline alongside the
//! classifier model:
//!
//! ```json
//! {
//!   "lemmas": { "duele": "doler", "dolores": "dolor" },
//!   "stopwords": ["el", "la", "de", "no", "sin"]
//! }
//! ```
//!
//! All entries are folded to lowercase at load time so lookups match the
//! lower-cased text the normalizer feeds in. Surface forms absent from the
//! lemma table pass through unchanged.

use crate::{Lemmatizer, NlpError, NlpResult, Token};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// On-disk shape of the lexicon artifact.
#[derive(Debug, serde::Deserialize)]
struct LexiconArtifact {
    lemmas: HashMap<String, String>,
    #[serde(default)]
    stopwords: Vec<String>,
}

/// A [`Lemmatizer`] backed by an in-memory lexicon.
///
/// Immutable once constructed; the negation-exception set is applied to the
/// stopword list in the constructor, never afterwards.
#[derive(Debug)]
pub struct LexiconLemmatizer {
    lemmas: HashMap<String, String>,
    stopwords: HashSet<String>,
}

impl LexiconLemmatizer {
    /// Builds a lemmatizer from in-memory tables.
    ///
    /// Lemma keys, lemma values and stopwords are folded to lowercase. Every
    /// word in `negation_exceptions` is removed from the stopword set.
    ///
    /// # Errors
    ///
    /// Returns [`NlpError::EmptyLexicon`] if `lemmas` is empty.
    pub fn new(
        lemmas: HashMap<String, String>,
        stopwords: impl IntoIterator<Item = String>,
        negation_exceptions: &[&str],
    ) -> NlpResult<Self> {
        if lemmas.is_empty() {
            return Err(NlpError::EmptyLexicon);
        }

        let lemmas = lemmas
            .into_iter()
            .map(|(surface, lemma)| (surface.to_lowercase(), lemma.to_lowercase()))
            .collect();

        let exceptions: HashSet<String> = negation_exceptions
            .iter()
            .map(|w| w.to_lowercase())
            .collect();

        let stopwords = stopwords
            .into_iter()
            .map(|w| w.to_lowercase())
            .filter(|w| !exceptions.contains(w))
            .collect();

        Ok(Self { lemmas, stopwords })
    }

    /// Loads the JSON lexicon artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`NlpError::ArtifactRead`] if the file cannot be read,
    /// [`NlpError::ArtifactParse`] if it is not valid JSON of the expected
    /// shape, or [`NlpError::EmptyLexicon`] if it holds no lemma entries.
    pub fn from_artifact(path: &Path, negation_exceptions: &[&str]) -> NlpResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(NlpError::ArtifactRead)?;
        let artifact: LexiconArtifact =
            serde_json::from_str(&contents).map_err(NlpError::ArtifactParse)?;

        let lemmatizer =
            Self::new(artifact.lemmas, artifact.stopwords, negation_exceptions)?;

        tracing::info!(
            lemmas = lemmatizer.lemmas.len(),
            stopwords = lemmatizer.stopwords.len(),
            "loaded lexicon artifact from {}",
            path.display()
        );

        Ok(lemmatizer)
    }

    /// Number of lemma entries.
    pub fn lemma_count(&self) -> usize {
        self.lemmas.len()
    }
}

impl Lemmatizer for LexiconLemmatizer {
    fn tokenize_and_lemmatize(&self, text: &str) -> Vec<Token> {
        text.split_whitespace()
            .map(|surface| {
                let is_punctuation = !surface.chars().any(char::is_alphabetic);
                let lemma = self
                    .lemmas
                    .get(surface)
                    .cloned()
                    .unwrap_or_else(|| surface.to_string());
                Token {
                    surface: surface.to_string(),
                    lemma,
                    is_stopword: self.stopwords.contains(surface),
                    is_punctuation,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_NEGATION_EXCEPTIONS;
    use std::io::Write;

    fn sample() -> LexiconLemmatizer {
        let lemmas = HashMap::from([
            ("duele".to_string(), "doler".to_string()),
            ("dolores".to_string(), "dolor".to_string()),
            ("Tiene".to_string(), "tener".to_string()),
        ]);
        let stopwords = vec![
            "el".to_string(),
            "la".to_string(),
            "de".to_string(),
            "no".to_string(),
            "sin".to_string(),
        ];
        LexiconLemmatizer::new(lemmas, stopwords, DEFAULT_NEGATION_EXCEPTIONS)
            .expect("valid lexicon")
    }

    #[test]
    fn test_negation_words_are_not_stopwords() {
        let lemmatizer = sample();
        let tokens = lemmatizer.tokenize_and_lemmatize("no duele sin fiebre");
        assert!(!tokens[0].is_stopword, "'no' must not be a stopword");
        assert!(!tokens[2].is_stopword, "'sin' must not be a stopword");
    }

    #[test]
    fn test_ordinary_stopwords_are_flagged() {
        let lemmatizer = sample();
        let tokens = lemmatizer.tokenize_and_lemmatize("el dolor de cabeza");
        assert!(tokens[0].is_stopword);
        assert!(!tokens[1].is_stopword);
        assert!(tokens[2].is_stopword);
    }

    #[test]
    fn test_lemma_lookup_with_fallback() {
        let lemmatizer = sample();
        let tokens = lemmatizer.tokenize_and_lemmatize("duele garganta");
        assert_eq!(tokens[0].lemma, "doler");
        // Unknown surface forms pass through unchanged.
        assert_eq!(tokens[1].lemma, "garganta");
    }

    #[test]
    fn test_artifact_entries_folded_to_lowercase() {
        let lemmatizer = sample();
        let tokens = lemmatizer.tokenize_and_lemmatize("tiene dolores");
        assert_eq!(tokens[0].lemma, "tener");
        assert_eq!(tokens[1].lemma, "dolor");
    }

    #[test]
    fn test_punctuation_classification() {
        let lemmatizer = sample();
        let tokens = lemmatizer.tokenize_and_lemmatize("dolor , 38 ñandú");
        assert!(!tokens[0].is_punctuation);
        assert!(tokens[1].is_punctuation);
        assert!(tokens[2].is_punctuation, "digit-only tokens have no alphabetic content");
        assert!(!tokens[3].is_punctuation);
    }

    #[test]
    fn test_preserves_source_order() {
        let lemmatizer = sample();
        let tokens = lemmatizer.tokenize_and_lemmatize("no duele la garganta");
        let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["no", "duele", "la", "garganta"]);
    }

    #[test]
    fn test_empty_lexicon_rejected() {
        let result =
            LexiconLemmatizer::new(HashMap::new(), Vec::new(), DEFAULT_NEGATION_EXCEPTIONS);
        assert!(matches!(result, Err(NlpError::EmptyLexicon)));
    }

    #[test]
    fn test_from_artifact_round_trip() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"lemmas": {{"duele": "doler"}}, "stopwords": ["el", "no"]}}"#
        )
        .expect("write artifact");

        let lemmatizer =
            LexiconLemmatizer::from_artifact(file.path(), DEFAULT_NEGATION_EXCEPTIONS)
                .expect("load artifact");
        assert_eq!(lemmatizer.lemma_count(), 1);

        let tokens = lemmatizer.tokenize_and_lemmatize("no duele el brazo");
        assert!(!tokens[0].is_stopword);
        assert!(tokens[2].is_stopword);
    }

    #[test]
    fn test_from_artifact_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = LexiconLemmatizer::from_artifact(
            &dir.path().join("absent.json"),
            DEFAULT_NEGATION_EXCEPTIONS,
        );
        assert!(matches!(result, Err(NlpError::ArtifactRead(_))));
    }

    #[test]
    fn test_from_artifact_corrupt_json() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json at all").expect("write artifact");

        let result =
            LexiconLemmatizer::from_artifact(file.path(), DEFAULT_NEGATION_EXCEPTIONS);
        assert!(matches!(result, Err(NlpError::ArtifactParse(_))));
    }
}
