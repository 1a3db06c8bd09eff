//! Linear bag-of-features specialty classifier.
//!
//! The artifact is the JSON export of a linear text classifier trained
//! offline on tf-idf features over unigrams and bigrams:
//!
//! ```json
//! {
//!   "labels": ["CARDIOLOGÍA/CIRCULATORIO", "DERMATOLOGÍA"],
//!   "vocabulary": { "dolor": 0, "dolor pecho": 1, "mancha": 2 },
//!   "idf": [1.2, 3.4, 2.8],
//!   "weights": [[0.5, 1.9, -0.3], [-0.2, -1.1, 2.4]],
//!   "intercepts": [0.1, -0.1]
//! }
//! ```
//!
//! Scoring: term-frequency counts for vocabulary entries found in the input,
//! scaled by idf, L2-normalized, then one decision score per label
//! (`w · x + b`) squashed through a softmax. Tokens outside the vocabulary
//! contribute nothing; an input with no known features scores on the
//! intercepts alone.

use crate::{ModelError, ModelResult, SpecialtyModel};
use std::collections::HashMap;
use std::path::Path;

/// On-disk shape of the model artifact.
#[derive(Debug, serde::Deserialize)]
struct ModelArtifact {
    labels: Vec<String>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

/// A [`SpecialtyModel`] evaluating a linear classifier artifact.
#[derive(Debug)]
pub struct LinearSpecialtyModel {
    labels: Vec<String>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearSpecialtyModel {
    /// Loads and validates the JSON model artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ArtifactRead`] / [`ModelError::ArtifactParse`]
    /// for I/O and JSON failures, [`ModelError::EmptyLabelSet`] if no labels
    /// are declared, and [`ModelError::ShapeMismatch`] if the vocabulary,
    /// idf vector, weight matrix and intercepts do not agree.
    pub fn from_artifact(path: &Path) -> ModelResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(ModelError::ArtifactRead)?;
        let artifact: ModelArtifact =
            serde_json::from_str(&contents).map_err(ModelError::ArtifactParse)?;

        let model = Self::from_parts(
            artifact.labels,
            artifact.vocabulary,
            artifact.idf,
            artifact.weights,
            artifact.intercepts,
        )?;

        tracing::info!(
            labels = model.labels.len(),
            features = model.idf.len(),
            "loaded specialty model artifact from {}",
            path.display()
        );

        Ok(model)
    }

    /// Builds a model from already-parsed parts, validating consistency.
    pub fn from_parts(
        labels: Vec<String>,
        vocabulary: HashMap<String, usize>,
        idf: Vec<f64>,
        weights: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    ) -> ModelResult<Self> {
        if labels.is_empty() {
            return Err(ModelError::EmptyLabelSet);
        }

        let features = idf.len();
        if vocabulary.len() != features {
            return Err(ModelError::ShapeMismatch(format!(
                "vocabulary has {} entries but idf has {}",
                vocabulary.len(),
                features
            )));
        }
        if let Some((term, &index)) = vocabulary.iter().find(|(_, &i)| i >= features) {
            return Err(ModelError::ShapeMismatch(format!(
                "vocabulary entry '{}' points at feature {} but only {} features exist",
                term, index, features
            )));
        }
        if weights.len() != labels.len() {
            return Err(ModelError::ShapeMismatch(format!(
                "{} labels but {} weight rows",
                labels.len(),
                weights.len()
            )));
        }
        if let Some(row) = weights.iter().find(|row| row.len() != features) {
            return Err(ModelError::ShapeMismatch(format!(
                "weight row has {} columns but {} features exist",
                row.len(),
                features
            )));
        }
        if intercepts.len() != labels.len() {
            return Err(ModelError::ShapeMismatch(format!(
                "{} labels but {} intercepts",
                labels.len(),
                intercepts.len()
            )));
        }

        Ok(Self {
            labels,
            vocabulary,
            idf,
            weights,
            intercepts,
        })
    }

    /// Tf-idf feature vector for `text`, L2-normalized.
    ///
    /// Features are whitespace unigrams plus adjacent-pair bigrams, matching
    /// the vectorizer configuration the artifact was trained with.
    fn featurize(&self, text: &str) -> Vec<f64> {
        let mut features = vec![0.0; self.idf.len()];
        let tokens: Vec<&str> = text.split_whitespace().collect();

        for token in &tokens {
            if let Some(&index) = self.vocabulary.get(*token) {
                features[index] += 1.0;
            }
        }
        for pair in tokens.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            if let Some(&index) = self.vocabulary.get(&bigram) {
                features[index] += 1.0;
            }
        }

        for (value, idf) in features.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }

        features
    }
}

impl SpecialtyModel for LinearSpecialtyModel {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn predict_distribution(&self, text: &str) -> Vec<f64> {
        let features = self.featurize(text);

        let scores: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.intercepts)
            .map(|(row, intercept)| {
                row.iter()
                    .zip(&features)
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
                    + intercept
            })
            .collect();

        // Softmax with max subtraction for numerical stability.
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let sum: f64 = exps.iter().sum();
        exps.into_iter().map(|e| e / sum).collect()
    }
}
