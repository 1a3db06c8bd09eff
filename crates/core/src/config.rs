//! Startup configuration for the triage engine.
//!
//! Artifact locations are resolved once at process startup and then passed
//! into the loaders. To keep behaviour consistent across runtimes and test
//! harnesses, the resolution functions take environment *values* rather than
//! reading process-wide environment variables themselves.

use std::path::{Path, PathBuf};

/// Default location of the Spanish lexicon artifact.
pub const DEFAULT_LEXICON_PATH: &str = "models/lexicon_es.json";
/// Default location of the linear specialty model artifact.
pub const DEFAULT_MODEL_PATH: &str = "models/triage_linear.json";

/// Locations of the artifacts the engine is built from.
///
/// The rule table path is optional; without it the built-in Manchester table
/// is used.
#[derive(Clone, Debug)]
pub struct ArtifactPaths {
    lexicon: PathBuf,
    model: PathBuf,
    rules: Option<PathBuf>,
}

impl ArtifactPaths {
    /// Resolves artifact paths from optional environment values
    /// (`TRIAGE_LEXICON_PATH`, `TRIAGE_MODEL_PATH`, `TRIAGE_RULES_PATH`).
    ///
    /// Empty or whitespace-only values fall back to the defaults; an absent
    /// rules value means the built-in rule table.
    pub fn from_env_values(
        lexicon: Option<String>,
        model: Option<String>,
        rules: Option<String>,
    ) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            lexicon: non_empty(lexicon)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LEXICON_PATH)),
            model: non_empty(model)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),
            rules: non_empty(rules).map(PathBuf::from),
        }
    }

    pub fn lexicon(&self) -> &Path {
        &self.lexicon
    }

    pub fn model(&self) -> &Path {
        &self.model
    }

    pub fn rules(&self) -> Option<&Path> {
        self.rules.as_deref()
    }
}
