//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST server
//! (with OpenAPI/Swagger UI). The workspace's main `triage-run` binary is the
//! production entry point.

use api_rest::{router, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use triage_core::{ArtifactPaths, RuleTable, TriageEngine};
use triage_model::LinearSpecialtyModel;
use triage_nlp::{LexiconLemmatizer, DEFAULT_NEGATION_EXCEPTIONS};

/// Main entry point for the standalone triage REST API server.
///
/// # Environment Variables
/// - `TRIAGE_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `TRIAGE_LEXICON_PATH`: Spanish lexicon artifact (default: "models/lexicon_es.json")
/// - `TRIAGE_MODEL_PATH`: Specialty model artifact (default: "models/triage_linear.json")
/// - `TRIAGE_RULES_PATH`: Optional YAML rule-table override
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - an artifact is missing or corrupt (the process must not serve requests),
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("TRIAGE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting triage REST API on {}", addr);

    let paths = ArtifactPaths::from_env_values(
        std::env::var("TRIAGE_LEXICON_PATH").ok(),
        std::env::var("TRIAGE_MODEL_PATH").ok(),
        std::env::var("TRIAGE_RULES_PATH").ok(),
    );

    let lemmatizer =
        LexiconLemmatizer::from_artifact(paths.lexicon(), DEFAULT_NEGATION_EXCEPTIONS)?;
    let model = LinearSpecialtyModel::from_artifact(paths.model())?;
    let rules = match paths.rules() {
        Some(path) => RuleTable::from_yaml_file(path)?,
        None => RuleTable::builtin(),
    };

    let engine = TriageEngine::new(Arc::new(lemmatizer), Arc::new(model), rules)?;

    let app = router(AppState {
        engine: Arc::new(engine),
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
