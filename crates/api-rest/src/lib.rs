//! # API REST
//!
//! REST surface for the triage decision engine.
//!
//! Handles:
//! - HTTP endpoints with axum (`/health`, `/triage`)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns: JSON bodies, CORS, request correlation ids,
//!   confidence-tier labels, disclaimers and timestamps
//!
//! All decision logic lives in `triage-core`; handlers here only call the
//! engine and render its records. The router is exposed so the workspace
//! runner binary and the standalone dev binary serve identical APIs.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use triage_core::{TriageAssessment, TriageEngine, TriageError};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Disclaimer attached to every assessment response.
pub const DISCLAIMER: &str = "Este sistema es solo orientativo y NO reemplaza la consulta \
    médica profesional. En caso de emergencia real, llame al 911 o acuda a urgencias.";

/// Application state shared across REST API handlers.
///
/// The engine is constructed once at startup and shared read-only; handlers
/// never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<TriageEngine>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, triage),
    components(schemas(
        HealthRes,
        TriageReq,
        TriageRes,
        AdviceRes,
        InsufficientInputRes,
    ))
)]
pub struct ApiDoc;

/// Health check response.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Triage request body.
#[derive(Debug, serde::Deserialize, utoipa::ToSchema)]
pub struct TriageReq {
    /// Free-text symptom description (Spanish).
    pub symptoms: String,
}

/// Per-specialty guidance block.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct AdviceRes {
    pub urgency_hint: String,
    pub advice: String,
    pub measures: Vec<String>,
}

/// A completed triage assessment.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct TriageRes {
    pub request_id: String,
    pub specialty: String,
    pub confidence: f64,
    /// Caller-facing confidence band: "alta", "media" or "baja".
    pub confidence_tier: String,
    pub urgency_level: u8,
    pub urgency_name: String,
    pub target_wait: String,
    pub colour: String,
    pub facility_tier: String,
    pub facility: String,
    pub action: String,
    pub message: String,
    pub advice: AdviceRes,
    pub normalized_text: String,
    pub assessed_at: String,
    pub disclaimer: String,
}

impl TriageRes {
    fn from_assessment(assessment: TriageAssessment, request_id: uuid::Uuid) -> Self {
        Self {
            request_id: request_id.to_string(),
            confidence: assessment.confidence.value(),
            confidence_tier: assessment.confidence.tier().label().to_string(),
            specialty: assessment.specialty,
            urgency_level: assessment.urgency_level.as_u8(),
            urgency_name: assessment.urgency_name,
            target_wait: assessment.target_wait,
            colour: assessment.colour,
            facility_tier: assessment.facility_tier.label().to_string(),
            facility: assessment.facility,
            action: assessment.action,
            message: assessment.message,
            advice: AdviceRes {
                urgency_hint: assessment.advice.urgency_hint,
                advice: assessment.advice.advice,
                measures: assessment.advice.measures,
            },
            normalized_text: assessment.normalized_text,
            assessed_at: chrono::Utc::now().to_rfc3339(),
            disclaimer: DISCLAIMER.to_string(),
        }
    }
}

/// Returned with 422 when the description is too short to classify.
///
/// Urgency matching works on raw text and never fails, so the urgency that
/// was still resolved is included alongside the prompt for more detail.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct InsufficientInputRes {
    pub request_id: String,
    pub prompt: String,
    pub urgency_level: u8,
    pub urgency_name: String,
    pub target_wait: String,
}

/// Builds the REST router over the shared engine state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/triage", post(triage))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the triage service. Used for
/// monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Triage REST API is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/triage",
    request_body = TriageReq,
    responses(
        (status = 200, description = "Completed triage assessment", body = TriageRes),
        (status = 422, description = "Symptom description too short to classify", body = InsufficientInputRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Assess a free-text symptom description
///
/// Runs the full triage pipeline: specialty prediction, Manchester-style
/// urgency matching and referral derivation. When the description is too
/// short to classify, a 422 is returned that still carries the urgency
/// resolved from the raw text plus a prompt for more detail.
#[axum::debug_handler]
async fn triage(State(state): State<AppState>, Json(req): Json<TriageReq>) -> Response {
    let request_id = uuid::Uuid::new_v4();

    match state.engine.assess(&req.symptoms) {
        Ok(assessment) => Json(TriageRes::from_assessment(assessment, request_id)).into_response(),
        Err(err @ TriageError::InsufficientInput { .. }) => {
            tracing::info!(request_id = %request_id, "triage rejected: {}", err);
            let urgency = state.engine.match_urgency(&req.symptoms);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(InsufficientInputRes {
                    request_id: request_id.to_string(),
                    prompt: "No se pudo interpretar la descripción. Por favor, describa \
                             los síntomas con más detalle."
                        .to_string(),
                    urgency_level: urgency.level.as_u8(),
                    urgency_name: urgency.name.clone(),
                    target_wait: urgency.target_wait.clone(),
                }),
            )
                .into_response()
        }
        Err(err) => {
            // The engine has no other per-request error kinds; anything else
            // indicates a broken deployment.
            tracing::error!(request_id = %request_id, "triage error: {:?}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}
