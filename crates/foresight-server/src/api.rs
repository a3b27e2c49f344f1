//! HTTP handlers for the generation API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use foresight_core::bundle::GenerateInput;
use foresight_core::error::Result;
use serde_json::{json, Value};
use tokio::time::Duration;
use tracing::error;

use crate::registry::{RunRecord, RunRegistry};
use crate::schema::SchemaValidators;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Run records and deferred completion.
    pub registry: RunRegistry,

    /// Compiled input/output schema validators.
    pub validators: Arc<SchemaValidators>,
}

impl AppState {
    /// Build state with the given deferred-completion delay.
    pub fn new(completion_delay: Duration) -> Result<Self> {
        Ok(Self {
            registry: RunRegistry::new(completion_delay),
            validators: Arc::new(SchemaValidators::new()?),
        })
    }
}

/// Health check.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /v1/generate` — validate and accept a generation request.
///
/// Returns 202 with a run id; validation failures return 400 with every
/// violation listed.
pub async fn generate(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Err(details) = state.validators.validate_input(&payload) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_input", "details": details })),
        );
    }

    let input: GenerateInput = match serde_json::from_value(payload) {
        Ok(input) => input,
        Err(err) => {
            // Should be unreachable behind the schema gate.
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid_input", "details": [err.to_string()] })),
            );
        }
    };

    let run_id = state.registry.submit(input).await;
    (StatusCode::ACCEPTED, Json(json!({ "run_id": run_id })))
}

/// `GET /v1/runs/:id` — poll a run by id.
///
/// The stored result is re-validated against the output schema before it is
/// returned, so producer/schema drift surfaces as a 500 instead of leaking
/// invalid data to the poller.
pub async fn get_run(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    match state.registry.poll(&id).await {
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found" })),
        ),
        Some(RunRecord::Processing { .. }) => (
            StatusCode::ACCEPTED,
            Json(json!({ "status": "processing" })),
        ),
        Some(RunRecord::Ready { result, .. }) => {
            let value = match serde_json::to_value(&result) {
                Ok(value) => value,
                Err(err) => {
                    error!(run_id = %id, "stored result failed to serialize: {err}");
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "invalid_artifacts" })),
                    );
                }
            };
            if let Err(details) = state.validators.validate_output(&value) {
                error!(
                    run_id = %id,
                    violations = details.len(),
                    "stored artifacts failed output validation"
                );
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "invalid_artifacts" })),
                );
            }
            (StatusCode::OK, Json(value))
        }
    }
}
