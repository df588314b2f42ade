//! HTTP handlers: health probe, the `/bfhl` dispatcher, and the not-found
//! fallback. Every response, success or failure, goes out as the envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::{Envelope, Operation};
use crate::services::math;
use crate::startup::AppState;

/// Liveness probe. Not part of the dispatch contract.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "is_success": true,
            "official_email": state.config.official_email,
        })),
    )
}

/// `POST /bfhl`: select the single operation in the body, run it, and wrap
/// the outcome. Kernel and adapter failures are converted here; nothing
/// escapes to the transport layer uncaught.
pub async fn dispatch_bfhl(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let result = match body {
        Ok(Json(value)) => run_operation(&state, &value).await,
        // Unparseable or non-JSON bodies get the envelope, not axum's
        // default rejection response.
        Err(_) => Err(AppError::BadRequest("Invalid request body".to_string())),
    };

    let email = &state.config.official_email;
    match result {
        Ok(data) => (StatusCode::OK, Json(Envelope::success(email, data))),
        Err(err) => {
            tracing::warn!(status = %err.status_code(), error = %err, "bfhl request failed");
            (
                err.status_code(),
                Json(Envelope::failure(email, err.public_message())),
            )
        }
    }
}

async fn run_operation(state: &AppState, body: &Value) -> Result<Value, AppError> {
    match Operation::from_body(body)? {
        Operation::Fibonacci(n) => Ok(json!(math::fibonacci(n)?)),
        Operation::Prime(values) => Ok(json!(math::filter_primes(&values))),
        Operation::Lcm(values) => Ok(json!(math::lcm(&values)?)),
        Operation::Hcf(values) => Ok(json!(math::hcf(&values)?)),
        Operation::Ai(question) => Ok(json!(state.oracle.ask(&question).await?)),
    }
}

/// Fallback for unmatched routes and methods.
pub async fn not_found(State(state): State<AppState>) -> impl IntoResponse {
    let err = AppError::NotFound("Endpoint not found".to_string());
    (
        err.status_code(),
        Json(Envelope::failure(
            &state.config.official_email,
            err.public_message(),
        )),
    )
}
