//! Synchronous scoring API
//!
//! `POST /score` validates field presence and returns an amount-proportional
//! fraud score; `GET /health` reports liveness. The handlers hold no state
//! and never mutate or forward the request.

use crate::error::MissingFieldsError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

/// Divisor mapping amounts onto the [0, 1] score range.
const AMOUNT_DIVISOR: f64 = 1000.0;

/// Keys every score request must carry.
const REQUIRED_FIELDS: [&str; 3] = ["id", "amount", "timestamp"];

/// Successful scoring response.
#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    #[serde(rename = "fraudScore")]
    pub fraud_score: f64,
}

/// Build the API router.
pub fn routes() -> Router {
    Router::new()
        .route("/score", post(score))
        .route("/health", get(health))
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "healthy"}))
}

async fn score(body: Option<Json<Value>>) -> Response {
    // A missing or malformed body is rejected like an empty one.
    let payload = body.map(|Json(value)| value).unwrap_or(Value::Null);

    match score_payload(&payload) {
        Ok(fraud_score) => {
            info!(transaction_id = %payload["id"], fraud_score, "Scored transaction");
            (StatusCode::OK, Json(ScoreResponse { fraud_score })).into_response()
        }
        Err(e) => {
            warn!(payload = %payload, "Rejected score request: {e}");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// Validate a request body and compute its score.
///
/// The body must be a JSON object carrying `id`, `amount`, and `timestamp`,
/// with a numeric `amount`. The score is `amount / 1000` clamped into [0, 1].
pub fn score_payload(payload: &Value) -> Result<f64, MissingFieldsError> {
    let fields = payload.as_object().ok_or(MissingFieldsError)?;
    if !REQUIRED_FIELDS.iter().all(|key| fields.contains_key(*key)) {
        return Err(MissingFieldsError);
    }

    let amount = fields
        .get("amount")
        .and_then(Value::as_f64)
        .ok_or(MissingFieldsError)?;

    Ok((amount / AMOUNT_DIVISOR).clamp(0.0, 1.0))
}
