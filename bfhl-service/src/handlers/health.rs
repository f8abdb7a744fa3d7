use crate::models::BfhlResponse;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// Liveness probe. Has no dependencies, so it always succeeds.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<BfhlResponse>) {
    (
        StatusCode::OK,
        Json(BfhlResponse::ok(state.config.official_email.as_str())),
    )
}
