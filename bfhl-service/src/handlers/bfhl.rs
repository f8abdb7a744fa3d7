use crate::error::BfhlError;
use crate::models::{BfhlRequest, BfhlResponse};
use crate::services::dispatch;
use crate::services::metrics::record_operation;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

/// `POST /bfhl`: run the single operation named by the body's only key.
///
/// Every failure, including a body axum cannot parse, is answered with the
/// same `{is_success: false, official_email}` shape; the cause is only
/// logged.
pub async fn bfhl_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<BfhlResponse>) {
    let email = state.config.official_email.as_str();

    let request = payload
        .map_err(|rejection| BfhlError::invalid(rejection.body_text()))
        .and_then(|Json(body)| BfhlRequest::from_value(body));

    let operation = request
        .as_ref()
        .map(|r| r.operation().key())
        .unwrap_or("unknown");

    let result = match request {
        Ok(request) => dispatch(request, state.text_provider.as_ref()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(data) => {
            record_operation(operation, "success");
            tracing::info!(operation, "bfhl request succeeded");
            (StatusCode::OK, Json(BfhlResponse::success(email, data)))
        }
        Err(e) => {
            record_operation(operation, e.kind());
            let status = e.status_code();
            if status.is_server_error() {
                tracing::error!(operation, error = %e, "bfhl request failed");
            } else {
                tracing::warn!(operation, error = %e, "bfhl request rejected");
            }
            (status, Json(BfhlResponse::failure(email)))
        }
    }
}
