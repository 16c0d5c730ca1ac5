//! Razorpay webhook receiver.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    routing::post,
};
use tracing::error;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
};

pub const SIGNATURE_HEADER: &str = "x-razorpay-signature";
pub const EVENT_ID_HEADER: &str = "x-razorpay-event-id";

/// Turns a processing failure into a 500 so Razorpay redelivers the event.
fn webhook_retryable_error(error: AppError, event_id: Option<&str>) -> AppError {
    error!(
        error = %error,
        event_id = event_id.unwrap_or("unknown"),
        retryable = true,
        "Webhook processing failed, returning 500 for provider retry"
    );
    match error {
        AppError::WebhookFailed(_) => error,
        other => AppError::WebhookFailed(other.to_string()),
    }
}

/// POST /webhook
async fn handle_webhook(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
    let event_id = headers.get(EVENT_ID_HEADER).and_then(|v| v.to_str().ok());

    match app_state
        .webhook_use_cases
        .process(&body, signature, event_id)
        .await
    {
        Ok(outcome) => {
            tracing::debug!(?outcome, "Webhook acknowledged");
            Ok(Json(serde_json::json!({ "status": "ok" })))
        }
        Err(e @ (AppError::SignatureMissing | AppError::InvalidSignature)) => Err(e),
        Err(e) => Err(webhook_retryable_error(e, event_id)),
    }
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/webhook", post(handle_webhook))
}
