use crate::app_error::AppError;
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        tracing::error!(error = ?self, "Request failed");

        let status = match &self {
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::InvalidInput(_) | AppError::SignatureMissing | AppError::InvalidSignature => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Provider(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_)
            | AppError::SubscriptionFailed(_)
            | AppError::WebhookFailed(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error_resp(status, self.public_message())
    }
}

fn error_resp(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
