pub mod subscription;
pub mod webhook;

use axum::{Json, Router, response::IntoResponse, routing::get};

use crate::adapters::http::app_state::AppState;

pub fn router(app_state: AppState) -> Router<AppState> {
    Router::new()
        .merge(subscription::router(app_state))
        .merge(webhook::router())
        .route("/health", get(health))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
