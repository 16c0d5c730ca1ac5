use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    middleware,
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;

use crate::{
    adapters::http::{app_state::AppState, middleware::rate_limit_middleware},
    app_error::{AppError, AppResult},
    use_cases::subscription::MISSING_IDS_MESSAGE,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSubscriptionPayload {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    plan_id: Option<String>,
}

pub fn router(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/create-subscription", post(create_subscription))
        .route_layer(middleware::from_fn_with_state(
            app_state,
            rate_limit_middleware,
        ))
}

/// POST /create-subscription
async fn create_subscription(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateSubscriptionPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable create-subscription body");
        AppError::InvalidInput(MISSING_IDS_MESSAGE.into())
    })?;

    let subscription = app_state
        .subscription_use_cases
        .create_subscription(
            payload.user_id.as_deref().unwrap_or_default(),
            payload.plan_id.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(subscription))
}
