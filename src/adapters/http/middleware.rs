use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::{adapters::http::app_state::AppState, app_error::AppError};

/// Largest body the rate limiter buffers to read the subscriber id.
const MAX_BUFFERED_BODY: usize = 64 * 1024;

pub async fn rate_limit_middleware(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let connect_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    // Only trust forwarded headers if explicitly configured (when behind a reverse proxy)
    let ip = if app_state.config.trust_proxy {
        forwarded_ip(&request).or(connect_ip.clone())
    } else {
        connect_ip.clone()
    }
    .unwrap_or_else(|| "unknown".to_string());

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_BUFFERED_BODY)
        .await
        .map_err(|_| AppError::InvalidInput("Request body too large".into()))?;
    let user_id = subscriber_from_body(&bytes);

    tracing::debug!(
        trust_proxy = app_state.config.trust_proxy,
        connect_ip = ?connect_ip,
        using_ip = %ip,
        user_id = ?user_id,
        "Rate limiting request"
    );

    app_state
        .rate_limiter
        .check(&ip, user_id.as_deref())
        .await
        .map_err(|e| {
            if e.is_client_error() {
                return e;
            }
            tracing::error!(error = %e, "Rate limiter unavailable");
            AppError::SubscriptionFailed(e.to_string())
        })?;

    // Hand the buffered body on to the handler.
    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}

fn subscriber_from_body(bytes: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
    value["userId"]
        .as_str()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
}

fn forwarded_ip(req: &Request) -> Option<String> {
    // Extract IP from X-Forwarded-For or X-Real-IP headers
    if let Some(forwarded) = req.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
        && let Some(first) = val.split(',').next()
    {
        let trimmed = first.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    if let Some(real) = req.headers().get("x-real-ip")
        && let Ok(val) = real.to_str()
        && !val.trim().is_empty()
    {
        return Some(val.trim().to_string());
    }
    None
}
