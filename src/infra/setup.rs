use crate::{
    adapters::http::app_state::AppState,
    infra::{
        RateLimiterTrait, config::AppConfig, postgres_persistence,
        rate_limit::RedisRateLimiter, razorpay_client::RazorpayClient,
        webhook_signature::WebhookVerifier,
    },
    use_cases::{
        subscription::SubscriptionUseCases,
        webhook::{EntitlementRepoTrait, ProcessedEventRepoTrait, WebhookUseCases},
    },
};
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    let postgres_arc = Arc::new(postgres_persistence(&config.database_url).await?);

    let rate_limiter: Arc<dyn RateLimiterTrait> = Arc::new(
        RedisRateLimiter::new(
            &config.redis_url,
            config.rate_limit_window_secs,
            config.rate_limit_per_ip,
            config.rate_limit_per_user,
        )
        .await?,
    );

    let provider = Arc::new(RazorpayClient::new(
        config.razorpay_api_base.clone(),
        config.razorpay_key_id.clone(),
        config.razorpay_key_secret.clone(),
    ));

    let subscription_use_cases =
        SubscriptionUseCases::new(provider, config.subscription_total_count);

    let webhook_use_cases = WebhookUseCases::new(
        postgres_arc.clone() as Arc<dyn EntitlementRepoTrait>,
        postgres_arc.clone() as Arc<dyn ProcessedEventRepoTrait>,
        WebhookVerifier::new(config.razorpay_webhook_secret.clone()),
    );

    Ok(AppState {
        config: Arc::new(config),
        subscription_use_cases: Arc::new(subscription_use_cases),
        webhook_use_cases: Arc::new(webhook_use_cases),
        rate_limiter,
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "creator_billing=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs)
    let file = File::create("app.log").expect("cannot create log file");
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
