use std::sync::Arc;

use crate::{
    infra::{RateLimiterTrait, config::AppConfig},
    use_cases::{subscription::SubscriptionUseCases, webhook::WebhookUseCases},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub subscription_use_cases: Arc<SubscriptionUseCases>,
    pub webhook_use_cases: Arc<WebhookUseCases>,
    pub rate_limiter: Arc<dyn RateLimiterTrait>,
}
