use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::payment_provider::{CreateSubscriptionRequest, PaymentProviderTrait},
};

/// Billing cycles requested when the configuration does not say otherwise.
pub const DEFAULT_TOTAL_COUNT: u32 = 12;

pub const MISSING_IDS_MESSAGE: &str = "User ID and Plan ID are required";

#[derive(Clone)]
pub struct SubscriptionUseCases {
    provider: Arc<dyn PaymentProviderTrait>,
    total_count: u32,
}

impl SubscriptionUseCases {
    pub fn new(provider: Arc<dyn PaymentProviderTrait>, total_count: u32) -> Self {
        Self {
            provider,
            total_count,
        }
    }

    /// Ask the provider for a recurring subscription tagged with `user_id`.
    ///
    /// Both identifiers must be non-blank; otherwise the provider is never
    /// contacted. Provider failures are not retried.
    #[instrument(skip(self))]
    pub async fn create_subscription(&self, user_id: &str, plan_id: &str) -> AppResult<JsonValue> {
        let user_id = user_id.trim();
        let plan_id = plan_id.trim();
        if user_id.is_empty() || plan_id.is_empty() {
            return Err(AppError::InvalidInput(MISSING_IDS_MESSAGE.into()));
        }

        let request = CreateSubscriptionRequest::for_subscriber(user_id, plan_id, self.total_count);

        match self.provider.create_subscription(&request).await {
            Ok(subscription) => {
                tracing::info!(
                    user_id,
                    plan_id,
                    subscription_id = subscription["id"].as_str().unwrap_or("unknown"),
                    "Subscription created"
                );
                Ok(subscription)
            }
            Err(e) => {
                tracing::error!(error = %e, user_id, plan_id, "Subscription creation failed");
                Err(AppError::SubscriptionFailed(e.to_string()))
            }
        }
    }
}
