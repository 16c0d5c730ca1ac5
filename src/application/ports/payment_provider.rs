use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::{app_error::AppResult, domain::entities::webhook_event::SUBSCRIBER_NOTE_KEY};

// ============================================================================
// Port Types
// ============================================================================

/// Recurring-subscription request sent to the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSubscriptionRequest {
    pub plan_id: String,
    pub total_count: u32,
    pub quantity: u32,
    pub notes: BTreeMap<String, String>,
}

impl CreateSubscriptionRequest {
    /// Build a request for a single seat, tagged with the subscriber so that
    /// later billing notifications can be correlated back to them.
    pub fn for_subscriber(subscriber_id: &str, plan_id: &str, total_count: u32) -> Self {
        let mut notes = BTreeMap::new();
        notes.insert(SUBSCRIBER_NOTE_KEY.to_string(), subscriber_id.to_string());
        Self {
            plan_id: plan_id.to_string(),
            total_count,
            quantity: 1,
            notes,
        }
    }

    pub fn subscriber_id(&self) -> Option<&str> {
        self.notes.get(SUBSCRIBER_NOTE_KEY).map(String::as_str)
    }
}

// ============================================================================
// Port Trait
// ============================================================================

#[async_trait]
pub trait PaymentProviderTrait: Send + Sync {
    /// Create a recurring subscription. The provider's representation is
    /// returned untouched.
    async fn create_subscription(&self, request: &CreateSubscriptionRequest)
    -> AppResult<JsonValue>;
}
