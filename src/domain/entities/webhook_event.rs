//! Razorpay webhook notifications.
//!
//! Only the fields the receiver acts on are read. Everything else in the
//! payload is kept as raw JSON so unknown event types parse cleanly.

use serde_json::Value as JsonValue;

/// Event name Razorpay sends when a scheduled billing cycle succeeds.
pub const SUBSCRIPTION_CHARGED: &str = "subscription.charged";

/// Notes key carrying the subscriber identifier through the provider.
pub const SUBSCRIBER_NOTE_KEY: &str = "firebase_user_id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventKind {
    SubscriptionCharged,
    Other(String),
}

impl WebhookEventKind {
    pub fn as_str(&self) -> &str {
        match self {
            WebhookEventKind::SubscriptionCharged => SUBSCRIPTION_CHARGED,
            WebhookEventKind::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RazorpayWebhookEvent {
    raw: JsonValue,
}

impl RazorpayWebhookEvent {
    /// Parse a verified request body. Any valid JSON document is accepted;
    /// a body without an `event` string is treated as an unknown event type.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: JsonValue = serde_json::from_slice(body)?;
        Ok(Self { raw })
    }

    pub fn kind(&self) -> WebhookEventKind {
        match self.raw["event"].as_str().unwrap_or_default() {
            SUBSCRIPTION_CHARGED => WebhookEventKind::SubscriptionCharged,
            other => WebhookEventKind::Other(other.to_string()),
        }
    }

    fn subscription_entity(&self) -> &JsonValue {
        &self.raw["payload"]["subscription"]["entity"]
    }

    /// Subscriber identifier from the subscription notes, if present and non-empty.
    pub fn subscriber_id(&self) -> Option<&str> {
        self.subscription_entity()["notes"][SUBSCRIBER_NOTE_KEY]
            .as_str()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn subscription_id(&self) -> Option<&str> {
        self.subscription_entity()["id"].as_str()
    }
}
