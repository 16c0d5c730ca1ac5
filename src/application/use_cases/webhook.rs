use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::{
        entitlement::{Entitlement, next_expiry},
        webhook_event::{RazorpayWebhookEvent, WebhookEventKind},
    },
    infra::webhook_signature::WebhookVerifier,
};

// ============================================================================
// Repository Traits
// ============================================================================

#[async_trait]
pub trait EntitlementRepoTrait: Send + Sync {
    /// All records whose subscriber field equals `user_id`.
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Vec<Entitlement>>;

    /// Set status to active and expiry to `expires_at` for one record.
    async fn activate_until(&self, id: Uuid, expires_at: DateTime<Utc>) -> AppResult<()>;
}

#[async_trait]
pub trait ProcessedEventRepoTrait: Send + Sync {
    async fn is_processed(&self, event_id: &str) -> AppResult<bool>;

    async fn mark_processed(&self, event_id: &str, event_type: &str) -> AppResult<()>;
}

// ============================================================================
// Outcome
// ============================================================================

/// What the receiver did with a verified notification. Every variant is
/// acknowledged with 200.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookOutcome {
    /// Event id was already handled by an earlier delivery.
    Duplicate,
    /// Event type this service does not act on.
    Ignored,
    /// Charged event without a subscriber in the notes.
    SubscriberMissing,
    NoMatch,
    /// More than one record carries the subscriber id; nothing was touched.
    Ambiguous { matches: usize },
    Extended {
        entitlement_id: Uuid,
        expires_at: DateTime<Utc>,
    },
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct WebhookUseCases {
    entitlement_repo: Arc<dyn EntitlementRepoTrait>,
    processed_event_repo: Arc<dyn ProcessedEventRepoTrait>,
    verifier: WebhookVerifier,
}

impl WebhookUseCases {
    pub fn new(
        entitlement_repo: Arc<dyn EntitlementRepoTrait>,
        processed_event_repo: Arc<dyn ProcessedEventRepoTrait>,
        verifier: WebhookVerifier,
    ) -> Self {
        Self {
            entitlement_repo,
            processed_event_repo,
            verifier,
        }
    }

    /// Authenticate and apply one provider notification.
    ///
    /// `event_id` is the provider's delivery id; when absent, the SHA-256 of
    /// the body stands in for it. The event is recorded as processed only
    /// after it was applied, so a failed attempt stays retryable.
    #[instrument(skip(self, body, signature))]
    pub async fn process(
        &self,
        body: &[u8],
        signature: Option<&str>,
        event_id: Option<&str>,
    ) -> AppResult<WebhookOutcome> {
        let signature = signature.ok_or(AppError::SignatureMissing)?;
        self.verifier.verify(body, signature)?;

        let event = RazorpayWebhookEvent::parse(body)
            .map_err(|e| AppError::WebhookFailed(format!("Invalid webhook payload: {e}")))?;

        let event_id = match event_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => body_digest(body),
        };
        let kind = event.kind();

        if self.processed_event_repo.is_processed(&event_id).await? {
            tracing::info!(%event_id, event_type = kind.as_str(), "Duplicate webhook delivery");
            return Ok(WebhookOutcome::Duplicate);
        }

        let outcome = match kind {
            WebhookEventKind::SubscriptionCharged => {
                self.extend_entitlement(&event, &event_id, Utc::now())
                    .await?
            }
            WebhookEventKind::Other(ref name) => {
                tracing::debug!(%event_id, event_type = %name, "Unhandled webhook event type");
                WebhookOutcome::Ignored
            }
        };

        self.processed_event_repo
            .mark_processed(&event_id, kind.as_str())
            .await?;

        Ok(outcome)
    }

    async fn extend_entitlement(
        &self,
        event: &RazorpayWebhookEvent,
        event_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<WebhookOutcome> {
        let Some(user_id) = event.subscriber_id() else {
            tracing::warn!(
                event_id,
                subscription_id = event.subscription_id().unwrap_or("unknown"),
                "Charged event without subscriber id in notes"
            );
            return Ok(WebhookOutcome::SubscriberMissing);
        };

        let matches = self.entitlement_repo.find_by_user_id(user_id).await?;

        match matches.as_slice() {
            [] => {
                tracing::info!(event_id, user_id, "No entitlement record for subscriber");
                Ok(WebhookOutcome::NoMatch)
            }
            [record] => {
                let expires_at = next_expiry(now);
                match self
                    .entitlement_repo
                    .activate_until(record.id, expires_at)
                    .await
                {
                    Ok(()) => {}
                    // Record removed after the lookup; same as never having matched.
                    Err(AppError::NotFound) => {
                        tracing::warn!(
                            event_id,
                            user_id,
                            entitlement_id = %record.id,
                            "Entitlement record vanished before update"
                        );
                        return Ok(WebhookOutcome::NoMatch);
                    }
                    Err(e) => return Err(e),
                }
                tracing::info!(
                    event_id,
                    user_id,
                    entitlement_id = %record.id,
                    previous_status = record.subscription_status.map(|s| s.as_str()).unwrap_or("unset"),
                    renewal = record.subscription_status.is_some_and(|s| s.is_active()),
                    %expires_at,
                    "Entitlement extended"
                );
                Ok(WebhookOutcome::Extended {
                    entitlement_id: record.id,
                    expires_at,
                })
            }
            many => {
                // A retry cannot fix duplicate records, so this is acknowledged.
                tracing::error!(
                    event_id,
                    user_id,
                    matches = many.len(),
                    retryable = false,
                    "Multiple entitlement records for subscriber, refusing to pick one"
                );
                Ok(WebhookOutcome::Ambiguous {
                    matches: many.len(),
                })
            }
        }
    }
}

/// Lowercase hex SHA-256 of the raw body, used as a fallback event id.
fn body_digest(body: &[u8]) -> String {
    hex::encode(Sha256::digest(body))
}
