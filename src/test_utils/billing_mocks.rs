//! In-memory mock implementations for billing-related traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Value as JsonValue, json};
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        ports::payment_provider::{CreateSubscriptionRequest, PaymentProviderTrait},
        use_cases::webhook::{EntitlementRepoTrait, ProcessedEventRepoTrait},
    },
    domain::entities::entitlement::{Entitlement, SubscriptionStatus},
};

// ============================================================================
// InMemoryEntitlementRepo
// ============================================================================

/// Keeps records in insertion order. Duplicate user ids are allowed so the
/// ambiguous-match path can be exercised.
#[derive(Default)]
pub struct InMemoryEntitlementRepo {
    records: Mutex<Vec<Entitlement>>,
    updates: Mutex<usize>,
    fail_next_lookup: Mutex<bool>,
    fail_next_update: Mutex<bool>,
    remove_before_next_update: Mutex<bool>,
}

impl InMemoryEntitlementRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Entitlement>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn get(&self, id: Uuid) -> Option<Entitlement> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    /// Number of successful `activate_until` calls.
    pub fn update_count(&self) -> usize {
        *self.updates.lock().unwrap()
    }

    pub fn fail_next_lookup(&self) {
        *self.fail_next_lookup.lock().unwrap() = true;
    }

    pub fn fail_next_update(&self) {
        *self.fail_next_update.lock().unwrap() = true;
    }

    /// Delete the target record just before the next update runs, as a
    /// concurrent writer would between lookup and update.
    pub fn remove_before_next_update(&self) {
        *self.remove_before_next_update.lock().unwrap() = true;
    }
}

#[async_trait]
impl EntitlementRepoTrait for InMemoryEntitlementRepo {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Vec<Entitlement>> {
        if std::mem::take(&mut *self.fail_next_lookup.lock().unwrap()) {
            return Err(AppError::Database("simulated lookup failure".into()));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn activate_until(&self, id: Uuid, expires_at: DateTime<Utc>) -> AppResult<()> {
        if std::mem::take(&mut *self.fail_next_update.lock().unwrap()) {
            return Err(AppError::Database("simulated update failure".into()));
        }
        let mut records = self.records.lock().unwrap();
        if std::mem::take(&mut *self.remove_before_next_update.lock().unwrap()) {
            records.retain(|r| r.id != id);
        }
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound)?;
        record.subscription_status = Some(SubscriptionStatus::Active);
        record.subscription_expires_at = Some(expires_at);
        record.updated_at = Some(Utc::now());
        *self.updates.lock().unwrap() += 1;
        Ok(())
    }
}

// ============================================================================
// InMemoryProcessedEventRepo
// ============================================================================

#[derive(Default)]
pub struct InMemoryProcessedEventRepo {
    events: Mutex<Vec<(String, String)>>,
}

impl InMemoryProcessedEventRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_ids(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }
}

#[async_trait]
impl ProcessedEventRepoTrait for InMemoryProcessedEventRepo {
    async fn is_processed(&self, event_id: &str) -> AppResult<bool> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .any(|(id, _)| id == event_id))
    }

    async fn mark_processed(&self, event_id: &str, event_type: &str) -> AppResult<()> {
        let mut events = self.events.lock().unwrap();
        if !events.iter().any(|(id, _)| id == event_id) {
            events.push((event_id.to_string(), event_type.to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// RecordingPaymentProvider
// ============================================================================

/// Records every request. Answers with a fixed object, a generated one
/// derived from the request, or a provider error.
#[derive(Default)]
pub struct RecordingPaymentProvider {
    calls: Mutex<Vec<CreateSubscriptionRequest>>,
    response: Option<JsonValue>,
    fail: bool,
}

impl RecordingPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(response: JsonValue) -> Self {
        Self {
            response: Some(response),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<CreateSubscriptionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProviderTrait for RecordingPaymentProvider {
    async fn create_subscription(
        &self,
        request: &CreateSubscriptionRequest,
    ) -> AppResult<JsonValue> {
        self.calls.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(AppError::Provider(
                "BAD_REQUEST_ERROR: The id provided does not exist".into(),
            ));
        }
        Ok(self.response.clone().unwrap_or_else(|| {
            json!({
                "id": "sub_test",
                "entity": "subscription",
                "plan_id": request.plan_id,
                "status": "created",
                "total_count": request.total_count,
                "notes": request.notes,
            })
        }))
    }
}
