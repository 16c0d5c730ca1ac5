//! Test app state builder for HTTP-level integration testing.
//!
//! This module provides `TestAppStateBuilder` which creates a minimal `AppState`
//! with in-memory mocks for testing HTTP endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;
use url::Url;

use crate::{
    adapters::http::app_state::AppState,
    application::{
        ports::payment_provider::PaymentProviderTrait,
        use_cases::{
            subscription::{DEFAULT_TOTAL_COUNT, SubscriptionUseCases},
            webhook::WebhookUseCases,
        },
    },
    domain::entities::entitlement::Entitlement,
    infra::{RateLimiterTrait, config::AppConfig, webhook_signature::WebhookVerifier},
    test_utils::{
        InMemoryEntitlementRepo, InMemoryProcessedEventRepo, InMemoryRateLimiter,
        RecordingPaymentProvider,
    },
};

/// Webhook secret the test state verifies against.
pub const TEST_WEBHOOK_SECRET: &str = "whsec_test_secret";

/// Builder for creating test `AppState` instances.
pub struct TestAppStateBuilder {
    entitlements: Vec<Entitlement>,
    payment_provider: Arc<dyn PaymentProviderTrait>,
    rate_limiter: Arc<dyn RateLimiterTrait>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            entitlements: Vec::new(),
            payment_provider: Arc::new(RecordingPaymentProvider::new()),
            rate_limiter: Arc::new(InMemoryRateLimiter::permissive()),
        }
    }

    pub fn with_entitlement(mut self, entitlement: Entitlement) -> Self {
        self.entitlements.push(entitlement);
        self
    }

    pub fn with_payment_provider(mut self, provider: Arc<dyn PaymentProviderTrait>) -> Self {
        self.payment_provider = provider;
        self
    }

    pub fn with_rate_limiter(mut self, rate_limiter: Arc<dyn RateLimiterTrait>) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }

    pub fn build(self) -> AppState {
        self.build_with_repos().0
    }

    /// Build the state and hand back the in-memory stores for assertions.
    pub fn build_with_repos(
        self,
    ) -> (
        AppState,
        Arc<InMemoryEntitlementRepo>,
        Arc<InMemoryProcessedEventRepo>,
    ) {
        let entitlement_repo = Arc::new(InMemoryEntitlementRepo::with_records(self.entitlements));
        let processed_event_repo = Arc::new(InMemoryProcessedEventRepo::new());

        let subscription_use_cases = Arc::new(SubscriptionUseCases::new(
            self.payment_provider,
            DEFAULT_TOTAL_COUNT,
        ));

        let webhook_use_cases = Arc::new(WebhookUseCases::new(
            entitlement_repo.clone(),
            processed_event_repo.clone(),
            WebhookVerifier::new(SecretString::from(TEST_WEBHOOK_SECRET)),
        ));

        // Create minimal config for testing
        let config = Arc::new(AppConfig {
            razorpay_key_id: "rzp_test_key".to_string(),
            razorpay_key_secret: SecretString::from("rzp_test_secret"),
            razorpay_webhook_secret: SecretString::from(TEST_WEBHOOK_SECRET),
            razorpay_api_base: Url::parse("http://127.0.0.1:9/v1").unwrap(),
            subscription_total_count: DEFAULT_TOTAL_COUNT,
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            bind_addr: "127.0.0.1:3001".parse::<SocketAddr>().unwrap(),
            database_url: String::new(),
            redis_url: String::new(),
            rate_limit_window_secs: 60,
            rate_limit_per_ip: 30,
            rate_limit_per_user: 10,
            trust_proxy: false,
        });

        let app_state = AppState {
            config,
            subscription_use_cases,
            webhook_use_cases,
            rate_limiter: self.rate_limiter,
        };

        (app_state, entitlement_repo, processed_event_repo)
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
