use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::payment_provider::{CreateSubscriptionRequest, PaymentProviderTrait},
    infra::http_client::build_client,
};

#[derive(Clone)]
pub struct RazorpayClient {
    client: Client,
    api_base: Url,
    key_id: String,
    key_secret: SecretString,
}

impl RazorpayClient {
    pub fn new(api_base: Url, key_id: String, key_secret: SecretString) -> Self {
        Self {
            client: build_client(),
            api_base,
            key_id,
            key_secret,
        }
    }

    fn auth_header(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(format!(
            "{}:{}",
            self.key_id,
            self.key_secret.expose_secret()
        ));
        format!("Basic {}", encoded)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.as_str().trim_end_matches('/'), path)
    }

    async fn handle_response(&self, response: reqwest::Response) -> AppResult<JsonValue> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            tracing::error!(status = %status, body = %body, "Razorpay API error");

            if let Ok(error) = serde_json::from_str::<RazorpayErrorResponse>(&body) {
                return Err(AppError::Provider(format!(
                    "Razorpay error ({}): {}",
                    error.error.code.unwrap_or_else(|| status.to_string()),
                    error.error.description.unwrap_or_default()
                )));
            }

            return Err(AppError::Provider(format!("Razorpay API error: {}", status)));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Razorpay response");
            AppError::Provider(format!("Failed to parse Razorpay response: {}", e))
        })
    }
}

#[async_trait]
impl PaymentProviderTrait for RazorpayClient {
    async fn create_subscription(
        &self,
        request: &CreateSubscriptionRequest,
    ) -> AppResult<JsonValue> {
        let response = self
            .client
            .post(self.endpoint("subscriptions"))
            .header("Authorization", self.auth_header())
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Razorpay request failed: {}", e)))?;

        self.handle_response(response).await
    }
}

// ============================================================================
// Razorpay Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RazorpayErrorResponse {
    pub error: RazorpayError,
}

#[derive(Debug, Deserialize)]
pub struct RazorpayError {
    pub code: Option<String>,
    pub description: Option<String>,
}
