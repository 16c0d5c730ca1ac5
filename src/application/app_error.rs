use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Too many requests. Please slow down.")]
    RateLimited,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Signature missing")]
    SignatureMissing,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Not found")]
    NotFound,

    #[error("Payment provider error: {0}")]
    Provider(String),

    #[error("Failed to create subscription: {0}")]
    SubscriptionFailed(String),

    #[error("Webhook processing error: {0}")]
    WebhookFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Client-side failures map to 4xx. Anything else is a server failure the
    /// route reports in its own terms.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::RateLimited
                | AppError::InvalidInput(_)
                | AppError::SignatureMissing
                | AppError::InvalidSignature
                | AppError::NotFound
        )
    }

    /// Public message placed in the `error` field of the response body.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(_) => "Database error".into(),
            AppError::RateLimited => "Too many requests. Please try again later.".into(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::SignatureMissing => "Signature missing".into(),
            AppError::InvalidSignature => "Invalid signature".into(),
            AppError::NotFound => "Not found".into(),
            AppError::Provider(_) => "Payment provider error".into(),
            AppError::SubscriptionFailed(_) => "Failed to create subscription".into(),
            AppError::WebhookFailed(_) => "Webhook processing error".into(),
            AppError::Internal(_) => "Internal error".into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
