use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use url::Url;

use crate::application::use_cases::subscription::DEFAULT_TOTAL_COUNT;

pub const DEFAULT_RAZORPAY_API_BASE: &str = "https://api.razorpay.com/v1";

/// Process-wide configuration, loaded once at startup and shared read-only.
pub struct AppConfig {
    pub razorpay_key_id: String,
    pub razorpay_key_secret: SecretString,
    /// Shared secret for `x-razorpay-signature` verification.
    pub razorpay_webhook_secret: SecretString,
    pub razorpay_api_base: Url,
    /// Billing cycles requested for each new subscription.
    pub subscription_total_count: u32,
    pub cors_origin: HeaderValue,
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub redis_url: String,
    pub rate_limit_window_secs: u64,
    pub rate_limit_per_ip: u64,
    pub rate_limit_per_user: u64,
    /// Whether to trust X-Forwarded-For headers. Only enable behind a reverse proxy.
    pub trust_proxy: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let razorpay_key_id: String = get_env("RAZORPAY_KEY_ID");
        let razorpay_key_secret = SecretString::from(get_env::<String>("RAZORPAY_KEY_SECRET"));
        let razorpay_webhook_secret =
            SecretString::from(get_env::<String>("RAZORPAY_WEBHOOK_SECRET"));
        let razorpay_api_base: Url = get_env_default(
            "RAZORPAY_API_BASE",
            Url::parse(DEFAULT_RAZORPAY_API_BASE).expect("default Razorpay URL is valid"),
        );
        let subscription_total_count: u32 =
            get_env_default("SUBSCRIPTION_TOTAL_COUNT", DEFAULT_TOTAL_COUNT);

        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");
        let bind_addr: SocketAddr = get_env_default("BIND_ADDR", "127.0.0.1:3001".parse().unwrap());
        let database_url: String = get_env("DATABASE_URL");
        let redis_url: String = get_env_default("REDIS_URL", "redis://127.0.0.1:6379".to_string());
        let rate_limit_window_secs: u64 = get_env_default("RATE_LIMIT_WINDOW_SECS", 60);
        let rate_limit_per_ip: u64 = get_env_default("RATE_LIMIT_PER_IP", 30);
        let rate_limit_per_user: u64 = get_env_default("RATE_LIMIT_PER_USER", 10);
        // Default to false - must explicitly enable when behind a trusted proxy
        let trust_proxy: bool = get_env_default("TRUST_PROXY", false);

        Self {
            razorpay_key_id,
            razorpay_key_secret,
            razorpay_webhook_secret,
            razorpay_api_base,
            subscription_total_count,
            cors_origin,
            bind_addr,
            database_url,
            redis_url,
            rate_limit_window_secs,
            rate_limit_per_ip,
            rate_limit_per_user,
            trust_proxy,
        }
    }
}
