use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::app_error::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex HMAC-SHA256 of the raw body, as Razorpay sends it in
/// `x-razorpay-signature`.
pub fn sign_payload(secret: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies inbound webhook signatures against the shared secret.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: SecretString,
}

impl WebhookVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// The supplied header must equal the expected lowercase hex digest
    /// byte for byte. The comparison runs in constant time.
    pub fn verify(&self, body: &[u8], signature: &str) -> AppResult<()> {
        let expected = sign_payload(self.secret.expose_secret(), body);

        if expected.as_bytes().ct_eq(signature.as_bytes()).into() {
            Ok(())
        } else {
            Err(AppError::InvalidSignature)
        }
    }
}
