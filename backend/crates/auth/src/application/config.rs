//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Shared secret for HMAC-signing access tokens
    pub token_secret: Vec<u8>,
    /// Access token lifetime; `None` issues tokens that never expire
    pub token_ttl: Option<Duration>,
    /// Upper bound for a single OTP provider call
    pub otp_timeout: Duration,
    /// Country calling code prefixed for the SMS provider
    pub phone_country_code: String,
    /// How long an unconfirmed signup is kept; `None` keeps it until restart
    pub pending_signup_ttl: Option<Duration>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            token_ttl: None,
            otp_timeout: Duration::from_secs(10),
            phone_country_code: "+91".to_string(),
            pending_signup_ttl: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }
}

// The token secret never reaches logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("otp_timeout", &self.otp_timeout)
            .field("phone_country_code", &self.phone_country_code)
            .field("pending_signup_ttl", &self.pending_signup_ttl)
            .finish()
    }
}
