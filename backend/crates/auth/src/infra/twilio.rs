//! Twilio Verify OTP Channel
//!
//! Twilio generates, delivers and checks the codes; nothing is stored here.

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::otp_channel::{OtpChannel, OtpMode};
use crate::domain::value_object::phone_number::PhoneNumber;
use crate::error::{AuthError, AuthResult};

const DEFAULT_BASE_URL: &str = "https://verify.twilio.com/v2";

/// Twilio credentials
#[derive(Clone)]
pub struct TwilioOptions {
    pub account_sid: String,
    pub auth_token: String,
    pub verify_service_sid: String,
}

impl std::fmt::Debug for TwilioOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioOptions")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("verify_service_sid", &self.verify_service_sid)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct VerificationResponse {
    status: String,
}

pub struct TwilioOtpChannel {
    client: Client,
    options: TwilioOptions,
    base_url: String,
    country_code: String,
}

impl TwilioOtpChannel {
    pub fn new(options: TwilioOptions, country_code: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            options,
            base_url: DEFAULT_BASE_URL.to_string(),
            country_code: country_code.into(),
        }
    }

    /// Point at a different Verify endpoint (regional edge, local stub)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, resource: &str) -> String {
        format!(
            "{}/Services/{}/{}",
            self.base_url, self.options.verify_service_sid, resource
        )
    }

    async fn post(&self, resource: &str, form: &[(&str, &str)]) -> AuthResult<reqwest::Response> {
        self.client
            .post(self.url(resource))
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .form(form)
            .send()
            .await
            .map_err(map_transport_error)
    }
}

fn map_transport_error(err: reqwest::Error) -> AuthError {
    if err.is_timeout() {
        AuthError::OtpChannelTimeout
    } else {
        AuthError::OtpChannel(format!("request to Twilio failed: {err}"))
    }
}

async fn provider_error(response: reqwest::Response) -> AuthError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    AuthError::OtpChannel(format!("Twilio returned {status}: {body}"))
}

impl OtpChannel for TwilioOtpChannel {
    fn mode(&self) -> OtpMode {
        OtpMode::Provider
    }

    async fn send_code(&self, phone_no: &PhoneNumber) -> AuthResult<()> {
        let to = phone_no.with_country_code(&self.country_code);
        let response = self
            .post("Verifications", &[("To", to.as_str()), ("Channel", "sms")])
            .await?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        tracing::info!(to = %to, "Twilio verification started");
        Ok(())
    }

    async fn check_code(&self, phone_no: &PhoneNumber, code: &str) -> AuthResult<bool> {
        let to = phone_no.with_country_code(&self.country_code);
        let response = self
            .post("VerificationCheck", &[("To", to.as_str()), ("Code", code)])
            .await?;

        // Twilio answers 404 once a verification is approved, expired or
        // never started.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let check: VerificationResponse = response
            .json()
            .await
            .map_err(|e| AuthError::OtpChannel(format!("invalid Twilio response: {e}")))?;

        Ok(check.status == "approved")
    }
}
