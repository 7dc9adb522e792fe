//! Mock OTP Channel
//!
//! Generates codes in process instead of sending SMS. The code for each
//! number is written to the log so an operator can complete the flow.
//! With a code TTL, codes older than it are refused and dropped on the next send.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::otp_channel::{OtpChannel, OtpMode};
use crate::domain::value_object::{otp_code::OtpCode, phone_number::PhoneNumber};
use crate::error::{AuthError, AuthResult};

/// Where new codes come from
#[derive(Debug, Clone)]
enum CodeSource {
    Random,
    Fixed(OtpCode),
}

#[derive(Debug, Clone)]
struct IssuedCode {
    code: OtpCode,
    issued_at: DateTime<Utc>,
}

pub struct MockOtpChannel {
    country_code: String,
    source: CodeSource,
    code_ttl: Option<Duration>,
    codes: Mutex<HashMap<PhoneNumber, IssuedCode>>,
}

impl MockOtpChannel {
    /// Random 6-digit codes
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            source: CodeSource::Random,
            code_ttl: None,
            codes: Mutex::new(HashMap::new()),
        }
    }

    /// Every send issues `code` (scripted local testing)
    pub fn with_fixed_code(country_code: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            source: CodeSource::Fixed(OtpCode::from_string(code)),
            ..Self::new(country_code)
        }
    }

    /// Codes expire `ttl` after they are sent
    pub fn with_code_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.code_ttl = ttl;
        self
    }

    /// Outstanding code for `phone_no`, if any
    pub fn current_code(&self, phone_no: &PhoneNumber) -> Option<OtpCode> {
        let now = Utc::now();
        self.codes
            .lock()
            .ok()?
            .get(phone_no)
            .filter(|issued| self.is_live(issued, now))
            .map(|issued| issued.code.clone())
    }

    fn is_live(&self, issued: &IssuedCode, now: DateTime<Utc>) -> bool {
        let Some(ttl) = self.code_ttl else {
            return true;
        };
        // A TTL past the representable range never elapses.
        TimeDelta::from_std(ttl)
            .ok()
            .and_then(|ttl| issued.issued_at.checked_add_signed(ttl))
            .is_none_or(|deadline| deadline >= now)
    }

    fn next_code(&self) -> OtpCode {
        match &self.source {
            CodeSource::Random => OtpCode::generate(),
            CodeSource::Fixed(code) => code.clone(),
        }
    }
}

impl OtpChannel for MockOtpChannel {
    fn mode(&self) -> OtpMode {
        OtpMode::Mock
    }

    async fn send_code(&self, phone_no: &PhoneNumber) -> AuthResult<()> {
        let code = self.next_code();
        let now = Utc::now();

        {
            let mut codes = self
                .codes
                .lock()
                .map_err(|_| AuthError::Internal("mock OTP lock poisoned".to_string()))?;
            codes.retain(|_, issued| self.is_live(issued, now));
            codes.insert(
                phone_no.clone(),
                IssuedCode {
                    code: code.clone(),
                    issued_at: now,
                },
            );
        }

        tracing::info!(
            to = %phone_no.with_country_code(&self.country_code),
            code = %code,
            "[MOCK OTP] code generated"
        );

        Ok(())
    }

    async fn check_code(&self, phone_no: &PhoneNumber, code: &str) -> AuthResult<bool> {
        let mut codes = self
            .codes
            .lock()
            .map_err(|_| AuthError::Internal("mock OTP lock poisoned".to_string()))?;

        let now = Utc::now();
        let approved = codes
            .get(phone_no)
            .is_some_and(|issued| self.is_live(issued, now) && issued.code.matches(code));
        if approved {
            codes.remove(phone_no);
        }

        Ok(approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> PhoneNumber {
        PhoneNumber::new("9000000001").unwrap()
    }

    #[tokio::test]
    async fn test_code_is_single_use() {
        let channel = MockOtpChannel::new("+91");
        channel.send_code(&phone()).await.unwrap();
        let code = channel.current_code(&phone()).unwrap();

        assert!(channel.check_code(&phone(), code.as_str()).await.unwrap());
        assert!(!channel.check_code(&phone(), code.as_str()).await.unwrap());
        assert!(channel.current_code(&phone()).is_none());
    }

    #[tokio::test]
    async fn test_wrong_code_keeps_outstanding() {
        let channel = MockOtpChannel::with_fixed_code("+91", "123456");
        channel.send_code(&phone()).await.unwrap();

        assert!(!channel.check_code(&phone(), "000000").await.unwrap());
        assert!(channel.check_code(&phone(), "123456").await.unwrap());
    }

    #[tokio::test]
    async fn test_resend_replaces_code() {
        let channel = MockOtpChannel::new("+91");
        channel.send_code(&phone()).await.unwrap();
        let first = channel.current_code(&phone()).unwrap();

        // Regenerate until the random code differs.
        let mut second = first.clone();
        while second == first {
            channel.send_code(&phone()).await.unwrap();
            second = channel.current_code(&phone()).unwrap();
        }

        assert!(!channel.check_code(&phone(), first.as_str()).await.unwrap());
        assert!(channel.check_code(&phone(), second.as_str()).await.unwrap());
    }

    fn age_code(channel: &MockOtpChannel, phone_no: &PhoneNumber, by: chrono::Duration) {
        let mut codes = channel.codes.lock().unwrap();
        codes.get_mut(phone_no).unwrap().issued_at -= by;
    }

    #[tokio::test]
    async fn test_expired_code_refused() {
        let channel = MockOtpChannel::with_fixed_code("+91", "123456")
            .with_code_ttl(Some(Duration::from_secs(60)));
        channel.send_code(&phone()).await.unwrap();
        age_code(&channel, &phone(), chrono::Duration::minutes(5));

        assert!(channel.current_code(&phone()).is_none());
        assert!(!channel.check_code(&phone(), "123456").await.unwrap());
    }

    #[tokio::test]
    async fn test_send_drops_expired_codes() {
        let channel = MockOtpChannel::new("+91").with_code_ttl(Some(Duration::from_secs(60)));
        let other = PhoneNumber::new("9000000002").unwrap();
        channel.send_code(&phone()).await.unwrap();
        age_code(&channel, &phone(), chrono::Duration::minutes(5));

        channel.send_code(&other).await.unwrap();
        let codes = channel.codes.lock().unwrap();
        assert!(!codes.contains_key(&phone()));
        assert!(codes.contains_key(&other));
    }

    #[tokio::test]
    async fn test_nothing_outstanding() {
        let channel = MockOtpChannel::new("+91");
        assert!(!channel.check_code(&phone(), "123456").await.unwrap());
        assert_eq!(channel.mode(), OtpMode::Mock);
    }
}
