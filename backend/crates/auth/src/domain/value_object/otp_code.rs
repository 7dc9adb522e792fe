//! OtpCode Value Object
//!
//! A locally generated one-time passcode (mock channel only).

use std::fmt;

/// Number of digits in a generated code
pub const OTP_CODE_DIGITS: u32 = 6;

#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Generate a random 6-digit code in `100000..=999999`
    pub fn generate() -> Self {
        Self(platform::crypto::random_numeric_code(OTP_CODE_DIGITS))
    }

    /// Use a known code (fixed-code mock channels, tests)
    pub fn from_string(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a submitted code in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        platform::crypto::constant_time_eq(self.0.as_bytes(), submitted.as_bytes())
    }
}

// Codes stay out of Debug output; operators see them only through the
// explicit mock-channel log line.
impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_six_digits() {
        let code = OtpCode::generate();
        assert_eq!(code.as_str().len(), 6);
        let value: u32 = code.as_str().parse().unwrap();
        assert!((100_000..=999_999).contains(&value));
    }

    #[test]
    fn test_matches() {
        let code = OtpCode::from_string("123456");
        assert!(code.matches("123456"));
        assert!(!code.matches("654321"));
        assert!(!code.matches(""));
        assert!(!code.matches("1234567"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let code = OtpCode::from_string("123456");
        assert!(!format!("{:?}", code).contains("123456"));
    }
}
