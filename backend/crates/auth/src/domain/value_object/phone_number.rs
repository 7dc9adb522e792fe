//! PhoneNumber Value Object
//!
//! The phone number exactly as the registrant submitted it. It is the key for
//! pending signups, mock codes and directory lookups, so it is never rewritten.
//! Country code formatting for SMS providers happens at the channel boundary.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Wrap a submitted phone number
    ///
    /// Only presence is checked; a blank value cannot identify anyone.
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(AppError::bad_request("phone_no is required"));
        }
        Ok(Self(raw))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Format for an SMS provider, e.g. `+91` + digits
    pub fn with_country_code(&self, country_code: &str) -> String {
        platform::phone::with_country_code(country_code, &self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
