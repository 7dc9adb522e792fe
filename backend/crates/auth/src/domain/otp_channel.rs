//! OTP Channel
//!
//! The capability to deliver a one-time code to a phone number and later check
//! a submitted code. Whether a real SMS goes out is the implementation's
//! business; use cases only see this trait.

use derive_more::Display;

use crate::domain::value_object::phone_number::PhoneNumber;
use crate::error::AuthResult;

/// How codes are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OtpMode {
    /// Real SMS through a verification provider
    #[display("provider")]
    Provider,
    /// Codes generated and kept in process, logged for operators
    #[display("mock")]
    Mock,
}

#[trait_variant::make(OtpChannel: Send)]
pub trait LocalOtpChannel {
    /// Delivery mode, fixed for the lifetime of the channel
    fn mode(&self) -> OtpMode;

    /// Start a verification for `phone_no`
    ///
    /// A new send replaces any outstanding code for the same number.
    async fn send_code(&self, phone_no: &PhoneNumber) -> AuthResult<()>;

    /// Check a submitted code
    ///
    /// Returns `Ok(false)` for a wrong code or when nothing is outstanding.
    /// An approved code is consumed and cannot be approved again.
    async fn check_code(&self, phone_no: &PhoneNumber, code: &str) -> AuthResult<bool>;
}
