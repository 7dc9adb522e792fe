//! Initiate Login Use Case
//!
//! Sends a code to an already registered number.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::otp::{self, OtpSentOutput};
use crate::application::phone_lock::PhoneLocks;
use crate::domain::otp_channel::OtpChannel;
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::phone_number::PhoneNumber;
use crate::error::{AuthError, AuthResult};

/// Initiate login use case
pub struct InitiateLoginUseCase<U, O>
where
    U: UserDirectory,
    O: OtpChannel,
{
    users: Arc<U>,
    otp: Arc<O>,
    locks: Arc<PhoneLocks>,
    config: Arc<AuthConfig>,
}

impl<U, O> InitiateLoginUseCase<U, O>
where
    U: UserDirectory,
    O: OtpChannel,
{
    pub fn new(users: Arc<U>, otp: Arc<O>, locks: Arc<PhoneLocks>, config: Arc<AuthConfig>) -> Self {
        Self {
            users,
            otp,
            locks,
            config,
        }
    }

    pub async fn execute(&self, phone_no: String) -> AuthResult<OtpSentOutput> {
        let phone_no = PhoneNumber::new(phone_no)?;
        let _guard = self.locks.acquire(&phone_no).await;

        if self.users.find_by_phone(&phone_no).await?.is_none() {
            return Err(AuthError::UserNotFound);
        }

        otp::dispatch(&*self.otp, &phone_no, self.config.otp_timeout).await?;

        tracing::info!(phone_no = %phone_no, mode = %self.otp.mode(), "Login OTP sent");

        Ok(OtpSentOutput {
            mode: self.otp.mode(),
        })
    }
}
