//! Verify Login Use Case
//!
//! Exchanges a correct code for an access token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::otp;
use crate::application::phone_lock::PhoneLocks;
use crate::application::token::TokenService;
use crate::application::verify_signup::VerifyOtpInput;
use crate::domain::entity::user::User;
use crate::domain::otp_channel::OtpChannel;
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::phone_number::PhoneNumber;
use crate::error::{AuthError, AuthResult};

/// Verify login output
pub struct VerifyLoginOutput {
    pub access_token: String,
    pub user: User,
}

/// Verify login use case
pub struct VerifyLoginUseCase<U, O>
where
    U: UserDirectory,
    O: OtpChannel,
{
    users: Arc<U>,
    otp: Arc<O>,
    tokens: Arc<TokenService>,
    locks: Arc<PhoneLocks>,
    config: Arc<AuthConfig>,
}

impl<U, O> VerifyLoginUseCase<U, O>
where
    U: UserDirectory,
    O: OtpChannel,
{
    pub fn new(
        users: Arc<U>,
        otp: Arc<O>,
        tokens: Arc<TokenService>,
        locks: Arc<PhoneLocks>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            users,
            otp,
            tokens,
            locks,
            config,
        }
    }

    pub async fn execute(&self, input: VerifyOtpInput) -> AuthResult<VerifyLoginOutput> {
        let phone_no = PhoneNumber::new(input.phone_no)?;
        let _guard = self.locks.acquire(&phone_no).await;

        otp::verify(&*self.otp, &phone_no, &input.otp, self.config.otp_timeout).await?;

        // The user may have been removed since the code was sent
        let user = self
            .users
            .find_by_phone(&phone_no)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let access_token = self.tokens.issue(&user.user_id)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(VerifyLoginOutput { access_token, user })
    }
}
