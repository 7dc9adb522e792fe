//! Verify Signup Use Case
//!
//! Confirms a pending registration with its code and creates the user.

use chrono::Utc;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::otp;
use crate::application::phone_lock::PhoneLocks;
use crate::application::token::TokenService;
use crate::domain::entity::{pending_registrant::PendingRegistrant, user::User};
use crate::domain::otp_channel::OtpChannel;
use crate::domain::repository::{PendingSignupRepository, UserDirectory};
use crate::domain::value_object::phone_number::PhoneNumber;
use crate::error::{AuthError, AuthResult};

/// Code submission input, shared with login
pub struct VerifyOtpInput {
    pub phone_no: String,
    pub otp: String,
}

/// Verify signup output
pub struct VerifySignupOutput {
    pub access_token: String,
    pub user: User,
}

/// Verify signup use case
pub struct VerifySignupUseCase<U, P, O>
where
    U: UserDirectory,
    P: PendingSignupRepository,
    O: OtpChannel,
{
    users: Arc<U>,
    pending: Arc<P>,
    otp: Arc<O>,
    tokens: Arc<TokenService>,
    locks: Arc<PhoneLocks>,
    config: Arc<AuthConfig>,
}

impl<U, P, O> VerifySignupUseCase<U, P, O>
where
    U: UserDirectory,
    P: PendingSignupRepository,
    O: OtpChannel,
{
    pub fn new(
        users: Arc<U>,
        pending: Arc<P>,
        otp: Arc<O>,
        tokens: Arc<TokenService>,
        locks: Arc<PhoneLocks>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            users,
            pending,
            otp,
            tokens,
            locks,
            config,
        }
    }

    pub async fn execute(&self, input: VerifyOtpInput) -> AuthResult<VerifySignupOutput> {
        let phone_no = PhoneNumber::new(input.phone_no)?;
        let _guard = self.locks.acquire(&phone_no).await;

        // A matched code is consumed here, before the pending lookup.
        // On mismatch nothing is touched, so the registrant can retry.
        if let Err(err) =
            otp::verify(&*self.otp, &phone_no, &input.otp, self.config.otp_timeout).await
        {
            // No signup to retry: a spent code replayed, an expired entry,
            // or no initiate at all
            if matches!(err, AuthError::InvalidOtp) && self.live_pending(&phone_no).await?.is_none()
            {
                return Err(AuthError::PendingSignupNotFound);
            }
            return Err(err);
        }

        let pending = self
            .live_pending(&phone_no)
            .await?
            .ok_or(AuthError::PendingSignupNotFound)?;

        let user = User::from_pending(pending);
        self.users.create(&user).await?;

        // Only after the user exists
        self.pending.remove(&phone_no).await?;

        let access_token = self.tokens.issue(&user.user_id)?;

        tracing::info!(user_id = %user.user_id, phone_no = %phone_no, "User signed up");

        Ok(VerifySignupOutput { access_token, user })
    }

    /// Pending entry for `phone_no`, dropping it if it has outlived its TTL
    async fn live_pending(&self, phone_no: &PhoneNumber) -> AuthResult<Option<PendingRegistrant>> {
        let Some(pending) = self.pending.get(phone_no).await? else {
            return Ok(None);
        };

        if let Some(ttl) = self.config.pending_signup_ttl {
            if pending.is_expired_at(ttl, Utc::now()) {
                self.pending.remove(phone_no).await?;
                tracing::info!(phone_no = %phone_no, "Pending signup expired");
                return Ok(None);
            }
        }

        Ok(Some(pending))
    }
}
