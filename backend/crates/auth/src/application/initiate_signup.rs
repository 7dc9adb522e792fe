//! Initiate Signup Use Case
//!
//! Records a pending registration and sends the confirming code.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::otp::{self, OtpSentOutput};
use crate::application::phone_lock::PhoneLocks;
use crate::domain::entity::{pending_registrant::PendingRegistrant, profile::UserProfile};
use crate::domain::otp_channel::OtpChannel;
use crate::domain::repository::{PendingSignupRepository, UserDirectory};
use crate::domain::value_object::phone_number::PhoneNumber;
use crate::error::{AuthError, AuthResult};

/// Initiate signup input
pub struct InitiateSignupInput {
    pub first_name: String,
    pub last_name: String,
    pub phone_no: String,
    pub gender: String,
    pub address: String,
    pub dob: NaiveDate,
    pub blood_type: String,
}

/// Initiate signup use case
pub struct InitiateSignupUseCase<U, P, O>
where
    U: UserDirectory,
    P: PendingSignupRepository,
    O: OtpChannel,
{
    users: Arc<U>,
    pending: Arc<P>,
    otp: Arc<O>,
    locks: Arc<PhoneLocks>,
    config: Arc<AuthConfig>,
}

impl<U, P, O> InitiateSignupUseCase<U, P, O>
where
    U: UserDirectory,
    P: PendingSignupRepository,
    O: OtpChannel,
{
    pub fn new(
        users: Arc<U>,
        pending: Arc<P>,
        otp: Arc<O>,
        locks: Arc<PhoneLocks>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            users,
            pending,
            otp,
            locks,
            config,
        }
    }

    pub async fn execute(&self, input: InitiateSignupInput) -> AuthResult<OtpSentOutput> {
        let phone_no = PhoneNumber::new(input.phone_no)?;
        let _guard = self.locks.acquire(&phone_no).await;

        // Registered numbers never get a code
        if self.users.find_by_phone(&phone_no).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let cutoff = self
            .config
            .pending_signup_ttl
            .and_then(|ttl| PendingRegistrant::stale_cutoff(ttl, Utc::now()));
        if let Some(cutoff) = cutoff {
            let purged = self.pending.purge_created_before(cutoff).await?;
            if purged > 0 {
                tracing::debug!(purged, "Purged expired pending signups");
            }
        }

        let profile = UserProfile {
            first_name: input.first_name,
            last_name: input.last_name,
            phone_no: phone_no.clone(),
            gender: input.gender,
            address: input.address,
            dob: input.dob,
            blood_type: input.blood_type,
        };

        // Last initiate wins
        self.pending.put(PendingRegistrant::new(profile)).await?;

        otp::dispatch(&*self.otp, &phone_no, self.config.otp_timeout).await?;

        tracing::info!(phone_no = %phone_no, mode = %self.otp.mode(), "Signup OTP sent");

        Ok(OtpSentOutput {
            mode: self.otp.mode(),
        })
    }
}
