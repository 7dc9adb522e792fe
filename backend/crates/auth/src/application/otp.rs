//! OTP channel calls shared by the signup and login flows
//!
//! Both calls are bounded by `AuthConfig::otp_timeout`. Nothing is retried
//! here; the caller resubmits.

use std::time::{Duration, Instant};

use crate::domain::otp_channel::OtpChannel;
use crate::domain::value_object::phone_number::PhoneNumber;
use crate::error::{AuthError, AuthResult};

/// Ask the channel to deliver a code
pub(crate) async fn dispatch<O>(otp: &O, phone_no: &PhoneNumber, timeout: Duration) -> AuthResult<()>
where
    O: OtpChannel,
{
    let started = Instant::now();

    tokio::time::timeout(timeout, otp.send_code(phone_no))
        .await
        .map_err(|_| AuthError::OtpChannelTimeout)??;

    tracing::debug!(
        phone_no = %phone_no,
        mode = %otp.mode(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "OTP dispatched"
    );

    Ok(())
}

/// Check a submitted code, failing with `InvalidOtp` unless approved
pub(crate) async fn verify<O>(
    otp: &O,
    phone_no: &PhoneNumber,
    code: &str,
    timeout: Duration,
) -> AuthResult<()>
where
    O: OtpChannel,
{
    let approved = tokio::time::timeout(timeout, otp.check_code(phone_no, code))
        .await
        .map_err(|_| AuthError::OtpChannelTimeout)??;

    if !approved {
        return Err(AuthError::InvalidOtp);
    }

    Ok(())
}

/// Acknowledgement of a dispatched code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpSentOutput {
    pub mode: crate::domain::otp_channel::OtpMode,
}
