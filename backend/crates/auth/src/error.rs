//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// A user is already registered with this phone number
    #[error("User already exists")]
    UserAlreadyExists,

    /// No user is registered with this phone number
    #[error("User not found")]
    UserNotFound,

    /// Code was accepted but the signup it belongs to is gone
    #[error("Signup data not found. Please try again.")]
    PendingSignupNotFound,

    /// Token was valid but its user no longer exists
    #[error("User profile not found")]
    ProfileNotFound,

    /// Code mismatch, nothing outstanding, or provider non-approval
    #[error("Invalid OTP")]
    InvalidOtp,

    /// No bearer token on the request
    #[error("You are not authenticated")]
    Unauthenticated,

    /// Bearer token present but rejected
    #[error("Access token not valid")]
    InvalidToken,

    /// Malformed input
    #[error("{0}")]
    Validation(String),

    /// OTP provider did not answer in time
    #[error("OTP provider timed out")]
    OtpChannelTimeout,

    /// OTP provider failed
    #[error("OTP provider error: {0}")]
    OtpChannel(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserAlreadyExists => StatusCode::CONFLICT,
            AuthError::UserNotFound
            | AuthError::PendingSignupNotFound
            | AuthError::ProfileNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidOtp | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::FORBIDDEN,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::OtpChannelTimeout => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::OtpChannel(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserAlreadyExists => ErrorKind::Conflict,
            AuthError::UserNotFound
            | AuthError::PendingSignupNotFound
            | AuthError::ProfileNotFound => ErrorKind::NotFound,
            AuthError::InvalidOtp | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::InvalidToken => ErrorKind::Forbidden,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::OtpChannelTimeout => ErrorKind::ServiceUnavailable,
            AuthError::OtpChannel(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side variants get a generic message; their detail is only logged.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::OtpChannelTimeout => AppError::new(self.kind(), self.to_string())
                .with_action("Please request a new code and try again"),
            AuthError::PendingSignupNotFound => AppError::new(self.kind(), self.to_string())
                .with_action("Start the signup again"),
            AuthError::InvalidToken => {
                AppError::new(self.kind(), self.to_string()).with_action("Please log in again")
            }
            _ if self.kind().is_server_error() => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::OtpChannel(msg) => {
                tracing::error!(message = %msg, "OTP channel error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::OtpChannelTimeout => {
                tracing::warn!("OTP channel timed out");
            }
            AuthError::InvalidOtp => {
                tracing::warn!("Invalid OTP submitted");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.kind().is_client_error() {
            AuthError::Validation(err.message().to_string())
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(rejection.body_text())
    }
}

impl From<platform::crypto::CryptoError> for AuthError {
    fn from(err: platform::crypto::CryptoError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
