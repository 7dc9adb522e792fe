//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository and OTP channel traits
//! - `application/` - Use cases, token service, per-phone locks
//! - `infra/` - PostgreSQL and in-memory stores, Twilio Verify and mock OTP
//! - `presentation/` - HTTP handlers, DTOs, router, bearer guard
//!
//! ## Features
//! - Phone-number signup confirmed by a one-time code
//! - Phone-number login confirmed by a one-time code
//! - Stateless HMAC-SHA256 bearer tokens
//! - Mock OTP mode that logs codes instead of sending SMS
//!
//! ## Security Model
//! - Directory checks run before any code is sent
//! - Codes are single use; a wrong code leaves the attempt retryable
//! - Flows for the same phone number are serialized
//! - Token signatures are compared in constant time

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{
    InMemoryPendingSignups, InMemoryUserDirectory, MockOtpChannel, PgUserDirectory,
    TwilioOptions, TwilioOtpChannel,
};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
