//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the OTP channel port.

pub mod entity;
pub mod otp_channel;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{pending_registrant::PendingRegistrant, profile::UserProfile, user::User};
pub use otp_channel::{OtpChannel, OtpMode};
pub use repository::{PendingSignupRepository, UserDirectory};
pub use value_object::{otp_code::OtpCode, phone_number::PhoneNumber, user_id::UserId};
