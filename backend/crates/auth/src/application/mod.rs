//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod get_profile;
pub mod initiate_login;
pub mod initiate_signup;
mod otp;
pub mod phone_lock;
pub mod token;
pub mod verify_login;
pub mod verify_signup;

// Re-exports
pub use config::AuthConfig;
pub use get_profile::GetProfileUseCase;
pub use initiate_login::InitiateLoginUseCase;
pub use initiate_signup::{InitiateSignupInput, InitiateSignupUseCase};
pub use otp::OtpSentOutput;
pub use phone_lock::PhoneLocks;
pub use token::TokenService;
pub use verify_login::{VerifyLoginOutput, VerifyLoginUseCase};
pub use verify_signup::{VerifyOtpInput, VerifySignupOutput, VerifySignupUseCase};
