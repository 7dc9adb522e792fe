//! Infrastructure Layer
//!
//! Storage implementations and the OTP providers.

pub mod memory;
pub mod mock_otp;
pub mod postgres;
pub mod twilio;

pub use memory::{InMemoryPendingSignups, InMemoryUserDirectory};
pub use mock_otp::MockOtpChannel;
pub use postgres::PgUserDirectory;
pub use twilio::{TwilioOptions, TwilioOtpChannel};
