//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::{pending_registrant::PendingRegistrant, user::User};
use crate::domain::value_object::{phone_number::PhoneNumber, user_id::UserId};
use crate::error::AuthResult;

/// Confirmed user records
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    /// Insert a new user
    ///
    /// Fails with `AuthError::UserAlreadyExists` if the phone number is taken.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by phone number
    async fn find_by_phone(&self, phone_no: &PhoneNumber) -> AuthResult<Option<User>>;
}

/// Unconfirmed signups, keyed by phone number
#[trait_variant::make(PendingSignupRepository: Send)]
pub trait LocalPendingSignupRepository {
    /// Store a pending signup, replacing any previous one for the same number
    async fn put(&self, pending: PendingRegistrant) -> AuthResult<()>;

    /// Read the pending signup for a number
    async fn get(&self, phone_no: &PhoneNumber) -> AuthResult<Option<PendingRegistrant>>;

    /// Remove and return the pending signup for a number
    async fn remove(&self, phone_no: &PhoneNumber) -> AuthResult<Option<PendingRegistrant>>;

    /// Drop every entry created before `cutoff`
    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64>;
}
