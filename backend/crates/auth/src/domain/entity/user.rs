//! User Entity
//!
//! The durable identity created when a signup is confirmed.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::entity::{pending_registrant::PendingRegistrant, profile::UserProfile};
use crate::domain::value_object::{phone_number::PhoneNumber, user_id::UserId};

/// User entity
///
/// `emergency_contact` and `vehicle_details` are free-form documents filled in
/// by other parts of the product; signup always leaves them empty.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: UserId,
    pub profile: UserProfile,
    pub emergency_contact: Option<Value>,
    pub vehicle_details: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user from a confirmed signup
    pub fn from_pending(pending: PendingRegistrant) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            profile: pending.profile,
            emergency_contact: None,
            vehicle_details: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn phone_no(&self) -> &PhoneNumber {
        &self.profile.phone_no
    }
}
