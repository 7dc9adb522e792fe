//! Pending Registrant Entity
//!
//! A signup whose profile was submitted but whose OTP is not yet confirmed.
//! Lives only in process memory.

use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

use crate::domain::entity::profile::UserProfile;
use crate::domain::value_object::phone_number::PhoneNumber;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRegistrant {
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
}

impl PendingRegistrant {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            created_at: Utc::now(),
        }
    }

    /// Store key
    #[inline]
    pub fn phone_no(&self) -> &PhoneNumber {
        &self.profile.phone_no
    }

    /// Whether this entry is older than `ttl` at `now`
    pub fn is_expired_at(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        // A TTL past the representable range never elapses.
        TimeDelta::from_std(ttl)
            .ok()
            .and_then(|ttl| self.created_at.checked_add_signed(ttl))
            .is_some_and(|deadline| deadline < now)
    }

    /// Creation time before which entries are stale at `now`.
    /// `None` when no representable entry can be that old.
    pub fn stale_cutoff(ttl: Duration, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        TimeDelta::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_sub_signed(ttl))
    }
}
