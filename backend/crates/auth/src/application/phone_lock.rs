//! Per-phone-number serialization
//!
//! Every auth flow holds the lock for its phone number while it runs, so an
//! initiate can never overwrite pending data or a code that a concurrent
//! verify for the same number is reading. Different numbers never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::value_object::phone_number::PhoneNumber;

/// Held for the duration of one flow
pub struct PhoneGuard {
    _guard: OwnedMutexGuard<()>,
}

/// Lock table keyed by phone number
#[derive(Default)]
pub struct PhoneLocks {
    locks: Mutex<HashMap<PhoneNumber, Arc<AsyncMutex<()>>>>,
}

impl PhoneLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `phone_no`
    pub async fn acquire(&self, phone_no: &PhoneNumber) -> PhoneGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            // Entries only the table references are idle.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(phone_no.clone()).or_default().clone()
        };

        PhoneGuard {
            _guard: lock.lock_owned().await,
        }
    }

    /// Number of phone numbers with a held or awaited lock
    pub fn active(&self) -> usize {
        let locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.values().filter(|lock| Arc::strong_count(lock) > 1).count()
    }
}
