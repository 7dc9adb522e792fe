//! In-Memory Repository Implementations
//!
//! `InMemoryPendingSignups` is the production pending-signup store: entries
//! live for the lifetime of the process and are lost on restart.
//! `InMemoryUserDirectory` backs tests and database-less local runs.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entity::{pending_registrant::PendingRegistrant, user::User};
use crate::domain::repository::{PendingSignupRepository, UserDirectory};
use crate::domain::value_object::{phone_number::PhoneNumber, user_id::UserId};
use crate::error::{AuthError, AuthResult};

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> AuthResult<MutexGuard<'a, T>> {
    mutex
        .lock()
        .map_err(|_| AuthError::Internal(format!("{what} lock poisoned")))
}

// ============================================================================
// Pending Signups
// ============================================================================

#[derive(Default)]
pub struct InMemoryPendingSignups {
    entries: Mutex<HashMap<PhoneNumber, PendingRegistrant>>,
}

impl InMemoryPendingSignups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PendingSignupRepository for InMemoryPendingSignups {
    async fn put(&self, pending: PendingRegistrant) -> AuthResult<()> {
        let mut entries = lock(&self.entries, "pending signups")?;
        entries.insert(pending.phone_no().clone(), pending);
        Ok(())
    }

    async fn get(&self, phone_no: &PhoneNumber) -> AuthResult<Option<PendingRegistrant>> {
        let entries = lock(&self.entries, "pending signups")?;
        Ok(entries.get(phone_no).cloned())
    }

    async fn remove(&self, phone_no: &PhoneNumber) -> AuthResult<Option<PendingRegistrant>> {
        let mut entries = lock(&self.entries, "pending signups")?;
        Ok(entries.remove(phone_no))
    }

    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64> {
        let mut entries = lock(&self.entries, "pending signups")?;
        let before = entries.len();
        entries.retain(|_, pending| pending.created_at >= cutoff);
        Ok((before - entries.len()) as u64)
    }
}

// ============================================================================
// User Directory
// ============================================================================

/// Clones share the same map.
#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<Mutex<HashMap<UserId, User>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a user (account deletion lives outside the auth flows)
    pub fn delete(&self, user_id: &UserId) -> Option<User> {
        self.users.lock().ok()?.remove(user_id)
    }

    pub fn len(&self) -> usize {
        self.users.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserDirectory for InMemoryUserDirectory {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = lock(&self.users, "user directory")?;
        if users.values().any(|u| u.phone_no() == user.phone_no()) {
            return Err(AuthError::UserAlreadyExists);
        }
        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let users = lock(&self.users, "user directory")?;
        Ok(users.get(user_id).cloned())
    }

    async fn find_by_phone(&self, phone_no: &PhoneNumber) -> AuthResult<Option<User>> {
        let users = lock(&self.users, "user directory")?;
        Ok(users.values().find(|u| u.phone_no() == phone_no).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::profile::UserProfile;
    use chrono::NaiveDate;

    fn profile(phone: &str, first_name: &str) -> UserProfile {
        UserProfile {
            first_name: first_name.to_string(),
            last_name: "Rao".to_string(),
            phone_no: PhoneNumber::new(phone).unwrap(),
            gender: "female".to_string(),
            address: "12 MG Road".to_string(),
            dob: NaiveDate::from_ymd_opt(1995, 4, 2).unwrap(),
            blood_type: "O+".to_string(),
        }
    }

    #[tokio::test]
    async fn test_pending_put_overwrites() {
        let store = InMemoryPendingSignups::new();
        store.put(PendingRegistrant::new(profile("900", "First"))).await.unwrap();
        store.put(PendingRegistrant::new(profile("900", "Second"))).await.unwrap();

        let phone = PhoneNumber::new("900").unwrap();
        let pending = store.get(&phone).await.unwrap().unwrap();
        assert_eq!(pending.profile.first_name, "Second");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_pending_remove_once() {
        let store = InMemoryPendingSignups::new();
        store.put(PendingRegistrant::new(profile("900", "A"))).await.unwrap();

        let phone = PhoneNumber::new("900").unwrap();
        assert!(store.remove(&phone).await.unwrap().is_some());
        assert!(store.remove(&phone).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_pending_purge() {
        let store = InMemoryPendingSignups::new();
        let mut old = PendingRegistrant::new(profile("901", "Old"));
        old.created_at = Utc::now() - chrono::Duration::hours(2);
        store.put(old).await.unwrap();
        store.put(PendingRegistrant::new(profile("902", "New"))).await.unwrap();

        let purged = store
            .purge_created_before(Utc::now() - chrono::Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(purged, 1);
        assert!(store.get(&PhoneNumber::new("901").unwrap()).await.unwrap().is_none());
        assert!(store.get(&PhoneNumber::new("902").unwrap()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_directory_phone_is_unique() {
        let directory = InMemoryUserDirectory::new();
        let first = User::from_pending(PendingRegistrant::new(profile("900", "A")));
        let second = User::from_pending(PendingRegistrant::new(profile("900", "B")));

        directory.create(&first).await.unwrap();
        assert!(matches!(
            directory.create(&second).await,
            Err(AuthError::UserAlreadyExists)
        ));
        assert_eq!(directory.len(), 1);
    }

    #[tokio::test]
    async fn test_directory_lookups() {
        let directory = InMemoryUserDirectory::new();
        let user = User::from_pending(PendingRegistrant::new(profile("900", "A")));
        directory.create(&user).await.unwrap();

        let by_phone = directory
            .find_by_phone(&PhoneNumber::new("900").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_phone.user_id, user.user_id);

        let by_id = directory.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert_eq!(by_id.profile.first_name, "A");

        let handle = directory.clone();
        assert!(handle.delete(&user.user_id).is_some());
        assert!(directory.find_by_id(&user.user_id).await.unwrap().is_none());
    }
}
