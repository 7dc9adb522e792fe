//! Get Profile Use Case

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

pub struct GetProfileUseCase<U>
where
    U: UserDirectory,
{
    users: Arc<U>,
}

impl<U> GetProfileUseCase<U>
where
    U: UserDirectory,
{
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Load the user a validated token points at
    pub async fn execute(&self, user_id: &UserId) -> AuthResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::ProfileNotFound)
    }
}
