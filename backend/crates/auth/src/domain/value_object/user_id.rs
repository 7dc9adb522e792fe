use kernel::id::{Id, markers};

/// Registered user identifier (UUID v4)
pub type UserId = Id<markers::User>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_new() {
        let user_id = UserId::new();
        assert_eq!(user_id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_user_id_from_token_claim() {
        let uuid = uuid::Uuid::new_v4();
        let user_id: UserId = uuid.to_string().parse().unwrap();
        assert_eq!(user_id.as_uuid(), &uuid);
    }
}
