//! Access Token Service
//!
//! Issues and validates stateless bearer tokens.
//!
//! Format: `<claim>.<signature>` where `claim` is the user ID, optionally
//! followed by `.<expiry unix seconds>`, and `signature` is
//! base64url(HMAC-SHA256(secret, claim)). Without a TTL the token for a given
//! user is always the same string.

use chrono::Utc;
use std::time::Duration;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

/// Token issuer and validator
pub struct TokenService {
    secret: Vec<u8>,
    ttl: Option<Duration>,
}

impl TokenService {
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Option<Duration>) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.token_secret.clone(), config.token_ttl)
    }

    /// Issue a token for `user_id`
    pub fn issue(&self, user_id: &UserId) -> AuthResult<String> {
        let claim = match self.ttl {
            None => user_id.to_string(),
            Some(ttl) => {
                let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
                let expires_at = Utc::now().timestamp().saturating_add(ttl_secs);
                format!("{}.{}", user_id, expires_at)
            }
        };

        let signature = hmac_sha256(&self.secret, claim.as_bytes())?;

        Ok(format!("{}.{}", claim, to_base64url(&signature)))
    }

    /// Validate a token and return the user it was issued for
    ///
    /// Any malformed, tampered or expired token is `InvalidToken`. An embedded
    /// expiry is honored even if this service was built without a TTL.
    pub fn validate(&self, token: &str) -> AuthResult<UserId> {
        let (claim, signature_b64) = token.rsplit_once('.').ok_or(AuthError::InvalidToken)?;

        let signature = from_base64url(signature_b64).map_err(|_| AuthError::InvalidToken)?;

        if !verify_hmac_sha256(&self.secret, claim.as_bytes(), &signature)? {
            return Err(AuthError::InvalidToken);
        }

        let user_id = match claim.split_once('.') {
            None => claim,
            Some((user_id, expires_at)) => {
                let expires_at: i64 = expires_at.parse().map_err(|_| AuthError::InvalidToken)?;
                if Utc::now().timestamp() >= expires_at {
                    return Err(AuthError::InvalidToken);
                }
                user_id
            }
        };

        UserId::parse_str(user_id).map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(b"test-secret".to_vec(), None)
    }

    #[test]
    fn test_issue_then_validate() {
        let service = service();
        let user_id = UserId::new();
        let token = service.issue(&user_id).unwrap();
        assert_eq!(service.validate(&token).unwrap(), user_id);
    }

    #[test]
    fn test_issue_is_deterministic_without_ttl() {
        let service = service();
        let user_id = UserId::new();
        assert_eq!(service.issue(&user_id).unwrap(), service.issue(&user_id).unwrap());
    }

    #[test]
    fn test_every_single_char_change_is_rejected() {
        let service = service();
        let token = service.issue(&UserId::new()).unwrap();

        for i in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            // Flip between two base64url/uuid-safe characters.
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();
            if tampered == token {
                continue;
            }
            assert!(
                matches!(service.validate(&tampered), Err(AuthError::InvalidToken)),
                "tampered at {i}: {tampered}"
            );
        }
    }

    #[test]
    fn test_truncated_token_rejected() {
        let service = service();
        let token = service.issue(&UserId::new()).unwrap();
        for len in [0, 1, 10, token.len() / 2, token.len() - 1] {
            assert!(matches!(
                service.validate(&token[..len]),
                Err(AuthError::InvalidToken)
            ));
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue(&UserId::new()).unwrap();
        let other = TokenService::new(b"another-secret".to_vec(), None);
        assert!(matches!(other.validate(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_signed_non_uuid_claim_rejected() {
        let service = service();
        let signature = hmac_sha256(b"test-secret", b"not-a-user").unwrap();
        let token = format!("not-a-user.{}", to_base64url(&signature));
        assert!(matches!(service.validate(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_ttl_token_valid_before_expiry() {
        let service = TokenService::new(b"test-secret".to_vec(), Some(Duration::from_secs(3600)));
        let user_id = UserId::new();
        let token = service.issue(&user_id).unwrap();
        assert_eq!(token.matches('.').count(), 2);
        assert_eq!(service.validate(&token).unwrap(), user_id);
    }

    #[test]
    fn test_ttl_beyond_i64_saturates() {
        let service = TokenService::new(b"test-secret".to_vec(), Some(Duration::from_secs(u64::MAX)));
        let user_id = UserId::new();
        let token = service.issue(&user_id).unwrap();
        assert!(token.contains(&format!(".{}.", i64::MAX)));
        assert_eq!(service.validate(&token).unwrap(), user_id);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new(b"test-secret".to_vec(), Some(Duration::ZERO));
        let token = service.issue(&UserId::new()).unwrap();
        assert!(matches!(service.validate(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_empty_secret_is_internal_error() {
        let service = TokenService::new(Vec::new(), None);
        assert!(matches!(service.issue(&UserId::new()), Err(AuthError::Internal(_))));
    }
}
