//! Bearer token extraction
//!
//! Reads `Authorization: Bearer <token>` headers.

use axum::http::{HeaderMap, header};

/// Scheme prefix, matched case-sensitively with exactly one space
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer token from the `Authorization` header
///
/// Returns `None` when the header is missing, is not valid UTF-8, uses any
/// other scheme or casing, or carries an empty token. The token ends at the
/// first space after the prefix.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let rest = value.strip_prefix(BEARER_PREFIX)?;
    rest.split(' ').next().filter(|token| !token.is_empty())
}
