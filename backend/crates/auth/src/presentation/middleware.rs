//! Auth Middleware
//!
//! Bearer-token guard for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use platform::bearer::extract_bearer_token;

use crate::application::token::TokenService;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthError;

/// Identity resolved from the bearer token, stored in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that requires a valid bearer token
///
/// No usable `Authorization: Bearer <token>` header is `Unauthenticated`;
/// a token that fails validation is `InvalidToken`.
pub async fn require_bearer_auth(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer_token(req.headers()).ok_or(AuthError::Unauthenticated)?;

    let user_id = tokens.validate(token)?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}
