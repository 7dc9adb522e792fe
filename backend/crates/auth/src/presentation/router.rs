//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::otp_channel::OtpChannel;
use crate::domain::repository::{PendingSignupRepository, UserDirectory};
use crate::infra::memory::InMemoryPendingSignups;
use crate::infra::postgres::PgUserDirectory;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer_auth;

/// Create the Auth router with the PostgreSQL directory and in-process pending store
pub fn auth_router<O>(users: PgUserDirectory, otp: O, config: AuthConfig) -> Router
where
    O: OtpChannel + Sync + 'static,
{
    auth_router_generic(users, InMemoryPendingSignups::new(), otp, config)
}

/// Create a generic Auth router for any store and OTP channel
pub fn auth_router_generic<U, P, O>(users: U, pending: P, otp: O, config: AuthConfig) -> Router
where
    U: UserDirectory + Sync + 'static,
    P: PendingSignupRepository + Sync + 'static,
    O: OtpChannel + Sync + 'static,
{
    let state = AuthAppState::new(users, pending, otp, config);
    let guard = middleware::from_fn_with_state(state.tokens.clone(), require_bearer_auth);

    Router::new()
        .route("/initiate-signup", post(handlers::initiate_signup::<U, P, O>))
        .route("/verify-signup", post(handlers::verify_signup::<U, P, O>))
        .route("/initiate-login", post(handlers::initiate_login::<U, P, O>))
        .route("/verify-login", post(handlers::verify_login::<U, P, O>))
        .route(
            "/user",
            get(handlers::get_profile::<U, P, O>).route_layer(guard),
        )
        .with_state(state)
}
