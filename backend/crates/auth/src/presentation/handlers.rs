//! HTTP Handlers

use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    GetProfileUseCase, InitiateLoginUseCase, InitiateSignupInput, InitiateSignupUseCase,
    PhoneLocks, TokenService, VerifyLoginUseCase, VerifyOtpInput, VerifySignupUseCase,
};
use crate::domain::otp_channel::{OtpChannel, OtpMode};
use crate::domain::repository::{PendingSignupRepository, UserDirectory};
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuthJson, InitiateLoginRequest, InitiateSignupRequest, MessageResponse, ProfileResponse,
    PublicUserDto, TokenResponse, UserRecordDto, VerifyOtpRequest,
};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
pub struct AuthAppState<U, P, O> {
    pub users: Arc<U>,
    pub pending: Arc<P>,
    pub otp: Arc<O>,
    pub tokens: Arc<TokenService>,
    pub locks: Arc<PhoneLocks>,
    pub config: Arc<AuthConfig>,
}

impl<U, P, O> AuthAppState<U, P, O> {
    pub fn new(users: U, pending: P, otp: O, config: AuthConfig) -> Self {
        Self {
            users: Arc::new(users),
            pending: Arc::new(pending),
            otp: Arc::new(otp),
            tokens: Arc::new(TokenService::from_config(&config)),
            locks: Arc::new(PhoneLocks::new()),
            config: Arc::new(config),
        }
    }
}

// Only the Arcs are cloned
impl<U, P, O> Clone for AuthAppState<U, P, O> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            pending: self.pending.clone(),
            otp: self.otp.clone(),
            tokens: self.tokens.clone(),
            locks: self.locks.clone(),
            config: self.config.clone(),
        }
    }
}

fn sent_message(flow: &str, mode: OtpMode) -> MessageResponse {
    let message = match mode {
        OtpMode::Provider => format!("OTP sent for {flow}"),
        OtpMode::Mock => format!("Mock OTP sent for {flow}"),
    };
    MessageResponse {
        success: true,
        message,
    }
}

// ============================================================================
// Signup
// ============================================================================

/// POST /api/auth/initiate-signup
pub async fn initiate_signup<U, P, O>(
    State(state): State<AuthAppState<U, P, O>>,
    AuthJson(req): AuthJson<InitiateSignupRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    U: UserDirectory + Sync + 'static,
    P: PendingSignupRepository + Sync + 'static,
    O: OtpChannel + Sync + 'static,
{
    let use_case = InitiateSignupUseCase::new(
        state.users.clone(),
        state.pending.clone(),
        state.otp.clone(),
        state.locks.clone(),
        state.config.clone(),
    );

    let input = InitiateSignupInput {
        first_name: req.first_name,
        last_name: req.last_name,
        phone_no: req.phone_no,
        gender: req.gender,
        address: req.address,
        dob: req.dob,
        blood_type: req.blood_type,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(sent_message("signup", output.mode)))
}

/// POST /api/auth/verify-signup
pub async fn verify_signup<U, P, O>(
    State(state): State<AuthAppState<U, P, O>>,
    AuthJson(req): AuthJson<VerifyOtpRequest>,
) -> AuthResult<impl IntoResponse>
where
    U: UserDirectory + Sync + 'static,
    P: PendingSignupRepository + Sync + 'static,
    O: OtpChannel + Sync + 'static,
{
    let use_case = VerifySignupUseCase::new(
        state.users.clone(),
        state.pending.clone(),
        state.otp.clone(),
        state.tokens.clone(),
        state.locks.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(VerifyOtpInput {
            phone_no: req.phone_no,
            otp: req.otp,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            success: true,
            access_token: output.access_token,
            user_details: UserRecordDto::from(output.user),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/initiate-login
pub async fn initiate_login<U, P, O>(
    State(state): State<AuthAppState<U, P, O>>,
    AuthJson(req): AuthJson<InitiateLoginRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    U: UserDirectory + Sync + 'static,
    P: PendingSignupRepository + Sync + 'static,
    O: OtpChannel + Sync + 'static,
{
    let use_case = InitiateLoginUseCase::new(
        state.users.clone(),
        state.otp.clone(),
        state.locks.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(req.phone_no).await?;

    Ok(Json(sent_message("login", output.mode)))
}

/// POST /api/auth/verify-login
pub async fn verify_login<U, P, O>(
    State(state): State<AuthAppState<U, P, O>>,
    AuthJson(req): AuthJson<VerifyOtpRequest>,
) -> AuthResult<Json<TokenResponse<PublicUserDto>>>
where
    U: UserDirectory + Sync + 'static,
    P: PendingSignupRepository + Sync + 'static,
    O: OtpChannel + Sync + 'static,
{
    let use_case = VerifyLoginUseCase::new(
        state.users.clone(),
        state.otp.clone(),
        state.tokens.clone(),
        state.locks.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(VerifyOtpInput {
            phone_no: req.phone_no,
            otp: req.otp,
        })
        .await?;

    Ok(Json(TokenResponse {
        success: true,
        access_token: output.access_token,
        user_details: PublicUserDto::from(output.user),
    }))
}

// ============================================================================
// Profile (requires bearer token)
// ============================================================================

/// GET /api/auth/user
pub async fn get_profile<U, P, O>(
    State(state): State<AuthAppState<U, P, O>>,
    Extension(current): Extension<AuthenticatedUser>,
) -> AuthResult<Json<ProfileResponse>>
where
    U: UserDirectory + Sync + 'static,
    P: PendingSignupRepository + Sync + 'static,
    O: OtpChannel + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.users.clone());

    let user = use_case.execute(&current.user_id).await?;

    Ok(Json(ProfileResponse {
        success: true,
        user_details: PublicUserDto::from(user),
    }))
}
