//! API DTOs (Data Transfer Objects)
//!
//! Field names are snake_case on the wire.

use axum::extract::FromRequest;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entity::user::User;
use crate::error::AuthError;

/// JSON body extractor whose rejections use the auth error body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct AuthJson<T>(pub T);

// ============================================================================
// Requests
// ============================================================================

/// Signup initiate request
#[derive(Debug, Clone, Deserialize)]
pub struct InitiateSignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone_no: String,
    pub gender: String,
    pub address: String,
    /// `YYYY-MM-DD`
    pub dob: NaiveDate,
    pub blood_type: String,
}

/// Login initiate request
#[derive(Debug, Clone, Deserialize)]
pub struct InitiateLoginRequest {
    pub phone_no: String,
}

/// Code submission for signup and login
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpRequest {
    pub phone_no: String,
    pub otp: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Acknowledgement for initiate calls
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Token plus user details
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse<T> {
    pub success: bool,
    pub access_token: String,
    pub user_details: T,
}

/// Profile read
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user_details: PublicUserDto,
}

/// Full stored record, returned once at signup
#[derive(Debug, Clone, Serialize)]
pub struct UserRecordDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_no: String,
    pub gender: String,
    pub address: String,
    pub dob: NaiveDate,
    pub blood_type: String,
    pub emergency_contact: Option<Value>,
    pub vehicle_details: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserRecordDto {
    fn from(user: User) -> Self {
        let profile = user.profile;
        Self {
            id: user.user_id.to_string(),
            first_name: profile.first_name,
            last_name: profile.last_name,
            phone_no: profile.phone_no.as_str().to_string(),
            gender: profile.gender,
            address: profile.address,
            dob: profile.dob,
            blood_type: profile.blood_type,
            emergency_contact: user.emergency_contact,
            vehicle_details: user.vehicle_details,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Projection returned by login and the profile read
#[derive(Debug, Clone, Serialize)]
pub struct PublicUserDto {
    pub id: String,
    pub emergency_contact: Option<Value>,
    pub first_name: String,
    pub last_name: String,
    pub phone_no: String,
    pub gender: String,
    pub address: String,
    pub dob: NaiveDate,
    pub blood_type: String,
    pub vehicle_details: Option<Value>,
}

impl From<User> for PublicUserDto {
    fn from(user: User) -> Self {
        let profile = user.profile;
        Self {
            id: user.user_id.to_string(),
            emergency_contact: user.emergency_contact,
            first_name: profile.first_name,
            last_name: profile.last_name,
            phone_no: profile.phone_no.as_str().to_string(),
            gender: profile.gender,
            address: profile.address,
            dob: profile.dob,
            blood_type: profile.blood_type,
            vehicle_details: user.vehicle_details,
        }
    }
}
