//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entity::{profile::UserProfile, user::User};
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::{phone_number::PhoneNumber, user_id::UserId};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    first_name,
    last_name,
    phone_no,
    gender,
    address,
    dob,
    blood_type,
    emergency_contact,
    vehicle_details,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user directory
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(&self, predicate: &str, bind: UserKey<'_>) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {predicate}");
        let query = sqlx::query_as::<_, UserRow>(&sql);

        let row = match bind {
            UserKey::Id(id) => query.bind(id.as_uuid()),
            UserKey::Phone(phone) => query.bind(phone.as_str()),
        }
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}

enum UserKey<'a> {
    Id(&'a UserId),
    Phone(&'a PhoneNumber),
}

// ============================================================================
// User Directory Implementation
// ============================================================================

impl UserDirectory for PgUserDirectory {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let profile = &user.profile;

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                first_name,
                last_name,
                phone_no,
                gender,
                address,
                dob,
                blood_type,
                emergency_contact,
                vehicle_details,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.phone_no.as_str())
        .bind(&profile.gender)
        .bind(&profile.address)
        .bind(profile.dob)
        .bind(&profile.blood_type)
        .bind(user.emergency_contact.clone().map(Json))
        .bind(user.vehicle_details.clone().map(Json))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            // users.phone_no is UNIQUE
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AuthError::UserAlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        self.fetch_one_where("user_id = $1", UserKey::Id(user_id)).await
    }

    async fn find_by_phone(&self, phone_no: &PhoneNumber) -> AuthResult<Option<User>> {
        self.fetch_one_where("phone_no = $1", UserKey::Phone(phone_no))
            .await
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    first_name: String,
    last_name: String,
    phone_no: String,
    gender: String,
    address: String,
    dob: NaiveDate,
    blood_type: String,
    emergency_contact: Option<Json<Value>>,
    vehicle_details: Option<Json<Value>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let phone_no = PhoneNumber::new(self.phone_no)
            .map_err(|e| AuthError::Internal(format!("Invalid stored phone_no: {}", e)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            profile: UserProfile {
                first_name: self.first_name,
                last_name: self.last_name,
                phone_no,
                gender: self.gender,
                address: self.address,
                dob: self.dob,
                blood_type: self.blood_type,
            },
            emergency_contact: self.emergency_contact.map(|Json(v)| v),
            vehicle_details: self.vehicle_details.map(|Json(v)| v),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
