//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].

use super::app_error::AppError;

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() {
            AppError::bad_request("Malformed JSON body").with_source(err)
        } else {
            AppError::internal("Internal server error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database unavailable")
                    .with_action("Please try again")
                    .with_source(err)
            }
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::conflict("Duplicate record").with_source(err)
            }
            _ => AppError::internal("Internal server error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // `success` / `message` are what existing clients read.
        let body = serde_json::json!({
            "success": false,
            "message": self.message(),
            "status": self.status_code(),
            "title": self.kind().as_str(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}
