use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum AdminError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{0}")]
    Invalid(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Identity context is not available outside its provider")]
    ContextUnavailable,
}

impl AdminError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        AdminError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Maps a store-level unique violation onto a validation failure.
    pub fn from_conflict(err: SqlxError, message: impl Into<String>) -> Self {
        match &err {
            SqlxError::Database(db) if db.is_unique_violation() => {
                AdminError::Invalid(message.into())
            }
            _ => AdminError::Database(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AdminError::MissingField(_) | AdminError::Invalid(_) => StatusCode::BAD_REQUEST,
            AdminError::NotFound { .. } => StatusCode::NOT_FOUND,
            AdminError::Database(_)
            | AdminError::Json(_)
            | AdminError::Io(_)
            | AdminError::ContextUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

/// Error body shared by every endpoint: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_lookup_errors_keep_their_message() {
        let err = AdminError::MissingField("studentId");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Missing required field: studentId");

        let err = AdminError::not_found("Template", "abc");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Template not found: abc");
    }

    #[test]
    fn internal_errors_map_to_500() {
        let err = AdminError::Database(SqlxError::RowNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AdminError::ContextUnavailable.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn non_unique_database_errors_stay_internal() {
        let err = AdminError::from_conflict(SqlxError::RowNotFound, "taken");
        assert!(matches!(err, AdminError::Database(_)));
    }
}
