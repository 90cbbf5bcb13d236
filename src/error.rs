use sea_orm::SqlErr;

use crate::db::dao::DaoLayerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// The single message every failed login gets.
    pub fn invalid_credentials() -> Self {
        Self::Unauthorized("Invalid credentials".to_string())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl std::fmt::Display,
    ) -> Self {
        let message = message.into();
        tracing::error!(error = %source, "{message}");
        Self::Internal(message)
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::BadRequest(message)
            | Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Internal(message) => message.as_str(),
        }
    }
}

impl From<DaoLayerError> for AppError {
    fn from(err: DaoLayerError) -> Self {
        match err {
            DaoLayerError::NotFound { .. } => AppError::not_found("Resource not found"),
            DaoLayerError::InvalidPagination { .. } => AppError::bad_request(err.to_string()),
            DaoLayerError::Db(db_err) => match db_err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::conflict("Record already exists")
                }
                _ => AppError::internal_with_source("Database error", db_err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn dao_not_found_hides_the_record_id() {
        let id = Uuid::new_v4();
        let err = AppError::from(DaoLayerError::NotFound {
            entity: "address",
            id,
        });

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(!err.message().contains(&id.to_string()));
    }

    #[test]
    fn dao_pagination_maps_to_bad_request() {
        let err = AppError::from(DaoLayerError::InvalidPagination {
            page: 0,
            page_size: 10,
        });
        assert_eq!(err.message(), "Invalid pagination: page=0 page_size=10");
    }

    #[test]
    fn generic_db_error_is_internal_without_details() {
        let err = AppError::from(DaoLayerError::Db(DbErr::Custom("boom".to_string())));
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.message(), "Database error");
    }

    #[test]
    fn validation_message_is_field_specific() {
        let err = AppError::validation("cpf", "Invalid CPF");
        assert_eq!(err.to_string(), "Invalid CPF");
        assert!(matches!(err, AppError::Validation { field: "cpf", .. }));
    }
}
