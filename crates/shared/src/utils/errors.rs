use anyhow::Error as AnyhowError;
use bcrypt::BcryptError;
use jsonwebtoken::errors::Error as JwtError;
use sea_query::error::Error as SeaQueryError;
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error;
use validator::ValidationErrors;

const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    SqlxError(#[from] SqlxError),

    #[error("Query builder error: {0}")]
    QueryBuilderError(#[from] SeaQueryError),

    #[error("Hashing error: {0}")]
    HashingError(#[from] BcryptError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpiredError,

    #[error("Token validation error")]
    TokenValidationError,

    #[error("Token generation error: {0}")]
    TokenGenerationError(#[from] JwtError),

    #[error("Bcrypt error: {0}")]
    BcryptError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Username already exists")]
    UsernameAlreadyExists,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(ValidationErrors),

    #[error("Balance overflow for user {0}")]
    BalanceOverflow(i32),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Maps constraint violations raised by Postgres to domain errors, leaving
    /// everything else as a plain database error.
    pub fn from_constraint(err: SqlxError, conflict_message: &str) -> Self {
        if let SqlxError::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some(FOREIGN_KEY_VIOLATION) | Some(UNIQUE_VIOLATION) => {
                    return AppError::Conflict(conflict_message.to_string());
                }
                _ => {}
            }
        }
        AppError::SqlxError(err)
    }
}

impl From<AnyhowError> for AppError {
    fn from(err: AnyhowError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::ValidationError(err)
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}
