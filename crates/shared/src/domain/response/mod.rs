use crate::{domain::response::pagination::Pagination, utils::AppError};
use axum::http::StatusCode;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::fmt::Formatter;
use utoipa::ToSchema;

pub mod activity_log;
pub mod auth;
pub mod biaya_lain;
pub mod modal;
pub mod pagination;
pub mod report;
pub mod saldo;
pub mod tarik_kredit;
pub mod tarik_tunai;
pub mod transfer;
pub mod transfer_debit;
pub mod user;

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data,
        }
    }
}

impl<T: std::fmt::Debug> fmt::Display for ApiResponse<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ApiResponse {{ status: {}, message: {}, data: {:?} }}",
            self.status, self.message, self.data
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ApiResponsePagination<T> {
    pub status: String,
    pub message: String,
    pub data: T,
    pub pagination: Pagination,
}

impl<T: Serialize> fmt::Display for ApiResponsePagination<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{json}"),
            Err(e) => write!(f, "Error serializing ApiResponse to JSON: {e}"),
        }
    }
}

/// A ledger row together with its owner's balance as committed in the same
/// transaction.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct LedgerWriteResponse<T> {
    pub record: T,
    pub total_saldo: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    #[serde(skip)]
    #[schema(ignore)]
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        let status = if code.is_server_error() {
            "error"
        } else {
            "fail"
        };

        Self {
            status: status.to_string(),
            message: message.into(),
            code: code.as_u16(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        match error {
            AppError::SqlxError(_) | AppError::QueryBuilderError(_) => ErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error occurred",
            ),
            AppError::HashingError(_) | AppError::BcryptError(_) => ErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error during password hashing",
            ),
            AppError::InvalidCredentials => {
                ErrorResponse::new(StatusCode::UNAUTHORIZED, "Invalid username or password")
            }
            AppError::TokenExpiredError => {
                ErrorResponse::new(StatusCode::UNAUTHORIZED, "Token has expired")
            }
            AppError::TokenValidationError => {
                ErrorResponse::new(StatusCode::UNAUTHORIZED, "Token validation failed")
            }
            AppError::TokenGenerationError(_) => {
                ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "Token generation failed")
            }
            AppError::NotFound(msg) => ErrorResponse::new(StatusCode::NOT_FOUND, msg),
            AppError::Forbidden(msg) => ErrorResponse::new(StatusCode::FORBIDDEN, msg),
            AppError::Conflict(msg) => ErrorResponse::new(StatusCode::CONFLICT, msg),
            AppError::UsernameAlreadyExists => {
                ErrorResponse::new(StatusCode::CONFLICT, "Username already exists")
            }
            AppError::BadRequest(msg) => ErrorResponse::new(StatusCode::BAD_REQUEST, msg),
            AppError::ValidationError(errors) => ErrorResponse::new(
                StatusCode::BAD_REQUEST,
                format!("Validation error: {errors}"),
            ),
            AppError::BalanceOverflow(user_id) => ErrorResponse::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Balance of user {user_id} is out of range"),
            ),
            AppError::InternalError(msg) => {
                ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status: {}, Message: {}", self.status, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_http_statuses() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (AppError::UsernameAlreadyExists, StatusCode::CONFLICT),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::TokenExpiredError, StatusCode::UNAUTHORIZED),
            (AppError::BalanceOverflow(1), StatusCode::UNPROCESSABLE_ENTITY),
            (
                AppError::InternalError("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ErrorResponse::from(err).status_code(), expected);
        }
    }

    #[test]
    fn database_details_are_not_leaked() {
        let err = ErrorResponse::from(AppError::SqlxError(sqlx::Error::RowNotFound));
        assert_eq!(err.message, "Database error occurred");
        assert_eq!(err.status, "error");

        let json = serde_json::to_value(&err).unwrap();
        assert!(json.get("code").is_none());
    }
}
