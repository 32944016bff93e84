//! Error types for the Libris server

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};
use thiserror::Error;
use validator::ValidationErrors;

use crate::models::envelope::{ApiResponse, ERROR_MESSAGE_PREFIX};

/// Closed taxonomy of internal outcome codes carried in every envelope,
/// each mapped 1:1 to a transport status class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalCode {
    Success,
    InternalError,
    NotFound,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotImplemented,
    AlreadyExists,
}

impl InternalCode {
    pub fn number(self) -> u16 {
        match self {
            InternalCode::Success => 1,
            InternalCode::InternalError => 2,
            InternalCode::NotFound => 3,
            InternalCode::BadRequest => 4,
            InternalCode::Unauthorized => 5,
            InternalCode::Forbidden => 6,
            InternalCode::NotImplemented => 7,
            InternalCode::AlreadyExists => 8,
        }
    }

    /// Zero-padded wire form of the code number
    pub fn code(self) -> String {
        format!("{:03}", self.number())
    }

    pub fn description(self) -> &'static str {
        match self {
            InternalCode::Success => "Request performed successfully",
            InternalCode::InternalError => "Internal server error",
            InternalCode::NotFound => "The resource was not found",
            InternalCode::BadRequest => "Bad request, client error calling the request",
            InternalCode::Unauthorized => "Unauthorized, requires user authentication",
            InternalCode::Forbidden => "Forbidden, the request was understood but refused",
            InternalCode::NotImplemented => "Resource not implemented",
            InternalCode::AlreadyExists => "Resource already exists",
        }
    }

    pub fn http_status(self) -> StatusCode {
        match self {
            InternalCode::Success => StatusCode::OK,
            InternalCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            InternalCode::NotFound => StatusCode::NOT_FOUND,
            InternalCode::BadRequest => StatusCode::BAD_REQUEST,
            InternalCode::Unauthorized => StatusCode::UNAUTHORIZED,
            InternalCode::Forbidden => StatusCode::FORBIDDEN,
            InternalCode::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            InternalCode::AlreadyExists => StatusCode::CONFLICT,
        }
    }
}

impl Serialize for InternalCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            code: String,
            description: &'a str,
        }
        Wire {
            code: self.code(),
            description: self.description(),
        }
        .serialize(serializer)
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(BTreeMap<String, String>),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "Invalid value".to_string());
                (field.to_string(), message)
            })
            .collect();
        AppError::Validation(fields)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message, data) = match self {
            AppError::NotFound(msg) => (
                InternalCode::NotFound,
                format!("{}{}", ERROR_MESSAGE_PREFIX, msg),
                None,
            ),
            AppError::AlreadyExists(msg) => (
                InternalCode::AlreadyExists,
                format!("{}{}", ERROR_MESSAGE_PREFIX, msg),
                None,
            ),
            AppError::BadRequest(msg) => (
                InternalCode::BadRequest,
                format!("{}{}", ERROR_MESSAGE_PREFIX, msg),
                None,
            ),
            AppError::Validation(fields) => (
                InternalCode::BadRequest,
                "Please review your input and try again. Some fields require correction."
                    .to_string(),
                serde_json::to_value(fields).ok(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    InternalCode::InternalError,
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    InternalCode::InternalError,
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ApiResponse::failure(code, message, data));
        (code.http_status(), body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
