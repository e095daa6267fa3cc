//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  coursehub cart checkout                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  Signed out? ─── CoreError::NotAuthenticated ──┐                 │  │
//! │  │         │                                      │                 │  │
//! │  │  Empty cart? ─── CoreError::EmptyCart ─────────┼── ApiError ───► │  │
//! │  │         │                                      │                 │  │
//! │  │  Bad form? ───── FormErrors ───────────────────┘                 │  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: "error[UNAUTHORIZED]: You must be signed in to check out"      │
//! │  exit status: non-zero                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `--json` the same error is printed to stdout as
//! `{"code": "...", "message": "..."}`.

use std::fmt;
use std::process::ExitCode;

use coursehub_core::auth::FormErrors;
use coursehub_core::CoreError;
use coursehub_store::StorageError;
use serde::Serialize;

/// API error returned from CLI commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown course id
    NotFound,

    /// Bad arguments or login form input
    ValidationError,

    /// The data directory could not be opened
    StorageError,

    /// Checkout while signed out
    Unauthorized,

    /// Cart operation failed
    CartError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::CartError => "CART_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Process exit status for this code.
    pub const fn exit_status(self) -> u8 {
        match self {
            ErrorCode::ValidationError => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::Unauthorized => 4,
            ErrorCode::CartError => 5,
            ErrorCode::StorageError => 6,
            ErrorCode::Internal => 1,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::StorageError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code.exit_status())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CourseNotFound(id) => ApiError::not_found("Course", id),
            CoreError::NotAuthenticated => ApiError::new(ErrorCode::Unauthorized, err.to_string()),
            CoreError::EmptyCart => ApiError::new(ErrorCode::CartError, err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<FormErrors> for ApiError {
    fn from(errors: FormErrors) -> Self {
        ApiError::validation(errors.to_string())
    }
}

/// Storage errors only surface when the data directory cannot be opened;
/// write failures during commands are logged by the store instead.
impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "Storage failure");
        ApiError::storage(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("Could not encode output: {err}"))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}
