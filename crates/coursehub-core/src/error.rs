//! # Error Types
//!
//! Domain-specific error types for coursehub-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  coursehub-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Form input validation failures                 │
//! │                                                                         │
//! │  coursehub-store errors (separate crate)                               │
//! │  └── StorageError     - Durable storage failures                       │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → User                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note what is NOT an error here: an empty query result, an unknown sort
//! key, adding a course twice, or removing a course that is not in the cart.
//! Those are all defined no-ops or fallbacks.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Course id does not exist in the catalog.
    ///
    /// ## When This Occurs
    /// - Course detail page opened with a stale or hand-typed id
    /// - "Add to cart" invoked with an id the catalog never had
    #[error("Course not found: {0}")]
    CourseNotFound(u32),

    /// Checkout attempted without a signed-in user.
    #[error("You must be signed in to check out")]
    NotAuthenticated,

    /// Checkout attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Each variant carries the form field it belongs to, so a login page can
/// place the message under the right input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{}", required_message(field))]
    Required { field: String },

    /// Field value is too short.
    #[error("{} must be at least {min} characters", label(field))]
    TooShort { field: String, min: usize },

    /// Invalid format (e.g., malformed email).
    #[error("{} is invalid", label(field))]
    InvalidFormat { field: String },

    /// The password confirmation does not repeat the password.
    #[error("Passwords do not match")]
    Mismatch { field: String },
}

impl ValidationError {
    /// Returns the name of the field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::InvalidFormat { field }
            | ValidationError::Mismatch { field } => field,
        }
    }
}

/// Form field name as shown to the user: `email` becomes `Email`.
fn label(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn required_message(field: &str) -> String {
    match field {
        "confirmPassword" => "Please confirm your password".to_string(),
        _ => format!("{} is required", label(field)),
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
