//! # Sign-in and Registration
//!
//! Form validation for the login page and the local user record it
//! fabricates on success.
//!
//! This is NOT an authentication system: no password is checked against
//! anything. A form that passes validation produces a [`User`], which the
//! store then holds as `Authenticated(user)` until logout or restart.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field             Sign in                  Register                    │
//! │  ─────             ───────                  ────────                    │
//! │  email             required, x@y.z shape    required, x@y.z shape       │
//! │  password          required, >= 6 chars     required, >= 6 chars        │
//! │  name              -                        required                    │
//! │  confirmPassword   -                        required, == password       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::User;

/// Minimum password length accepted by the form.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Display name given to anyone who signs in (as opposed to registering).
pub const DEMO_USER_NAME: &str = "John Doe";

/// Avatar assigned to fabricated users.
pub const DEFAULT_AVATAR: &str =
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face";

/// Which form the login page is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthMode {
    #[default]
    SignIn,
    Register,
}

/// Raw form input. Fields not used by the current mode are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// All field errors of one submission, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<ValidationError>);

impl FormErrors {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// The error shown under `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field() == field)
    }

    fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// Validates a submission for the given mode.
pub fn validate(form: &LoginForm, mode: AuthMode) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();

    if mode == AuthMode::Register && form.name.is_empty() {
        errors.push(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if form.email.is_empty() {
        errors.push(ValidationError::Required {
            field: "email".to_string(),
        });
    } else if !looks_like_email(&form.email) {
        errors.push(ValidationError::InvalidFormat {
            field: "email".to_string(),
        });
    }

    if form.password.is_empty() {
        errors.push(ValidationError::Required {
            field: "password".to_string(),
        });
    } else if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    if mode == AuthMode::Register {
        if form.confirm_password.is_empty() {
            errors.push(ValidationError::Required {
                field: "confirmPassword".to_string(),
            });
        } else if form.password != form.confirm_password {
            errors.push(ValidationError::Mismatch {
                field: "confirmPassword".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the form and fabricates the signed-in user.
///
/// ```rust
/// use coursehub_core::auth::{authenticate, AuthMode, LoginForm};
///
/// let form = LoginForm {
///     email: "ada@example.com".to_string(),
///     password: "hunter22".to_string(),
///     ..LoginForm::default()
/// };
/// let user = authenticate(&form, AuthMode::SignIn).unwrap();
/// assert_eq!(user.name, "John Doe");
/// assert_eq!(user.email, "ada@example.com");
/// ```
pub fn authenticate(form: &LoginForm, mode: AuthMode) -> Result<User, FormErrors> {
    validate(form, mode)?;

    let name = match mode {
        AuthMode::SignIn => DEMO_USER_NAME.to_string(),
        AuthMode::Register => form.name.clone(),
    };

    Ok(User {
        id: 1,
        name,
        email: form.email.clone(),
        avatar: DEFAULT_AVATAR.to_string(),
    })
}

/// Loose email shape check: some non-space text, `@`, non-space text, `.`,
/// non-space text. Matches `\S+@\S+\.\S+` anywhere in the input.
fn looks_like_email(input: &str) -> bool {
    input.split_whitespace().any(|word| {
        word.char_indices()
            .filter(|&(_, c)| c == '@')
            .any(|(at, _)| {
                let local = &word[..at];
                let domain = &word[at + 1..];
                !local.is_empty()
                    && domain
                        .char_indices()
                        .any(|(dot, c)| c == '.' && dot > 0 && dot + 1 < domain.len())
            })
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_in(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
            ..LoginForm::default()
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("a@b.c"));
        assert!(looks_like_email("first.last@example.co.uk"));
        assert!(looks_like_email("  padded@example.com  "));
        assert!(looks_like_email("a@@b.c"));

        assert!(!looks_like_email("plainaddress"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("user@example"));
        assert!(!looks_like_email("user@.com"));
        assert!(!looks_like_email("user@example."));
        assert!(!looks_like_email("user @example.com"));
    }

    #[test]
    fn test_sign_in_valid() {
        assert!(validate(&sign_in("ada@example.com", "secret"), AuthMode::SignIn).is_ok());
    }

    #[test]
    fn test_sign_in_errors_per_field() {
        let errors = validate(&sign_in("", ""), AuthMode::SignIn).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.for_field("email").unwrap().to_string(), "Email is required");
        assert_eq!(
            errors.for_field("password").unwrap().to_string(),
            "Password is required"
        );

        let errors = validate(&sign_in("nope", "12345"), AuthMode::SignIn).unwrap_err();
        assert!(matches!(
            errors.for_field("email"),
            Some(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            errors.for_field("password"),
            Some(ValidationError::TooShort { min: 6, .. })
        ));
    }

    #[test]
    fn test_sign_in_ignores_registration_fields() {
        let form = sign_in("ada@example.com", "secret");
        assert!(form.name.is_empty());
        assert!(form.confirm_password.is_empty());
        assert!(validate(&form, AuthMode::SignIn).is_ok());
    }

    #[test]
    fn test_register_requires_name_and_matching_confirmation() {
        let mut form = sign_in("ada@example.com", "secret");
        let errors = validate(&form, AuthMode::Register).unwrap_err();
        assert!(errors.for_field("name").is_some());
        assert!(matches!(
            errors.for_field("confirmPassword"),
            Some(ValidationError::Required { .. })
        ));

        form.name = "Ada Lovelace".to_string();
        form.confirm_password = "secreT".to_string();
        let errors = validate(&form, AuthMode::Register).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors.for_field("confirmPassword"),
            Some(ValidationError::Mismatch { .. })
        ));
        assert_eq!(errors.to_string(), "Passwords do not match");

        form.confirm_password = "secret".to_string();
        assert!(validate(&form, AuthMode::Register).is_ok());
    }

    #[test]
    fn test_authenticate_fabricates_user() {
        let user = authenticate(&sign_in("ada@example.com", "secret"), AuthMode::SignIn).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.name, DEMO_USER_NAME);
        assert_eq!(user.avatar, DEFAULT_AVATAR);

        let form = LoginForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
        };
        let user = authenticate(&form, AuthMode::Register).unwrap();
        assert_eq!(user.name, "Ada Lovelace");
    }

    #[test]
    fn test_form_errors_display() {
        let errors = validate(&sign_in("", "abc"), AuthMode::SignIn).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "Email is required; Password must be at least 6 characters"
        );
    }
}
