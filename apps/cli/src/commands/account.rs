//! # Account Commands
//!
//! Sign in, register, sign out and "who am I".
//!
//! There is no account backend: a form that passes validation signs in a
//! fabricated user. The session lives in memory only, so it ends with the
//! process; use `coursehub shell` to keep one across commands.

use clap::Args;
use coursehub_core::auth::{self, AuthMode, LoginForm};
use coursehub_core::User;
use coursehub_store::KeyValueStore;
use serde::Serialize;
use tracing::debug;

use super::Render;
use crate::config::ConfigState;
use crate::error::ApiError;
use crate::state::AppContext;

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginArgs {
    #[arg(long, short, default_value = "")]
    pub email: String,

    #[arg(long, short, default_value = "")]
    pub password: String,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterArgs {
    /// Full name shown in the header
    #[arg(long, short, default_value = "")]
    pub name: String,

    #[arg(long, short, default_value = "")]
    pub email: String,

    #[arg(long, short, default_value = "")]
    pub password: String,

    /// Must repeat --password
    #[arg(long = "confirm-password", short = 'c', default_value = "")]
    pub confirm_password: String,
}

impl From<&LoginArgs> for LoginForm {
    fn from(args: &LoginArgs) -> Self {
        LoginForm {
            email: args.email.clone(),
            password: args.password.clone(),
            ..LoginForm::default()
        }
    }
}

impl From<&RegisterArgs> for LoginForm {
    fn from(args: &RegisterArgs) -> Self {
        LoginForm {
            name: args.name.clone(),
            email: args.email.clone(),
            password: args.password.clone(),
            confirm_password: args.confirm_password.clone(),
        }
    }
}

/// Current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub is_authenticated: bool,
    pub user: Option<User>,
}

impl SessionResponse {
    fn current<S: KeyValueStore>(ctx: &AppContext<S>) -> Self {
        let user = ctx.store.user();
        SessionResponse {
            is_authenticated: user.is_some(),
            user,
        }
    }
}

impl Render for SessionResponse {
    fn render(&self, _config: &ConfigState) -> String {
        match &self.user {
            Some(user) => format!("Signed in as {} <{}>", user.name, user.email),
            None => "Not signed in.".to_string(),
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

pub fn login<S: KeyValueStore>(
    ctx: &AppContext<S>,
    args: &LoginArgs,
) -> Result<SessionResponse, ApiError> {
    debug!(email = %args.email, "login command");
    sign_in(ctx, &LoginForm::from(args), AuthMode::SignIn)
}

pub fn register<S: KeyValueStore>(
    ctx: &AppContext<S>,
    args: &RegisterArgs,
) -> Result<SessionResponse, ApiError> {
    debug!(email = %args.email, "register command");
    sign_in(ctx, &LoginForm::from(args), AuthMode::Register)
}

fn sign_in<S: KeyValueStore>(
    ctx: &AppContext<S>,
    form: &LoginForm,
    mode: AuthMode,
) -> Result<SessionResponse, ApiError> {
    let user = auth::authenticate(form, mode)?;
    ctx.store.login(user);
    Ok(SessionResponse::current(ctx))
}

/// Signs out. The cart is emptied too.
pub fn logout<S: KeyValueStore>(ctx: &AppContext<S>) -> SessionResponse {
    debug!("logout command");
    ctx.store.logout();
    SessionResponse::current(ctx)
}

pub fn whoami<S: KeyValueStore>(ctx: &AppContext<S>) -> SessionResponse {
    SessionResponse::current(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, get_cart};
    use crate::error::ErrorCode;
    use crate::state::testing::context;

    #[test]
    fn test_login_uses_demo_name() {
        let ctx = context();
        let args = LoginArgs {
            email: "ada@example.com".to_string(),
            password: "123456".to_string(),
        };
        let session = login(&ctx, &args).unwrap();
        assert!(session.is_authenticated);

        let user = session.user.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn test_login_rejects_short_password() {
        let ctx = context();
        let args = LoginArgs {
            email: "ada@example.com".to_string(),
            password: "12345".to_string(),
        };
        let err = login(&ctx, &args).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(!whoami(&ctx).is_authenticated);
    }

    #[test]
    fn test_register_uses_given_name() {
        let ctx = context();
        let args = RegisterArgs {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "engine1".to_string(),
            confirm_password: "engine1".to_string(),
        };
        let session = register(&ctx, &args).unwrap();
        assert_eq!(session.user.unwrap().name, "Ada Lovelace");
    }

    #[test]
    fn test_register_reports_every_problem() {
        let ctx = context();
        let args = RegisterArgs {
            email: "not-an-email".to_string(),
            password: "engine1".to_string(),
            confirm_password: "engine2".to_string(),
            ..RegisterArgs::default()
        };
        let err = register(&ctx, &args).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            err.message,
            "Name is required; Email is invalid; Passwords do not match"
        );
    }

    #[test]
    fn test_logout_empties_cart() {
        let ctx = context();
        let args = LoginArgs {
            email: "ada@example.com".to_string(),
            password: "123456".to_string(),
        };
        login(&ctx, &args).unwrap();
        add_to_cart(&ctx, 1).unwrap();

        let session = logout(&ctx);
        assert!(!session.is_authenticated);
        assert_eq!(session.render(&ctx.config), "Not signed in.");
        assert!(get_cart(&ctx).items.is_empty());
    }
}
