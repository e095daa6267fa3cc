//! # Application State
//!
//! The single mutable aggregate of the front end (theme, cart, auth) and the
//! pure transition function that updates it.
//!
//! ## Authentication State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │                 Login(user)                                             │
//! │   ┌───────────┐ ──────────────────────► ┌──────────────────────┐       │
//! │   │ Anonymous │                          │ Authenticated(user)  │       │
//! │   └───────────┘ ◄────────────────────── └──────────────────────┘       │
//! │        ▲            Logout (clears cart)                                │
//! │        │                                                                │
//! │   process start (auth is never restored from storage)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `apply` performs no I/O. It reports which persisted slices changed in a
//! [`Transition`], and the caller decides what to write.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartItem, CartTotals};
use crate::error::{CoreError, CoreResult};
use crate::types::{Theme, User};

// =============================================================================
// Auth State
// =============================================================================

/// Who is using the app.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl AuthState {
    #[inline]
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated(user) => Some(user),
        }
    }

    #[inline]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

// =============================================================================
// Actions
// =============================================================================

/// Every way the state can change. Closed set; dispatch is a `match`.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleTheme,
    /// Append unless the course is already present.
    AddToCart(CartItem),
    /// Remove by course id; absent ids are ignored.
    RemoveFromCart(u32),
    ClearCart,
    Login(User),
    /// Sign out and empty the cart.
    Logout,
    /// Replace the cart with one restored from storage.
    LoadCart(Cart),
    /// Replace the theme with one restored from storage.
    LoadTheme(Theme),
}

/// Which persisted slices an action changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    pub theme: bool,
    pub cart: bool,
}

impl Transition {
    const NONE: Transition = Transition {
        theme: false,
        cart: false,
    };

    const THEME: Transition = Transition {
        theme: true,
        cart: false,
    };

    const fn cart(changed: bool) -> Self {
        Transition {
            theme: false,
            cart: changed,
        }
    }

    /// Whether anything needs persisting.
    #[inline]
    pub fn is_noop(&self) -> bool {
        !self.theme && !self.cart
    }
}

// =============================================================================
// App State
// =============================================================================

/// Theme preference, cart contents and authentication status.
///
/// `user` and `is_authenticated` both derive from [`AuthState`], so they
/// cannot disagree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub theme: Theme,
    pub cart: Cart,
    pub auth: AuthState,
}

impl AppState {
    /// Applies one action in place.
    ///
    /// ## Rules
    /// - `Logout` clears the cart even when nobody is signed in, and always
    ///   reports the cart as changed so an empty cart gets written.
    /// - `Login` never touches the cart.
    /// - `LoadCart`/`LoadTheme` report no change: the value came from
    ///   storage, there is nothing new to write back.
    pub fn apply(&mut self, action: Action) -> Transition {
        match action {
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                Transition::THEME
            }
            Action::AddToCart(item) => Transition::cart(self.cart.add(item)),
            Action::RemoveFromCart(course_id) => Transition::cart(self.cart.remove(course_id)),
            Action::ClearCart => {
                self.cart.clear();
                Transition::cart(true)
            }
            Action::Login(user) => {
                self.auth = AuthState::Authenticated(user);
                Transition::NONE
            }
            Action::Logout => {
                self.auth = AuthState::Anonymous;
                self.cart.clear();
                Transition::cart(true)
            }
            Action::LoadCart(cart) => {
                self.cart = cart;
                Transition::NONE
            }
            Action::LoadTheme(theme) => {
                self.theme = theme;
                Transition::NONE
            }
        }
    }

    #[inline]
    pub fn user(&self) -> Option<&User> {
        self.auth.user()
    }

    #[inline]
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    /// Checks the cart can be checked out and returns what would be charged.
    ///
    /// Sign-in is checked first. The cart is left as it is.
    pub fn checkout(&self) -> CoreResult<(&User, CartTotals)> {
        let user = self.auth.user().ok_or(CoreError::NotAuthenticated)?;
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        Ok((user, CartTotals::from(&self.cart)))
    }

    /// Read-only view handed to UI consumers.
    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            theme: self.theme,
            cart: self.cart.clone(),
            user: self.auth.user().cloned(),
            is_authenticated: self.auth.is_authenticated(),
        }
    }
}

/// Serializable copy of the state for UI surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AppSnapshot {
    pub theme: Theme,
    pub cart: Cart,
    pub user: Option<User>,
    pub is_authenticated: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
