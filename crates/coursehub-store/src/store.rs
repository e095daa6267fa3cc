//! # App Store
//!
//! The only component allowed to mutate [`AppState`]. Commands lock, apply
//! one [`Action`], persist the slices the transition touched, and unlock.
//!
//! ## Thread Safety
//! State and storage sit behind one `Mutex` because:
//! 1. The reducer is read-modify-write on shared state
//! 2. A reader must never see a half-applied command
//! 3. Writes for one command must land before the next command runs
//!
//! ## Persistence Is Best-Effort
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_to_cart(course)                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  state.apply(AddToCart) ──► cart changed                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  storage.set("cart", json) ──► Err? ──► warn!, keep the new cart       │
//! │                                                                         │
//! │  The in-memory change is never rolled back.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use coursehub_core::{
    Action, AppSnapshot, AppState, Cart, CartItem, Course, Theme, Transition, User,
};
use tracing::{debug, info, warn};

use crate::port::{KeyValueStore, CART_KEY, THEME_KEY};

struct Inner<S> {
    state: AppState,
    storage: S,
}

/// Shared application state handle.
///
/// Construct one per process with [`AppStore::open`] and pass it to every UI
/// surface that needs it.
pub struct AppStore<S: KeyValueStore> {
    inner: Mutex<Inner<S>>,
}

impl<S: KeyValueStore> AppStore<S> {
    /// Restores theme and cart from `storage` and starts signed out.
    ///
    /// Missing values fall back to the defaults. Unreadable values are
    /// logged and also fall back; this never fails.
    pub fn open(storage: S) -> Self {
        let mut state = AppState::default();

        if let Some(theme) = load_theme(&storage) {
            state.apply(Action::LoadTheme(theme));
        }
        if let Some(cart) = load_cart(&storage) {
            state.apply(Action::LoadCart(cart));
        }

        info!(
            theme = %state.theme,
            cart_items = state.cart.len(),
            "App state restored"
        );

        AppStore {
            inner: Mutex::new(Inner { state, storage }),
        }
    }

    /// Applies one action and persists whatever it changed.
    ///
    /// Returns the transition so callers can tell a no-op from a change.
    pub fn dispatch(&self, action: Action) -> Transition {
        let mut inner = self.lock();
        debug!(?action, "dispatch");

        let transition = inner.state.apply(action);
        inner.persist(transition);
        transition
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Flips light/dark and returns the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let mut inner = self.lock();
        let transition = inner.state.apply(Action::ToggleTheme);
        inner.persist(transition);
        debug!(theme = %inner.state.theme, "Theme toggled");
        inner.state.theme
    }

    /// Adds a course unless it is already in the cart.
    ///
    /// Returns `true` if it was added.
    pub fn add_to_cart(&self, course: &Course) -> bool {
        self.dispatch(Action::AddToCart(CartItem::from_course(course)))
            .cart
    }

    /// Removes a course from the cart. Returns `true` if it was there.
    pub fn remove_from_cart(&self, course_id: u32) -> bool {
        self.dispatch(Action::RemoveFromCart(course_id)).cart
    }

    pub fn clear_cart(&self) {
        self.dispatch(Action::ClearCart);
    }

    /// Signs `user` in. The session lasts until logout or process exit.
    pub fn login(&self, user: User) {
        info!(user_id = user.id, "User signed in");
        self.dispatch(Action::Login(user));
    }

    /// Signs out and empties the cart.
    pub fn logout(&self) {
        info!("User signed out");
        self.dispatch(Action::Logout);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Runs `f` against a consistent view of the state.
    ///
    /// ## Usage
    /// ```rust
    /// # use coursehub_store::{AppStore, MemoryStore};
    /// let store = AppStore::open(MemoryStore::new());
    /// let badge = store.with_state(|s| s.cart.len());
    /// assert_eq!(badge, 0);
    /// ```
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        let inner = self.lock();
        f(&inner.state)
    }

    pub fn snapshot(&self) -> AppSnapshot {
        self.with_state(AppState::snapshot)
    }

    pub fn theme(&self) -> Theme {
        self.with_state(|s| s.theme)
    }

    pub fn cart(&self) -> Cart {
        self.with_state(|s| s.cart.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.with_state(|s| s.user().cloned())
    }

    pub fn is_authenticated(&self) -> bool {
        self.with_state(AppState::is_authenticated)
    }

    /// Consumes the store and returns its storage backend.
    pub fn into_storage(self) -> S {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .storage
    }

    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        // A panic mid-command leaves the previous consistent state in place;
        // apply() has no partial writes to observe.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: KeyValueStore> Inner<S> {
    /// Writes the slices `transition` marks as changed.
    fn persist(&mut self, transition: Transition) {
        if transition.theme {
            if let Err(err) = self.storage.set(THEME_KEY, self.state.theme.as_str()) {
                warn!(error = %err, "Failed to persist theme");
            }
        }

        if transition.cart {
            let result = self
                .state
                .cart
                .to_json()
                .map_err(crate::StorageError::from)
                .and_then(|json| self.storage.set(CART_KEY, &json));
            if let Err(err) = result {
                warn!(error = %err, "Failed to persist cart");
            }
        }
    }
}

impl<S: KeyValueStore + std::fmt::Debug> std::fmt::Debug for AppStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("AppStore")
            .field("state", &inner.state)
            .field("storage", &inner.storage)
            .finish()
    }
}

fn load_theme(storage: &impl KeyValueStore) -> Option<Theme> {
    match storage.get(THEME_KEY) {
        Ok(Some(raw)) => {
            let theme = Theme::from_persisted(&raw);
            if theme.is_none() {
                warn!(value = %raw, "Ignoring unrecognized stored theme");
            }
            theme
        }
        Ok(None) => None,
        Err(err) => {
            warn!(error = %err, "Could not read stored theme");
            None
        }
    }
}

fn load_cart(storage: &impl KeyValueStore) -> Option<Cart> {
    match storage.get(CART_KEY) {
        Ok(Some(raw)) => match Cart::from_json(&raw) {
            Ok(cart) => Some(cart),
            Err(err) => {
                warn!(error = %err, "Ignoring malformed stored cart");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            warn!(error = %err, "Could not read stored cart");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
