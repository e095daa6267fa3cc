//! # Storage Port
//!
//! The key-value interface the store persists through. Two keys are used,
//! nothing else is read or written.
//!
//! | Key     | Value                                   |
//! |---------|-----------------------------------------|
//! | `theme` | `"light"` or `"dark"`                   |
//! | `cart`  | JSON array of cart items (course ids)   |

use crate::error::StorageResult;

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "theme";

/// Storage key of the serialized cart.
pub const CART_KEY: &str = "cart";

/// A durable string key-value store, in the spirit of browser local storage.
///
/// Calls are synchronous. Last write wins on the same key.
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}
