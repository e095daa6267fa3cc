//! # coursehub-store: Durable State for CourseHub
//!
//! This crate owns every read and write of durable state, and the
//! [`AppStore`] handle that applies commands to the in-memory state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   UI command ──► AppStore::add_to_cart()                                │
//! │                     │                                                   │
//! │                     ├─ lock ─► AppState::apply(Action) ─► Transition    │
//! │                     │                                        │          │
//! │                     │          cart changed? ─► storage.set("cart", ..) │
//! │                     │          theme changed? ─► storage.set("theme",..)│
//! │                     └─ unlock                                           │
//! │                                                                         │
//! │   KeyValueStore (port)                                                  │
//! │     ├── MemoryStore  (tests, ephemeral sessions)                        │
//! │     └── FileStore    (one JSON file on disk)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`port`] - The storage trait and the keys the store uses
//! - [`memory`] - HashMap-backed adapter
//! - [`file`] - JSON-file-backed adapter
//! - [`store`] - `AppStore`, the command surface
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use coursehub_core::data::seed_courses;
//! use coursehub_store::{AppStore, MemoryStore};
//!
//! let courses = seed_courses();
//! let store = AppStore::open(MemoryStore::new());
//!
//! store.add_to_cart(&courses[0]);
//! store.add_to_cart(&courses[0]);
//! assert_eq!(store.cart().len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;
pub mod memory;
pub mod port;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use port::{KeyValueStore, CART_KEY, THEME_KEY};
pub use store::AppStore;
