//! # coursehub-core: Pure Domain Logic for CourseHub
//!
//! This crate holds everything the course marketplace front end computes,
//! as pure functions and plain data with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CourseHub Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI surfaces (CLI / web)                      │   │
//! │  │    Catalog ──► Course Detail ──► Cart ──► Login                 │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │ query()                      │ commands              │
//! │  ┌──────────────▼─────────────────┐  ┌─────────▼──────────────────┐   │
//! │  │   ★ coursehub-core (THIS) ★   │◄─┤   coursehub-store          │   │
//! │  │                                │  │   AppStore + storage port  │   │
//! │  │  catalog  cart  state  auth    │  └────────────────────────────┘   │
//! │  │  NO I/O • PURE FUNCTIONS       │                                    │
//! │  └────────────────────────────────┘                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Course, Level, Theme, User)
//! - [`money`] - Money type with integer arithmetic
//! - [`catalog`] - Catalog query engine (filter + stable sort)
//! - [`cart`] - Cart with one-entry-per-course semantics
//! - [`state`] - Reducer-style application state machine
//! - [`auth`] - Login/registration form validation
//! - [`data`] - The seeded six-course catalog
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use coursehub_core::catalog::{query, CatalogQuery, Selection};
//! use coursehub_core::data::seed_courses;
//!
//! let courses = seed_courses();
//! let params = CatalogQuery {
//!     category: Selection::from_param("Design"),
//!     ..CatalogQuery::default()
//! };
//!
//! let visible = query(&courses, &params);
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].title, "UI/UX Design Masterclass");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod data;
pub mod error;
pub mod money;
pub mod state;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, CartTotals};
pub use catalog::{CatalogQuery, Selection, SortKey};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use state::{Action, AppSnapshot, AppState, AuthState, Transition};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sentinel used by the catalog filters to mean "no restriction".
pub const ALL: &str = "All";

/// Default price ceiling of the catalog price slider, in whole dollars.
pub const DEFAULT_MAX_PRICE_DOLLARS: i64 = 500;
