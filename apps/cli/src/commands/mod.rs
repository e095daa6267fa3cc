//! # CLI Commands Module
//!
//! One function per user-facing operation. Each takes the [`AppContext`]
//! and returns a serializable response or an [`ApiError`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (Render trait)
//! ├── catalog.rs  ◄─── Course listing, detail, categories
//! ├── cart.rs     ◄─── Cart manipulation and checkout
//! ├── account.rs  ◄─── Sign in, register, sign out
//! └── theme.rs    ◄─── Light/dark preference
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  $ coursehub cart add 3                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  clap ──► Command::Cart(CartCommand::Add { id: 3 })                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(&ctx, 3) -> Result<CartChange, ApiError>   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  --json?  serde_json::to_string_pretty(&response)                       │
//! │  else     response.render(&ctx.config)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`AppContext`]: crate::state::AppContext
//! [`ApiError`]: crate::error::ApiError

pub mod account;
pub mod cart;
pub mod catalog;
pub mod theme;

use crate::config::ConfigState;

/// Human-readable form of a command response.
pub trait Render {
    fn render(&self, config: &ConfigState) -> String;
}
