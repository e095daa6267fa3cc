//! # Cart Commands
//!
//! Cart manipulation and the checkout gate.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────────────────┐        │
//! │  │  Empty   │────►│ In Cart  │────►│ checkout (signed in only)│        │
//! │  │  Cart    │     │          │     │ cart is left untouched   │        │
//! │  └──────────┘     └──────────┘     └──────────────────────────┘        │
//! │       ▲                │                                                │
//! │       │           add / remove                                          │
//! │       │                │                                                │
//! │       └── clear ───────┤                                                │
//! │       └── logout ──────┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every change is persisted by the store before the command returns.

use std::fmt::Write as _;

use coursehub_core::{Cart, CartItem, CartTotals, User};
use coursehub_store::KeyValueStore;
use serde::Serialize;
use tracing::{debug, info};

use super::Render;
use crate::config::ConfigState;
use crate::error::ApiError;
use crate::state::AppContext;

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

impl Render for CartResponse {
    fn render(&self, config: &ConfigState) -> String {
        if self.items.is_empty() {
            return "Your cart is empty. Browse courses to start learning.".to_string();
        }

        let mut out = format!("Shopping Cart ({} items)\n", self.totals.item_count);
        for item in &self.items {
            let _ = writeln!(
                out,
                "{:>3}  {:<40} {:>10}",
                item.course_id,
                item.title,
                config.format_currency(item.price)
            );
        }
        let _ = writeln!(
            out,
            "     {:<40} {:>10}",
            "Original price",
            config.format_currency(self.totals.original_total)
        );
        if self.totals.savings.is_positive() {
            let _ = writeln!(
                out,
                "     {:<40} {:>10}",
                "Discount",
                format!("-{}", config.format_currency(self.totals.savings))
            );
        }
        let _ = write!(
            out,
            "     {:<40} {:>10}",
            "Total",
            config.format_currency(self.totals.subtotal)
        );
        out
    }
}

/// Result of an add or remove.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartChange {
    /// `false` when the command left the cart as it was.
    pub changed: bool,
    pub message: String,
    pub cart: CartResponse,
}

impl Render for CartChange {
    fn render(&self, config: &ConfigState) -> String {
        format!("{}\n\n{}", self.message, self.cart.render(config))
    }
}

/// What a successful checkout would charge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub user: User,
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl Render for CheckoutResponse {
    fn render(&self, config: &ConfigState) -> String {
        format!(
            "Checkout for {} <{}>: {} course(s), total {}",
            self.user.name,
            self.user.email,
            self.totals.item_count,
            config.format_currency(self.totals.subtotal)
        )
    }
}

// =============================================================================
// Commands
// =============================================================================

pub fn get_cart<S: KeyValueStore>(ctx: &AppContext<S>) -> CartResponse {
    debug!("get_cart command");
    ctx.store.with_state(|s| CartResponse::from(&s.cart))
}

/// Adds a course by id. Adding one already in the cart is not an error.
pub fn add_to_cart<S: KeyValueStore>(
    ctx: &AppContext<S>,
    course_id: u32,
) -> Result<CartChange, ApiError> {
    debug!(course_id, "add_to_cart command");
    let course = ctx.course(course_id)?;

    let changed = ctx.store.add_to_cart(course);
    let message = if changed {
        format!("Added \"{}\" to your cart.", course.title)
    } else {
        format!("\"{}\" is already in your cart.", course.title)
    };

    Ok(CartChange {
        changed,
        message,
        cart: get_cart(ctx),
    })
}

/// Removes a course by id. Removing one that is not there is not an error.
pub fn remove_from_cart<S: KeyValueStore>(ctx: &AppContext<S>, course_id: u32) -> CartChange {
    debug!(course_id, "remove_from_cart command");

    let changed = ctx.store.remove_from_cart(course_id);
    let message = if changed {
        format!("Removed course {course_id} from your cart.")
    } else {
        format!("Course {course_id} was not in your cart.")
    };

    CartChange {
        changed,
        message,
        cart: get_cart(ctx),
    }
}

pub fn clear_cart<S: KeyValueStore>(ctx: &AppContext<S>) -> CartResponse {
    debug!("clear_cart command");
    ctx.store.clear_cart();
    get_cart(ctx)
}

/// Runs the checkout gate against the current session.
pub fn checkout<S: KeyValueStore>(ctx: &AppContext<S>) -> Result<CheckoutResponse, ApiError> {
    debug!("checkout command");
    let response = ctx.store.with_state(|s| {
        s.checkout().map(|(user, totals)| CheckoutResponse {
            user: user.clone(),
            items: s.cart.items().to_vec(),
            totals,
        })
    })?;

    info!(
        user_id = response.user.id,
        items = response.totals.item_count,
        "Checkout accepted"
    );
    Ok(response)
}
