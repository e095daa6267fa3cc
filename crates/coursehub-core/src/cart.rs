//! # Cart
//!
//! The shopping cart: an ordered list of course snapshots, at most one per
//! course id.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation          Effect                          Changed?            │
//! │  ─────────          ──────                          ────────            │
//! │  add(course)        push to end                     true                │
//! │  add(same course)   nothing                         false               │
//! │  remove(id)         drop matching entry, keep order true if present     │
//! │  remove(missing)    nothing                         false               │
//! │  clear()            empty                           true if non-empty   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Courses are bought once, so there is no quantity: a second "add to cart"
//! is a no-op, not an increment.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Course, Level};

/// A course in the cart.
///
/// Snapshot of the fields the cart page renders, frozen when the course was
/// added. Serialized with the course id under `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Course id; unique within a cart.
    #[serde(rename = "id")]
    pub course_id: u32,

    pub title: String,

    pub instructor: String,

    pub image: String,

    pub price: Money,

    /// List price; older cart entries may lack it.
    #[serde(default)]
    pub original_price: Option<Money>,

    #[serde(default)]
    pub duration: String,

    #[serde(default)]
    pub level: Option<Level>,
}

impl CartItem {
    /// Freezes a course into a cart entry.
    pub fn from_course(course: &Course) -> Self {
        CartItem {
            course_id: course.id,
            title: course.title.clone(),
            instructor: course.instructor.clone(),
            image: course.image.clone(),
            price: course.price,
            original_price: Some(course.original_price),
            duration: course.duration.clone(),
            level: Some(course.level),
        }
    }

    /// List price, falling back to the selling price when unknown.
    #[inline]
    pub fn list_price(&self) -> Money {
        self.original_price.unwrap_or(self.price)
    }

    /// Whether the list price is above the selling price.
    #[inline]
    pub fn has_discount(&self) -> bool {
        self.list_price() > self.price
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - At most one item per `course_id`
/// - Items stay in insertion order; removal never reorders the rest
///
/// Serializes as a bare JSON array of items. Deserializing goes through
/// [`Cart::from_items`], so repeated ids collapse there too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Cart(Vec<CartItem>);

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartItem>::deserialize(deserializer).map(Cart::from_items)
    }
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Builds a cart from persisted items, dropping repeated course ids.
    ///
    /// The first occurrence of an id wins, so order is preserved.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            cart.add(item);
        }
        cart
    }

    /// Appends an item unless its course is already in the cart.
    ///
    /// Returns `true` if the cart changed.
    pub fn add(&mut self, item: CartItem) -> bool {
        if self.contains(item.course_id) {
            return false;
        }
        self.0.push(item);
        true
    }

    /// Removes the item for `course_id`, if any.
    ///
    /// Returns `true` if the cart changed.
    pub fn remove(&mut self, course_id: u32) -> bool {
        let initial_len = self.0.len();
        self.0.retain(|i| i.course_id != course_id);
        self.0.len() != initial_len
    }

    /// Empties the cart. Returns `true` if anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.0.is_empty();
        self.0.clear();
        had_items
    }

    #[inline]
    pub fn contains(&self, course_id: u32) -> bool {
        self.0.iter().any(|i| i.course_id == course_id)
    }

    #[inline]
    pub fn items(&self) -> &[CartItem] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of selling prices.
    pub fn subtotal(&self) -> Money {
        self.0.iter().map(|i| i.price).sum()
    }

    /// Sum of list prices.
    pub fn original_total(&self) -> Money {
        self.0.iter().map(CartItem::list_price).sum()
    }

    /// How much the discounts save over list price.
    pub fn savings(&self) -> Money {
        self.original_total() - self.subtotal()
    }

    /// Serializes the items for durable storage.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parses a persisted cart. Repeated ids in the payload are collapsed.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// Cart summary for the order panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub subtotal: Money,
    pub original_total: Money,
    pub savings: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            subtotal: cart.subtotal(),
            original_total: cart.original_total(),
            savings: cart.savings(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::seed_courses;

    fn item(index: usize) -> CartItem {
        CartItem::from_course(&seed_courses()[index])
    }

    fn ids(cart: &Cart) -> Vec<u32> {
        cart.items().iter().map(|i| i.course_id).collect()
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut cart = Cart::new();
        assert!(cart.add(item(2)));
        assert!(cart.add(item(0)));
        assert_eq!(ids(&cart), vec![3, 1]);
    }

    #[test]
    fn test_add_same_course_twice_is_noop() {
        let mut once = Cart::new();
        once.add(item(0));

        let mut twice = Cart::new();
        assert!(twice.add(item(0)));
        assert!(!twice.add(item(0)));

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut cart = Cart::from_items([item(0), item(1), item(2), item(3)]);
        assert!(cart.remove(2));
        assert_eq!(ids(&cart), vec![1, 3, 4]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::from_items([item(0), item(1)]);
        let before = cart.clone();
        assert!(!cart.remove(42));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::from_items([item(0)]);
        assert!(cart.clear());
        assert!(cart.is_empty());
        assert!(!cart.clear());
    }

    #[test]
    fn test_totals_and_savings() {
        // $199 (list $299) + $149 (list $199)
        let cart = Cart::from_items([item(0), item(1)]);
        let totals = CartTotals::from(&cart);

        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.subtotal, Money::from_dollars(348));
        assert_eq!(totals.original_total, Money::from_dollars(498));
        assert_eq!(totals.savings, Money::from_dollars(150));
    }

    #[test]
    fn test_missing_list_price_falls_back_to_price() {
        let mut entry = item(0);
        entry.original_price = None;
        assert_eq!(entry.list_price(), entry.price);
        assert!(!entry.has_discount());

        let cart = Cart::from_items([entry]);
        assert!(cart.savings().is_zero());
    }

    #[test]
    fn test_json_round_trip_and_shape() {
        let cart = Cart::from_items([item(4), item(1)]);
        let raw = cart.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["id"], 5);

        assert_eq!(Cart::from_json(&raw).unwrap(), cart);
    }

    #[test]
    fn test_from_json_collapses_duplicates_and_tolerates_sparse_records() {
        let raw = r#"[
            {"id": 2, "title": "Advanced Python Programming", "instructor": "Michael Chen", "image": "", "price": 14900},
            {"id": 2, "title": "dup", "instructor": "", "image": "", "price": 1}
        ]"#;
        let cart = Cart::from_json(raw).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].title, "Advanced Python Programming");
        assert_eq!(cart.items()[0].original_price, None);
    }

    #[test]
    fn test_deserialize_collapses_duplicates() {
        let raw = r#"[
            {"id": 3, "title": "UI/UX Design Masterclass", "instructor": "", "image": "", "price": 17900},
            {"id": 1, "title": "first", "instructor": "", "image": "", "price": 100},
            {"id": 3, "title": "dup", "instructor": "", "image": "", "price": 1}
        ]"#;
        let cart: Cart = serde_json::from_str(raw).unwrap();
        assert_eq!(ids(&cart), vec![3, 1]);
        assert_eq!(cart.items()[0].title, "UI/UX Design Masterclass");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Cart::from_json("{not json").is_err());
        assert!(Cart::from_json(r#"{"id": 1}"#).is_err());
    }
}
