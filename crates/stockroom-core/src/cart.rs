//! # Session Cart
//!
//! The per-session shopping cart state machine.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  HTTP Action                  Cart Operation        State Change        │
//! │  ───────────                  ──────────────        ────────────        │
//! │                                                                         │
//! │  GET /add_to_cart/{id} ─────► add_item() ─────────► seed line, qty=1   │
//! │                                   │                 (no-op if present)  │
//! │  GET /update_cart/{id}/                                                 │
//! │      increase|decrease ─────► change_quantity() ──► qty ± 1,           │
//! │                                                     delete at <= 0     │
//! │  GET /remove_from_cart/{id} ► remove_item() ──────► line deleted       │
//! │                                                                         │
//! │  GET /cart ─────────────────► lines() + total() ──► (read only)        │
//! │                                                                         │
//! │  The cart lives in the session store, never in shared storage, so      │
//! │  two sessions can never contend over one cart.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Prices
//! A line freezes the item's name and price at add time. If an admin edits
//! the item afterwards, the cart and any bill generated from it keep the
//! stale values. That is documented behavior, not a bug to fix by
//! re-joining the catalog.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Item;

// =============================================================================
// Cart Line
// =============================================================================

/// One (item, snapshotted price, quantity) tuple held in session state.
///
/// ## Invariants
/// - `quantity >= 1`; an operation that would drop it to 0 deletes the line
/// - `item_id` is unique within a cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog item id this line refers to.
    pub item_id: i64,

    /// Item name at add time (frozen).
    pub name: String,

    /// Unit price in cents at add time (frozen).
    pub unit_price_cents: i64,

    /// Quantity in cart, always >= 1.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a cart line from a catalog item, seeding quantity 1.
    fn from_item(item: &Item) -> Self {
        CartLine {
            item_id: item.id,
            name: item.name.clone(),
            unit_price_cents: item.price_cents,
            quantity: 1,
        }
    }

    /// Unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Result of `Cart::add_item`.
///
/// A repeat add of a carted item is deliberately NOT an increment: the
/// caller gets `AlreadyPresent` and flashes it, and the quantity stays
/// untouched. Quantity changes go through `change_quantity` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was seeded with quantity 1.
    Added,
    /// The item was already in the cart; nothing changed.
    AlreadyPresent,
}

/// Direction for `Cart::change_quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityChange {
    /// Add 1 to the line quantity.
    Increase,
    /// Subtract 1; at quantity 1 this deletes the line.
    Decrease,
}

impl QuantityChange {
    /// Parses the path segment of `GET /update_cart/{id}/{direction}`.
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "increase" => Some(QuantityChange::Increase),
            "decrease" => Some(QuantityChange::Decrease),
            _ => None,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The session cart: an ordered mapping from item id to [`CartLine`].
///
/// Lines keep insertion order so the cart view and the bill list items in
/// the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a catalog item to the cart.
    ///
    /// ## Behavior
    /// - Item not in cart: a line is seeded with quantity 1 at the item's
    ///   current price (the snapshot)
    /// - Item already in cart: no-op, returns
    ///   [`AddOutcome::AlreadyPresent`]; the quantity is never incremented
    ///   by a repeat add
    pub fn add_item(&mut self, item: &Item) -> AddOutcome {
        if self.lines.iter().any(|l| l.item_id == item.id) {
            return AddOutcome::AlreadyPresent;
        }

        self.lines.push(CartLine::from_item(item));
        AddOutcome::Added
    }

    /// Increases or decreases a line's quantity by 1.
    ///
    /// ## Behavior
    /// - Decrease at quantity 1 deletes the line
    /// - Unknown `item_id` is a silent no-op, not an error; the id may
    ///   come from a stale page
    pub fn change_quantity(&mut self, item_id: i64, change: QuantityChange) {
        let Some(index) = self.lines.iter().position(|l| l.item_id == item_id) else {
            return;
        };

        match change {
            QuantityChange::Increase => self.lines[index].quantity += 1,
            QuantityChange::Decrease => {
                self.lines[index].quantity -= 1;
                if self.lines[index].quantity <= 0 {
                    self.lines.remove(index);
                }
            }
        }
    }

    /// Removes a line by item id. No-op if absent.
    pub fn remove_item(&mut self, item_id: i64) {
        self.lines.retain(|l| l.item_id != item_id);
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns the lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by item id.
    pub fn line(&self, item_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item_id == item_id)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Σ(price × quantity) over all lines; 0 for an empty cart.
    pub fn total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, l| acc + l.line_total())
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, price_cents: i64) -> Item {
        Item {
            id,
            name: name.to_string(),
            category: None,
            quantity: 100,
            price_cents,
        }
    }

    #[test]
    fn test_first_add_seeds_quantity_one() {
        let mut cart = Cart::new();
        let bag = item(1, "Bag", 120000);

        assert_eq!(cart.add_item(&bag), AddOutcome::Added);
        assert_eq!(cart.line(1).unwrap().quantity, 1);
        assert_eq!(cart.line(1).unwrap().unit_price_cents, 120000);
    }

    #[test]
    fn test_repeat_add_is_a_no_op() {
        let mut cart = Cart::new();
        let bag = item(1, "Bag", 120000);

        cart.add_item(&bag);
        assert_eq!(cart.add_item(&bag), AddOutcome::AlreadyPresent);

        // Quantity stays at exactly 1, never 2
        assert_eq!(cart.line(1).unwrap().quantity, 1);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_price_is_snapshotted_at_add_time() {
        let mut cart = Cart::new();
        let mut bag = item(1, "Bag", 120000);
        cart.add_item(&bag);

        // Admin edits the catalog price afterwards
        bag.price_cents = 999900;

        // The cart keeps the stale snapshot
        assert_eq!(cart.line(1).unwrap().unit_price_cents, 120000);
        assert_eq!(cart.total().cents(), 120000);
    }

    #[test]
    fn test_increase_and_decrease() {
        let mut cart = Cart::new();
        let pen = item(2, "Pen", 1000);
        cart.add_item(&pen);

        cart.change_quantity(2, QuantityChange::Increase);
        cart.change_quantity(2, QuantityChange::Increase);
        assert_eq!(cart.line(2).unwrap().quantity, 3);

        cart.change_quantity(2, QuantityChange::Decrease);
        assert_eq!(cart.line(2).unwrap().quantity, 2);
    }

    #[test]
    fn test_decrease_at_one_removes_line_then_no_ops() {
        let mut cart = Cart::new();
        let pen = item(2, "Pen", 1000);
        cart.add_item(&pen);

        cart.change_quantity(2, QuantityChange::Decrease);
        assert!(cart.line(2).is_none());
        assert!(cart.is_empty());

        // Line is gone; a further decrease is a no-op, not an error
        cart.change_quantity(2, QuantityChange::Decrease);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_on_absent_item_is_no_op() {
        let mut cart = Cart::new();
        cart.change_quantity(42, QuantityChange::Increase);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        let pen = item(2, "Pen", 1000);
        cart.add_item(&pen);

        cart.remove_item(2);
        assert!(cart.is_empty());

        cart.remove_item(2); // already absent
        assert!(cart.is_empty());
    }

    #[test]
    fn test_bag_and_pen_scenario_total() {
        // Seed: Bag at 1200.00, Pen at 10.00
        let mut cart = Cart::new();
        cart.add_item(&item(1, "Bag", 120000));
        cart.add_item(&item(2, "Pen", 1000));
        cart.change_quantity(2, QuantityChange::Increase);
        cart.change_quantity(2, QuantityChange::Increase);

        // Cart = {Bag×1, Pen×3}, total = 1200 + 30 = 1230
        assert_eq!(cart.line(1).unwrap().quantity, 1);
        assert_eq!(cart.line(2).unwrap().quantity, 3);
        assert_eq!(cart.total().cents(), 123000);
        assert_eq!(cart.total().to_string(), "1230.00");
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::new();
        assert!(cart.total().is_zero());
        assert_eq!(cart.lines().len(), 0);
    }

    #[test]
    fn test_quantity_change_parse() {
        assert_eq!(
            QuantityChange::parse("increase"),
            Some(QuantityChange::Increase)
        );
        assert_eq!(
            QuantityChange::parse("decrease"),
            Some(QuantityChange::Decrease)
        );
        assert_eq!(QuantityChange::parse("double"), None);
    }

    #[test]
    fn test_cart_serde_round_trip() {
        // The cart must survive the session store
        let mut cart = Cart::new();
        cart.add_item(&item(1, "Bag", 120000));

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
