//! # Bill Generator
//!
//! Derives a line-item summary and total from the current cart.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /generate_bill                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart empty? ──── yes ──► EmptyCart error, flash + redirect to /cart   │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  BillView::from_cart  ← THIS MODULE (pure)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BillRepository::create  (bills row + bill_items rows, one txn)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  JSON bill view to the client; the cart is deliberately NOT cleared    │
//! │  (the original keeps it, so a re-issued GET writes a second bill)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Bill View
// =============================================================================

/// One rendered bill line, frozen from a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLine {
    pub item_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

/// The line-by-line and aggregate view of a checkout.
///
/// The total is computed exactly as the cart view computes it, so the two
/// can never disagree for the same cart state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillView {
    pub lines: Vec<BillLine>,
    pub total_cents: i64,
}

impl BillView {
    /// Builds a bill view from the session cart.
    ///
    /// Fails with [`CoreError::EmptyCart`] when there is nothing to bill.
    pub fn from_cart(cart: &Cart) -> CoreResult<BillView> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let lines = cart
            .lines()
            .iter()
            .map(|l| BillLine {
                item_name: l.name.clone(),
                quantity: l.quantity,
                unit_price_cents: l.unit_price_cents,
                line_total_cents: l.line_total().cents(),
            })
            .collect();

        Ok(BillView {
            lines,
            total_cents: cart.total().cents(),
        })
    }

    /// Total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// The denormalized summary stored on the bills row,
    /// e.g. `"Bag x1, Pen x3"`.
    pub fn description(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{} x{}", l.item_name, l.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::QuantityChange;
    use crate::types::Item;

    fn item(id: i64, name: &str, price_cents: i64) -> Item {
        Item {
            id,
            name: name.to_string(),
            category: None,
            quantity: 50,
            price_cents,
        }
    }

    fn bag_and_pen_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(&item(1, "Bag", 120000));
        cart.add_item(&item(2, "Pen", 1000));
        cart.change_quantity(2, QuantityChange::Increase);
        cart.change_quantity(2, QuantityChange::Increase);
        cart
    }

    #[test]
    fn test_empty_cart_is_an_error() {
        let cart = Cart::new();
        assert!(matches!(
            BillView::from_cart(&cart),
            Err(CoreError::EmptyCart)
        ));
    }

    #[test]
    fn test_bill_total_equals_cart_total() {
        let cart = bag_and_pen_cart();
        let bill = BillView::from_cart(&cart).unwrap();

        assert_eq!(bill.total_cents, cart.total().cents());
        assert_eq!(bill.total_cents, 123000);
    }

    #[test]
    fn test_bill_lines_mirror_cart_lines() {
        let cart = bag_and_pen_cart();
        let bill = BillView::from_cart(&cart).unwrap();

        assert_eq!(bill.lines.len(), 2);
        assert_eq!(bill.lines[0].item_name, "Bag");
        assert_eq!(bill.lines[0].quantity, 1);
        assert_eq!(bill.lines[0].line_total_cents, 120000);
        assert_eq!(bill.lines[1].item_name, "Pen");
        assert_eq!(bill.lines[1].quantity, 3);
        assert_eq!(bill.lines[1].line_total_cents, 3000);
    }

    #[test]
    fn test_description_format() {
        let cart = bag_and_pen_cart();
        let bill = BillView::from_cart(&cart).unwrap();
        assert_eq!(bill.description(), "Bag x1, Pen x3");
    }

    #[test]
    fn test_generating_twice_from_same_cart_is_identical() {
        // The cart is not cleared by billing; a second generation from the
        // unchanged cart produces the same view
        let cart = bag_and_pen_cart();
        let first = BillView::from_cart(&cart).unwrap();
        let second = BillView::from_cart(&cart).unwrap();
        assert_eq!(first, second);
    }
}
