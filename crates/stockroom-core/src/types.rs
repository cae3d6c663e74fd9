//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Item        │   │      User       │   │      Bill       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name           │   │  username       │   │  user_id (FK)   │       │
//! │  │  category       │   │  email          │   │  total_cents    │       │
//! │  │  quantity       │   │  password_hash  │   │  items_descr.   │       │
//! │  │  price_cents    │   │  role           │   │  created_at     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Ids are SQLite rowids: stable, unique, assigned by the store.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Item
// =============================================================================

/// A catalog item: the durable unit of inventory.
///
/// Owned exclusively by the catalog store; the cart only ever holds
/// snapshots of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Item {
    /// Unique identifier (SQLite rowid), stable for the item's lifetime.
    pub id: i64,

    /// Display name, non-empty after boundary validation.
    pub name: String,

    /// Category tag; the original schema allows NULL here.
    pub category: Option<String>,

    /// Units on hand. Never negative.
    pub quantity: i64,

    /// Unit price in cents (smallest currency unit).
    pub price_cents: i64,
}

impl Item {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Fields of an item that an authenticated user may write.
///
/// Produced only by boundary validation (`validation::parse_item_form`);
/// raw form strings never reach the repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    /// Trimmed, non-empty name.
    pub name: String,

    /// Trimmed category; empty input becomes `None`.
    pub category: Option<String>,

    /// Parsed quantity, >= 0.
    pub quantity: i64,

    /// Parsed price in cents, >= 0.
    pub price_cents: i64,
}

// =============================================================================
// Role
// =============================================================================

/// Account role.
///
/// Stored and surfaced but deliberately NOT enforced on item mutation:
/// the original system gates those operations on "is authenticated" only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Inventory administrator (by convention).
    Admin,
    /// Regular account.
    User,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered account.
///
/// Immutable after creation except for a password reset path that does not
/// exist yet. `password_hash` is an argon2 digest; the raw password is
/// never stored anywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Unique contact address, also accepted as a login identifier.
    pub email: String,
    /// argon2 digest of the password.
    pub password_hash: String,
    pub role: Role,
}

/// Registration input after boundary validation.
///
/// Holds the still-raw password; hashing happens in the server's auth
/// service, which is the only place that sees it.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Bill
// =============================================================================

/// A persisted bill row: the immutable record of a completed checkout.
///
/// No edit or delete path exists once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Bill {
    pub id: i64,
    pub user_id: i64,
    pub total_cents: i64,
    /// Human-readable summary, e.g. "Bag x1, Pen x3".
    pub items_description: String,
    pub created_at: DateTime<Utc>,
}

impl Bill {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A normalized line of a persisted bill.
///
/// Item name and price are frozen copies taken from the cart line, so the
/// bill stays readable even after the catalog item changes or disappears.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BillItem {
    pub id: i64,
    pub bill_id: i64,
    /// Item name at checkout time (frozen).
    pub item_name: String,
    /// Quantity billed.
    pub quantity: i64,
    /// Unit price in cents at checkout time (frozen).
    pub unit_price_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_default() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_item_price_accessor() {
        let item = Item {
            id: 1,
            name: "Bag".to_string(),
            category: Some("Accessories".to_string()),
            quantity: 15,
            price_cents: 120000,
        };
        assert_eq!(item.price().cents(), 120000);
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }
}
