//! # stockroom-core: Pure Business Logic for Stockroom
//!
//! This crate is the **heart** of Stockroom. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stockroom Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP client (browser)                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/server (axum)                           │   │
//! │  │    routes, session store, flash messages, auth service          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ stockroom-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────┐ ┌────────┐ ┌────────────┐  │   │
//! │  │  │  types  │ │  money  │ │  cart  │ │ query  │ │ validation │  │   │
//! │  │  │  Item   │ │  Money  │ │  Cart  │ │SortKey │ │   rules    │  │   │
//! │  │  │  User   │ │  cents  │ │ Lines  │ │ Filter │ │   checks   │  │   │
//! │  │  └─────────┘ └─────────┘ └────────┘ └────────┘ └────────────┘  │   │
//! │  │                        ┌────────┐                               │   │
//! │  │                        │  bill  │                               │   │
//! │  │                        └────────┘                               │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-db (Database Layer)                   │   │
//! │  │           SQLite queries, migrations, repositories              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, User, Bill, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The session cart state machine
//! - [`bill`] - Bill views derived from a cart
//! - [`query`] - Closed filter/sort descriptors for catalog reads
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation of form input
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod cart;
pub mod error;
pub mod money;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockroom_core::Money` instead of
// `use stockroom_core::money::Money`

pub use bill::{BillLine, BillView};
pub use cart::{AddOutcome, Cart, CartLine, QuantityChange};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use query::{ItemQuery, SortKey};
pub use types::*;
