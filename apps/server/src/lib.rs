//! # Stockroom Server
//!
//! axum HTTP application for the Stockroom inventory system.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Server                                 │
//! │                                                                         │
//! │  Browser ───► axum Router ───► Session Layer ───► Handlers             │
//! │                                 (tower-sessions,      │                 │
//! │                                  cart + flash)        ▼                 │
//! │                                              stockroom-core (logic)    │
//! │                                              stockroom-db   (SQLite)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Environment-driven configuration
//! - [`session`] - Session layer, typed keys, flash messages
//! - [`extract`] - Authentication extractors
//! - [`error`] - Web error type
//! - [`routes`] - The HTTP surface
//! - [`services`] - Auth orchestration (argon2 hashing lives here)

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod services;
pub mod session;

use stockroom_db::Database;

use crate::config::ServerConfig;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

pub use routes::router;
