//! Session layer and typed session access.
//!
//! Sessions are held in a tower-sessions `MemoryStore`: they are ephemeral
//! and vanish on restart, which is exactly the lifetime the cart and login
//! state are supposed to have. Durable state (accounts, catalog, bills)
//! lives in SQLite only.
//!
//! ## Session Contents
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        One Browser Session                              │
//! │                                                                         │
//! │  "current_user" ──► CurrentUser { id, username }   (set by login)      │
//! │  "cart"         ──► Cart { lines: [...] }          (serde round-trip)  │
//! │  "flash"        ──► Vec<String>                    (one-shot messages) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use stockroom_core::Cart;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "stockroom_session";

/// Session keys. Kept in one place so no handler invents its own string.
pub mod session_keys {
    pub const CURRENT_USER: &str = "current_user";
    pub const CART: &str = "cart";
    pub const FLASH: &str = "flash";
}

/// The logged-in account as stored in the session.
///
/// Only the id and display name; the password hash never leaves the
/// database layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

/// Create the in-memory session layer.
pub fn create_session_layer(expiry_secs: i64) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(expiry_secs),
        ))
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

// =============================================================================
// Typed Accessors
// =============================================================================

/// Reads the current user, `None` when not logged in.
pub async fn current_user(session: &Session) -> Option<CurrentUser> {
    session
        .get(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Stores the current user (login).
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Reads the cart, starting an empty one for a fresh session.
pub async fn load_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Writes the cart back to the session.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

// =============================================================================
// Flash Messages
// =============================================================================

/// Appends a one-shot message for the next rendered view.
pub async fn flash(session: &Session, message: impl Into<String>) {
    let mut messages: Vec<String> = session
        .get(session_keys::FLASH)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    messages.push(message.into());

    // A failed flash write is not worth failing the request over
    let _ = session.insert(session_keys::FLASH, &messages).await;
}

/// Takes and clears the pending messages.
pub async fn take_flash(session: &Session) -> Vec<String> {
    session
        .remove::<Vec<String>>(session_keys::FLASH)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}
