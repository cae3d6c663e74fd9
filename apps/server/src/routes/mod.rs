//! HTTP route table.
//!
//! ## Route Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Public                                                                 │
//! │    GET  /, /home               welcome page                            │
//! │    GET  /register  POST /register                                      │
//! │    GET  /login     POST /login                                         │
//! │    GET  /logout                                                         │
//! │    POST /search_items          JSON; answers [] when anonymous         │
//! │                                                                         │
//! │  Gated (RequireAuth, redirect to /login otherwise)                     │
//! │    GET  /dashboard?category=&search=&sort_by=                          │
//! │    GET|POST /add_item                                                  │
//! │    GET|POST /update_item/{id}                                          │
//! │    GET  /delete_item/{id}                                              │
//! │    GET  /add_to_cart/{id}                                              │
//! │    GET|POST /cart                                                      │
//! │    GET  /update_cart/{id}/{action}                                     │
//! │    GET  /remove_from_cart/{id}                                         │
//! │    GET  /generate_bill                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! State-changing operations answer with a flash message and a redirect;
//! GET views answer with JSON DTOs.

pub mod auth;
pub mod bill;
pub mod cart;
pub mod catalog;
pub mod pages;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::session::create_session_layer;
use crate::AppState;

/// Assembles the full application router.
pub fn router(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config.session_expiry_secs);

    Router::new()
        // Public pages
        .route("/", get(pages::index))
        .route("/home", get(pages::index))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        // Catalog
        .route("/dashboard", get(catalog::dashboard))
        .route("/search_items", axum::routing::post(catalog::search_items))
        .route("/add_item", get(catalog::add_item_page).post(catalog::add_item))
        .route(
            "/update_item/{id}",
            get(catalog::update_item_page).post(catalog::update_item),
        )
        .route("/delete_item/{id}", get(catalog::delete_item))
        // Cart
        .route("/add_to_cart/{id}", get(cart::add_to_cart))
        .route("/cart", get(cart::view_cart).post(cart::view_cart))
        .route("/update_cart/{id}/{action}", get(cart::update_cart))
        .route("/remove_from_cart/{id}", get(cart::remove_from_cart))
        // Billing
        .route("/generate_bill", get(bill::generate_bill))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
