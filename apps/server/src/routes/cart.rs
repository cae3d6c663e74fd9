//! Session cart routes.
//!
//! The cart lives entirely in the session; nothing here touches the items
//! table except the initial lookup on add, which is where the price
//! snapshot is taken. Later catalog edits do not reach carted lines.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Json, Redirect, Response};
use serde::Serialize;
use tower_sessions::Session;
use tracing::debug;

use crate::error::{WebError, WebResult};
use crate::extract::RequireAuth;
use crate::session::{flash, load_cart, save_cart, take_flash};
use crate::AppState;
use stockroom_core::{AddOutcome, CartLine, CoreError, QuantityChange};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total_cents: i64,
    /// Formatted total, e.g. "1230.00".
    pub total: String,
    pub flash: Vec<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /add_to_cart/{id}`
///
/// First add seeds the line with quantity 1 at the catalog's current
/// price. A repeat add is a no-op: the quantity stays 1 and the user is
/// told the item is already there.
pub async fn add_to_cart(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Path(id): Path<i64>,
) -> WebResult<Response> {
    let Some(item) = state.db.items().get_by_id(id).await? else {
        let err = WebError::from(CoreError::ItemNotFound(id));
        flash(&session, err.user_message()).await;
        return Ok(Redirect::to("/dashboard").into_response());
    };

    let mut cart = load_cart(&session).await?;
    match cart.add_item(&item) {
        AddOutcome::Added => {
            debug!(item_id = id, "Cart line added");
            flash(&session, format!("{} added to cart.", item.name)).await;
        }
        AddOutcome::AlreadyPresent => {
            flash(&session, format!("{} is already in your cart.", item.name)).await;
        }
    }
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/dashboard").into_response())
}

/// `GET /cart` and `POST /cart`
///
/// Both verbs render the same view; the cart page is the only cart
/// surface and a form post lands on it just like a link does.
pub async fn view_cart(
    RequireAuth(_user): RequireAuth,
    session: Session,
) -> WebResult<Json<CartView>> {
    let cart = load_cart(&session).await?;
    let total = cart.total();

    Ok(Json(CartView {
        lines: cart.lines().to_vec(),
        total_cents: total.cents(),
        total: total.to_string(),
        flash: take_flash(&session).await,
    }))
}

/// `GET /update_cart/{id}/{action}`
///
/// `action` is `increase` or `decrease`; a decrease that would reach zero
/// removes the line. Anything else in the action slot, or an id that is
/// not in the cart, changes nothing.
pub async fn update_cart(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Path((id, action)): Path<(i64, String)>,
) -> WebResult<Redirect> {
    if let Some(change) = QuantityChange::parse(&action) {
        let mut cart = load_cart(&session).await?;
        cart.change_quantity(id, change);
        save_cart(&session, &cart).await?;
        debug!(item_id = id, action = %action, "Cart quantity changed");
    }

    Ok(Redirect::to("/cart"))
}

/// `GET /remove_from_cart/{id}`
pub async fn remove_from_cart(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Path(id): Path<i64>,
) -> WebResult<Redirect> {
    let mut cart = load_cart(&session).await?;
    cart.remove_item(id);
    save_cart(&session, &cart).await?;

    flash(&session, "Item removed from cart.").await;
    Ok(Redirect::to("/cart"))
}
