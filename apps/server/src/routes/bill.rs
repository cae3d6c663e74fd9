//! Bill generation route.
//!
//! Derives a bill from the current cart and persists it (the bills row
//! plus one normalized line per cart line, in one transaction). The cart
//! is deliberately left intact afterwards; clearing it is a product
//! decision nobody has made yet, and a second `/generate_bill` on the
//! same cart produces a second, identical bill.

use axum::extract::State;
use axum::response::{IntoResponse, Json, Redirect, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_sessions::Session;
use tracing::info;

use crate::error::WebResult;
use crate::extract::RequireAuth;
use crate::session::{flash, load_cart};
use crate::AppState;
use stockroom_core::{BillLine, BillView, Money};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillReceipt {
    pub bill_id: i64,
    pub username: String,
    pub lines: Vec<ReceiptLine>,
    pub total_cents: i64,
    /// Formatted total, e.g. "1230.00".
    pub total: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&BillLine> for ReceiptLine {
    fn from(line: &BillLine) -> Self {
        ReceiptLine {
            item_name: line.item_name.clone(),
            quantity: line.quantity,
            unit_price: Money::from_cents(line.unit_price_cents).to_string(),
            line_total: Money::from_cents(line.line_total_cents).to_string(),
        }
    }
}

/// `GET /generate_bill`
pub async fn generate_bill(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> WebResult<Response> {
    let cart = load_cart(&session).await?;

    let view = match BillView::from_cart(&cart) {
        Ok(view) => view,
        Err(_) => {
            flash(&session, "Your cart is empty!").await;
            return Ok(Redirect::to("/cart").into_response());
        }
    };

    let bill = state.db.bills().create(user.id, &view).await?;
    info!(bill_id = bill.id, user_id = user.id, "Bill generated");

    let total = bill.total();
    Ok(Json(BillReceipt {
        bill_id: bill.id,
        username: user.username,
        lines: view.lines.iter().map(ReceiptLine::from).collect(),
        total_cents: total.cents(),
        total: total.to_string(),
        created_at: bill.created_at,
    })
    .into_response())
}
