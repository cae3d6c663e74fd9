//! Catalog routes: dashboard listing, search endpoint, item CRUD.
//!
//! Mutation is gated on "is authenticated" only. Accounts carry a role
//! column, but any logged-in user may add, edit or delete items; the admin
//! distinction is a naming convention, not an enforcement point.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum::Form;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tower_sessions::Session;

use crate::error::{WebError, WebResult};
use crate::extract::{OptionalAuth, RequireAuth};
use crate::session::{flash, take_flash};
use crate::AppState;
use stockroom_core::{validation, CoreError, Item, ItemQuery};
use stockroom_db::DbError;

// =============================================================================
// DTOs
// =============================================================================

/// One catalog row as the client sees it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub quantity: i64,
    pub price_cents: i64,
    /// Formatted price, e.g. "1200.00".
    pub price: String,
}

impl From<Item> for ItemView {
    fn from(item: Item) -> Self {
        let price = item.price().to_string();
        ItemView {
            id: item.id,
            name: item.name,
            category: item.category,
            quantity: item.quantity,
            price_cents: item.price_cents,
            price,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub username: String,
    pub items: Vec<ItemView>,
    pub categories: Vec<String>,
    pub flash: Vec<String>,
}

/// Raw filter/sort fields as they arrive from the client.
///
/// Normalization (trimming, the "All" sentinel, the sort allow-list)
/// happens in `ItemQuery::from_raw`, not here. The dashboard query string
/// spells the sort field `sort_by`; the search endpoint's JSON body spells
/// it `sort`. Both land on the same field.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, alias = "sort")]
    pub sort_by: Option<String>,
}

impl CatalogParams {
    fn to_query(&self) -> ItemQuery {
        ItemQuery::from_raw(
            self.category.as_deref(),
            self.search.as_deref(),
            self.sort_by.as_deref(),
        )
    }
}

// =============================================================================
// Listing
// =============================================================================

/// `GET /dashboard?category=&search=&sort_by=`
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Query(params): Query<CatalogParams>,
) -> WebResult<Json<DashboardView>> {
    let query = params.to_query();
    let items = state.db.items().list(&query).await?;
    let categories = state.db.items().distinct_categories().await?;

    Ok(Json(DashboardView {
        username: user.username,
        items: items.into_iter().map(ItemView::from).collect(),
        categories,
        flash: take_flash(&session).await,
    }))
}

/// `POST /search_items`
///
/// The dashboard's live search endpoint. An anonymous caller gets an empty
/// array, not a redirect; the page script treats both the same way.
pub async fn search_items(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Json(params): Json<CatalogParams>,
) -> WebResult<Json<Vec<ItemView>>> {
    if user.is_none() {
        return Ok(Json(Vec::new()));
    }

    let items = state.db.items().list(&params.to_query()).await?;
    Ok(Json(items.into_iter().map(ItemView::from).collect()))
}

// =============================================================================
// Item CRUD
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFormView {
    pub page: &'static str,
    pub item: Option<ItemView>,
    pub categories: Vec<String>,
    pub flash: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub price: String,
}

/// `GET /add_item`
pub async fn add_item_page(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
) -> WebResult<Json<ItemFormView>> {
    Ok(Json(ItemFormView {
        page: "add_item",
        item: None,
        categories: state.db.items().distinct_categories().await?,
        flash: take_flash(&session).await,
    }))
}

/// `POST /add_item`
pub async fn add_item(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Form(form): Form<ItemForm>,
) -> WebResult<Response> {
    let new_item =
        match validation::parse_item_form(&form.name, &form.category, &form.quantity, &form.price)
        {
            Ok(item) => item,
            Err(err) => {
                flash(&session, err.to_string()).await;
                return Ok(Redirect::to("/add_item").into_response());
            }
        };

    let item = state.db.items().insert(&new_item).await?;
    debug!(item_id = item.id, name = %item.name, "Item added");

    flash(&session, format!("{} added to the catalog.", item.name)).await;
    Ok(Redirect::to("/dashboard").into_response())
}

/// `GET /update_item/{id}`
pub async fn update_item_page(
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

    Ok(Json(ItemFormView {
        page: "update_item",
        item: Some(item.into()),
        categories: state.db.items().distinct_categories().await?,
        flash: take_flash(&session).await,
    })
    .into_response())
}

/// `POST /update_item/{id}`
pub async fn update_item(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<ItemForm>,
) -> WebResult<Response> {
    let new_item =
        match validation::parse_item_form(&form.name, &form.category, &form.quantity, &form.price)
        {
            Ok(item) => item,
            Err(err) => {
                flash(&session, err.to_string()).await;
                return Ok(Redirect::to(&format!("/update_item/{id}")).into_response());
            }
        };

    match state.db.items().update(id, &new_item).await {
        Ok(()) => {
            debug!(item_id = id, "Item updated");
            flash(&session, format!("{} updated.", new_item.name)).await;
        }
        Err(DbError::NotFound { .. }) => {
            let err = WebError::from(CoreError::ItemNotFound(id));
            flash(&session, err.user_message()).await;
        }
        Err(other) => return Err(other.into()),
    }

    Ok(Redirect::to("/dashboard").into_response())
}

/// `GET /delete_item/{id}`
///
/// Deleting an absent id succeeds with the same flash as a real delete.
pub async fn delete_item(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    session: Session,
    Path(id): Path<i64>,
) -> WebResult<Response> {
    state.db.items().delete(id).await?;

    flash(&session, "Item deleted.").await;
    Ok(Redirect::to("/dashboard").into_response())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::SortKey;

    #[test]
    fn test_search_body_sort_key_is_honored() {
        // The live-search endpoint's JSON body spells the sort field "sort"
        let params: CatalogParams =
            serde_json::from_str(r#"{"search":"pen","category":"All","sort":"price"}"#).unwrap();

        let query = params.to_query();
        assert_eq!(query.sort, SortKey::Price);
        assert_eq!(query.search.as_deref(), Some("pen"));
        assert_eq!(query.category, None);
    }

    #[test]
    fn test_dashboard_spelling_still_works() {
        let params: CatalogParams = serde_json::from_str(r#"{"sort_by":"quantity"}"#).unwrap();
        assert_eq!(params.to_query().sort, SortKey::Quantity);
    }

    #[test]
    fn test_missing_sort_defaults_to_name() {
        let params: CatalogParams = serde_json::from_str(r#"{"search":"pen"}"#).unwrap();
        assert_eq!(params.to_query().sort, SortKey::Name);
    }
}
