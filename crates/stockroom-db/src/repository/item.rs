//! # Item Repository
//!
//! Database operations for the catalog.
//!
//! ## Filtered Listing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  How a catalog read is assembled                        │
//! │                                                                         │
//! │  ItemQuery { category: Some("Stationery"),                             │
//! │              search: Some("pen"),                                      │
//! │              sort: SortKey::Price }                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... FROM items WHERE 1=1                                       │
//! │    AND category = ?            ← bound parameter                       │
//! │    AND name LIKE '%' || ? || '%'  ← bound parameter, substring match   │
//! │  ORDER BY price_cents ASC      ← constant fragment from the enum       │
//! │                                                                         │
//! │  Request text only ever travels through bind parameters; the query     │
//! │  text itself is assembled from compile-time constants.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockroom_core::{Item, ItemQuery, NewItem};

/// Repository for catalog database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ItemRepository::new(pool);
///
/// // Filtered, sorted listing
/// let items = repo.list(&query).await?;
///
/// // Get by id
/// let item = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Lists catalog items matching the query descriptor.
    ///
    /// ## Behavior
    /// - category: exact match when present
    /// - search: substring match on name (wildcard both sides, like the
    ///   dashboard search box expects)
    /// - sort: single ascending key; ties retain storage order
    /// - No pagination; the full result set is returned
    pub async fn list(&self, query: &ItemQuery) -> DbResult<Vec<Item>> {
        debug!(
            category = query.category.as_deref().unwrap_or("-"),
            search = query.search.as_deref().unwrap_or("-"),
            sort = ?query.sort,
            "Listing items"
        );

        let mut sql =
            String::from("SELECT id, name, category, quantity, price_cents FROM items WHERE 1=1");
        if query.category.is_some() {
            sql.push_str(" AND category = ?");
        }
        if query.search.is_some() {
            sql.push_str(" AND name LIKE '%' || ? || '%'");
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(query.sort.order_by());

        let mut stmt = sqlx::query_as::<_, Item>(&sql);
        if let Some(category) = &query.category {
            stmt = stmt.bind(category);
        }
        if let Some(search) = &query.search {
            stmt = stmt.bind(search);
        }

        let items = stmt.fetch_all(&self.pool).await?;

        debug!(count = items.len(), "Listing returned items");
        Ok(items)
    }

    /// Returns the distinct non-empty categories, sorted.
    ///
    /// Used to populate the dashboard's filter dropdown.
    pub async fn distinct_categories(&self) -> DbResult<Vec<String>> {
        let categories: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT category FROM items
            WHERE category IS NOT NULL AND category != ''
            ORDER BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets an item by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Item))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT id, name, category, quantity, price_cents FROM items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new catalog item, returning it with its assigned id.
    pub async fn insert(&self, item: &NewItem) -> DbResult<Item> {
        debug!(name = %item.name, "Inserting item");

        let result = sqlx::query(
            "INSERT INTO items (name, category, quantity, price_cents) VALUES (?, ?, ?, ?)",
        )
        .bind(&item.name)
        .bind(&item.category)
        .bind(item.quantity)
        .bind(item.price_cents)
        .execute(&self.pool)
        .await?;

        Ok(Item {
            id: result.last_insert_rowid(),
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity,
            price_cents: item.price_cents,
        })
    }

    /// Updates an existing item: full-row replace of the four mutable
    /// fields.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Item doesn't exist
    pub async fn update(&self, id: i64, item: &NewItem) -> DbResult<()> {
        debug!(id, "Updating item");

        let result = sqlx::query(
            "UPDATE items SET name = ?, category = ?, quantity = ?, price_cents = ? WHERE id = ?",
        )
        .bind(&item.name)
        .bind(&item.category)
        .bind(item.quantity)
        .bind(item.price_cents)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Deletes an item. Idempotent: deleting an absent id succeeds
    /// (delete-by-predicate, zero or one rows affected, no distinct
    /// not-found signal).
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id, rows = result.rows_affected(), "Deleted item");
        Ok(())
    }

    /// Counts catalog items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Checks whether any item with this exact name exists.
    ///
    /// Used by the seed binary to keep seeding idempotent.
    pub async fn name_exists(&self, name: &str) -> DbResult<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM items WHERE name = ?)")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists != 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use stockroom_core::SortKey;

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.items();

        for (name, category, quantity, price_cents) in [
            ("Laptop", Some("Electronics"), 10, 5_500_000),
            ("Mouse", Some("Electronics"), 50, 49_900),
            ("Notebook", Some("Stationery"), 100, 4_500),
            ("Pen", Some("Stationery"), 200, 1_000),
            ("Bag", Some("Accessories"), 15, 120_000),
            ("Mystery Box", None, 1, 0),
        ] {
            repo.insert(&NewItem {
                name: name.to_string(),
                category: category.map(str::to_string),
                quantity,
                price_cents,
            })
            .await
            .unwrap();
        }

        db
    }

    #[tokio::test]
    async fn test_unfiltered_list_sorts_by_name() {
        let db = seeded_db().await;
        let items = db.items().list(&ItemQuery::default()).await.unwrap();

        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Bag", "Laptop", "Mouse", "Mystery Box", "Notebook", "Pen"]
        );
    }

    #[tokio::test]
    async fn test_category_filter_exact_match() {
        let db = seeded_db().await;
        let query = ItemQuery::from_raw(Some("Stationery"), None, None);
        let items = db.items().list(&query).await.unwrap();

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.category.as_deref() == Some("Stationery")));
    }

    #[tokio::test]
    async fn test_all_sentinel_means_no_filter() {
        let db = seeded_db().await;
        let all = db
            .items()
            .list(&ItemQuery::from_raw(Some("All"), None, None))
            .await
            .unwrap();
        let unfiltered = db.items().list(&ItemQuery::default()).await.unwrap();

        assert_eq!(all, unfiltered);
    }

    #[tokio::test]
    async fn test_search_is_substring_not_prefix() {
        let db = seeded_db().await;
        // "book" matches "Notebook" in the middle of the word
        let query = ItemQuery::from_raw(None, Some("book"), None);
        let items = db.items().list(&query).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Notebook");
    }

    #[tokio::test]
    async fn test_sort_by_price() {
        let db = seeded_db().await;
        let query = ItemQuery::from_raw(None, None, Some("price"));
        let items = db.items().list(&query).await.unwrap();

        let prices: Vec<i64> = items.iter().map(|i| i.price_cents).collect();
        let mut sorted = prices.clone();
        sorted.sort();
        assert_eq!(prices, sorted);
    }

    #[tokio::test]
    async fn test_unknown_sort_behaves_like_name_sort() {
        let db = seeded_db().await;
        let bogus = db
            .items()
            .list(&ItemQuery::from_raw(None, None, Some("rowid; --")))
            .await
            .unwrap();
        let by_name = db
            .items()
            .list(&ItemQuery {
                category: None,
                search: None,
                sort: SortKey::Name,
            })
            .await
            .unwrap();

        assert_eq!(bogus, by_name);
    }

    #[tokio::test]
    async fn test_distinct_categories_excludes_null() {
        let db = seeded_db().await;
        let categories = db.items().distinct_categories().await.unwrap();

        assert_eq!(
            categories,
            vec!["Accessories", "Electronics", "Stationery"]
        );
    }

    #[tokio::test]
    async fn test_get_update_roundtrip() {
        let db = seeded_db().await;
        let repo = db.items();

        let pen = repo
            .list(&ItemQuery::from_raw(None, Some("Pen"), None))
            .await
            .unwrap()
            .into_iter()
            .next()
            .unwrap();

        repo.update(
            pen.id,
            &NewItem {
                name: "Gel Pen".to_string(),
                category: Some("Stationery".to_string()),
                quantity: 180,
                price_cents: 1_500,
            },
        )
        .await
        .unwrap();

        let updated = repo.get_by_id(pen.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Gel Pen");
        assert_eq!(updated.quantity, 180);
        assert_eq!(updated.price_cents, 1_500);
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let db = seeded_db().await;
        let err = db
            .items()
            .update(
                999,
                &NewItem {
                    name: "Ghost".to_string(),
                    category: None,
                    quantity: 0,
                    price_cents: 0,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = seeded_db().await;
        let repo = db.items();
        let before = repo.count().await.unwrap();

        // Deleting an id that was never assigned succeeds without error
        repo.delete(999).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), before);

        // And deleting a real row twice is equally quiet
        repo.delete(1).await.unwrap();
        repo.delete(1).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), before - 1);
    }
}
