//! # Bill Repository
//!
//! Database operations for persisted bills.
//!
//! ## Atomicity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     BillRepository::create                              │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    INSERT INTO bills (user_id, total_cents, items_description, ...)     │
//! │    INSERT INTO bill_items (bill_id, item_name, quantity, ...)  x N      │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Either the bill and every line land together, or none of them do.     │
//! │  A bill row with missing lines is never observable.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use stockroom_core::{Bill, BillItem, BillView};

/// Repository for bill database operations.
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

impl BillRepository {
    /// Creates a new BillRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BillRepository { pool }
    }

    /// Persists a bill and its lines in one transaction, returning the
    /// stored bill row.
    ///
    /// The caller passes a [`BillView`] already computed from the cart, so
    /// the totals and frozen prices written here are exactly the ones the
    /// user was shown.
    pub async fn create(&self, user_id: i64, view: &BillView) -> DbResult<Bill> {
        let created_at = Utc::now();
        let description = view.description();
        let total_cents = view.total().cents();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO bills (user_id, total_cents, items_description, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(total_cents)
        .bind(&description)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        let bill_id = result.last_insert_rowid();

        for line in &view.lines {
            sqlx::query(
                r#"
                INSERT INTO bill_items (bill_id, item_name, quantity, unit_price_cents)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(bill_id)
            .bind(&line.item_name)
            .bind(line.quantity)
            .bind(line.unit_price_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(bill_id, user_id, total_cents, "Bill persisted");

        Ok(Bill {
            id: bill_id,
            user_id,
            total_cents,
            items_description: description,
            created_at,
        })
    }

    /// Gets a bill with its normalized lines.
    pub async fn get_with_items(&self, bill_id: i64) -> DbResult<(Bill, Vec<BillItem>)> {
        let bill = sqlx::query_as::<_, Bill>(
            r#"
            SELECT id, user_id, total_cents, items_description, created_at
            FROM bills WHERE id = ?
            "#,
        )
        .bind(bill_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Bill", bill_id))?;

        let items = sqlx::query_as::<_, BillItem>(
            r#"
            SELECT id, bill_id, item_name, quantity, unit_price_cents
            FROM bill_items WHERE bill_id = ? ORDER BY id
            "#,
        )
        .bind(bill_id)
        .fetch_all(&self.pool)
        .await?;

        Ok((bill, items))
    }

    /// Lists a user's bills, newest first.
    pub async fn list_for_user(&self, user_id: i64) -> DbResult<Vec<Bill>> {
        debug!(user_id, "Listing bills");

        let bills = sqlx::query_as::<_, Bill>(
            r#"
            SELECT id, user_id, total_cents, items_description, created_at
            FROM bills WHERE user_id = ? ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bills)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use stockroom_core::{Cart, Item, Role};

    async fn db_with_user() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let user = db
            .users()
            .insert("buyer", "buyer@example.com", "digest", Role::User)
            .await
            .unwrap();
        (db, user.id)
    }

    fn sample_view() -> BillView {
        let mut cart = Cart::default();
        cart.add_item(&Item {
            id: 1,
            name: "Bag".to_string(),
            category: Some("Accessories".to_string()),
            quantity: 15,
            price_cents: 120_000,
        });
        cart.add_item(&Item {
            id: 2,
            name: "Pen".to_string(),
            category: Some("Stationery".to_string()),
            quantity: 200,
            price_cents: 1_000,
        });
        BillView::from_cart(&cart).unwrap()
    }

    #[tokio::test]
    async fn test_create_persists_bill_and_lines() {
        let (db, user_id) = db_with_user().await;
        let view = sample_view();

        let bill = db.bills().create(user_id, &view).await.unwrap();
        assert!(bill.id > 0);
        assert_eq!(bill.total_cents, 121_000);
        assert_eq!(bill.items_description, "Bag x1, Pen x1");

        let (stored, items) = db.bills().get_with_items(bill.id).await.unwrap();
        assert_eq!(stored.total_cents, bill.total_cents);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_name, "Bag");
        assert_eq!(items[0].unit_price_cents, 120_000);
    }

    #[tokio::test]
    async fn test_stored_lines_keep_frozen_prices() {
        let (db, user_id) = db_with_user().await;
        let bill = db.bills().create(user_id, &sample_view()).await.unwrap();

        // Catalog rows are untouched by billing; the lines are copies
        let (_, items) = db.bills().get_with_items(bill.id).await.unwrap();
        let line_sum: i64 = items
            .iter()
            .map(|l| l.unit_price_cents * l.quantity)
            .sum();
        assert_eq!(line_sum, bill.total_cents);
    }

    #[tokio::test]
    async fn test_list_for_user_newest_first() {
        let (db, user_id) = db_with_user().await;
        let first = db.bills().create(user_id, &sample_view()).await.unwrap();
        let second = db.bills().create(user_id, &sample_view()).await.unwrap();

        let bills = db.bills().list_for_user(user_id).await.unwrap();
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].id, second.id);
        assert_eq!(bills[1].id, first.id);
    }

    #[tokio::test]
    async fn test_missing_bill_is_not_found() {
        let (db, _) = db_with_user().await;
        let err = db.bills().get_with_items(999).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
