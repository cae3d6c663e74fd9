//! # User Repository
//!
//! Database operations for registered accounts.
//!
//! ## Identifier Lookup
//! Login accepts either a username or an email address in the same field,
//! so [`UserRepository::find_by_identifier`] matches against both columns
//! with a single bound parameter.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockroom_core::{Role, User};

/// Repository for account database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new account, returning it with its assigned id.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - username or email already taken
    pub async fn insert(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> DbResult<User> {
        debug!(username, "Inserting user");

        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash, role) VALUES (?, ?, ?, ?)",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
        })
    }

    /// Finds an account by username OR email, single field.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - Account found
    /// * `Ok(None)` - No account matches the identifier
    pub async fn find_by_identifier(&self, identifier: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role
            FROM users
            WHERE username = ?1 OR email = ?1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets an account by its id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<User> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| DbError::not_found("User", id))
    }

    /// Checks whether a username or email is already registered.
    ///
    /// Registration uses this for its early duplicate check; the UNIQUE
    /// constraints remain the durable guarantee underneath.
    pub async fn identity_taken(&self, username: &str, email: &str) -> DbResult<bool> {
        let taken: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = ? OR email = ?)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken != 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find_by_username_or_email() {
        let db = db().await;
        let repo = db.users();

        let created = repo
            .insert("alice", "alice@example.com", "digest", Role::User)
            .await
            .unwrap();
        assert!(created.id > 0);

        let by_name = repo.find_by_identifier("alice").await.unwrap().unwrap();
        let by_email = repo
            .find_by_identifier("alice@example.com")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(by_name.id, created.id);
        assert_eq!(by_email.id, created.id);
        assert_eq!(by_name.role, Role::User);
    }

    #[tokio::test]
    async fn test_unknown_identifier_is_none() {
        let db = db().await;
        let found = db.users().find_by_identifier("nobody").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_unique_violation() {
        let db = db().await;
        let repo = db.users();

        repo.insert("bob", "bob@example.com", "digest", Role::User)
            .await
            .unwrap();
        let err = repo
            .insert("bob", "other@example.com", "digest", Role::User)
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let db = db().await;
        let repo = db.users();

        repo.insert("carol", "carol@example.com", "digest", Role::User)
            .await
            .unwrap();
        let err = repo
            .insert("caroline", "carol@example.com", "digest", Role::User)
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_identity_taken_matches_either_column() {
        let db = db().await;
        let repo = db.users();

        repo.insert("dave", "dave@example.com", "digest", Role::Admin)
            .await
            .unwrap();

        assert!(repo.identity_taken("dave", "fresh@example.com").await.unwrap());
        assert!(repo.identity_taken("fresh", "dave@example.com").await.unwrap());
        assert!(!repo.identity_taken("fresh", "fresh@example.com").await.unwrap());
    }
}
