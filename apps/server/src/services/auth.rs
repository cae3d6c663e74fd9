//! Authentication service.
//!
//! The only place that ever sees a raw password. Registration stores an
//! argon2 digest; login verifies against it. Validation problems, duplicate
//! identities and bad credentials each map to their own [`CoreError`]
//! variant.
//!
//! ## Registration Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. parse_registration  (password==confirm checked FIRST; a mismatch   │
//! │     returns before any database row can exist)                         │
//! │  2. identity_taken      (early duplicate check, friendly error)        │
//! │  3. hash + insert       (UNIQUE constraints remain the durable check;  │
//! │     a violation that slips past step 2 maps to the same Conflict)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use tracing::{debug, info};

use crate::error::{WebError, WebResult};
use stockroom_core::{validation, CoreError, Role, User};
use stockroom_db::{Database, DbError};

/// Registers a new account.
///
/// ## Errors
/// * `CoreError::Validation` - bad field or password mismatch
/// * `CoreError::Conflict` - username or email already registered
pub async fn register(
    db: &Database,
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> WebResult<User> {
    let registration =
        validation::parse_registration(username, email, password, confirm_password)
            .map_err(CoreError::from)?;

    if db
        .users()
        .identity_taken(&registration.username, &registration.email)
        .await?
    {
        debug!(username = %registration.username, "Registration conflict");
        return Err(WebError::Core(CoreError::Conflict));
    }

    let digest = hash_password(&registration.password)?;

    let user = db
        .users()
        .insert(
            &registration.username,
            &registration.email,
            &digest,
            Role::default(),
        )
        .await
        .map_err(|e| match e {
            // Raced past the early check; same answer either way
            DbError::UniqueViolation { .. } => WebError::Core(CoreError::Conflict),
            other => WebError::Db(other),
        })?;

    info!(user_id = user.id, username = %user.username, "Account registered");
    Ok(user)
}

/// Verifies credentials, returning the account on success.
///
/// The identifier matches username OR email. Unknown identifier and wrong
/// password both collapse into `CoreError::Auth`; a caller cannot tell
/// which half failed.
pub async fn login(db: &Database, identifier: &str, password: &str) -> WebResult<User> {
    let user = db
        .users()
        .find_by_identifier(identifier.trim())
        .await?
        .ok_or(WebError::Core(CoreError::Auth))?;

    let parsed =
        PasswordHash::new(&user.password_hash).map_err(|_| WebError::Core(CoreError::Auth))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| WebError::Core(CoreError::Auth))?;

    info!(user_id = user.id, username = %user.username, "Login verified");
    Ok(user)
}

/// Hashes a password with a fresh random salt.
fn hash_password(password: &str) -> WebResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| WebError::Db(DbError::Internal(format!("password hashing: {e}"))))?;

    Ok(digest.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::ValidationError;
    use stockroom_db::DbConfig;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_register_stores_digest_not_password() {
        let db = db().await;
        let user = register(&db, "alice", "alice@example.com", "secret1", "secret1")
            .await
            .unwrap();

        assert_ne!(user.password_hash, "secret1");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_password_mismatch_creates_no_row() {
        let db = db().await;
        let err = register(&db, "bob", "bob@example.com", "secret1", "secret2")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            WebError::Core(CoreError::Validation(ValidationError::PasswordMismatch))
        ));
        assert!(db.users().find_by_identifier("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let db = db().await;
        register(&db, "carol", "carol@example.com", "secret1", "secret1")
            .await
            .unwrap();

        let err = register(&db, "carol", "other@example.com", "secret1", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, WebError::Core(CoreError::Conflict)));

        let err = register(&db, "other", "carol@example.com", "secret1", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, WebError::Core(CoreError::Conflict)));
    }

    #[tokio::test]
    async fn test_login_by_username_and_by_email() {
        let db = db().await;
        register(&db, "dave", "dave@example.com", "secret1", "secret1")
            .await
            .unwrap();

        let by_name = login(&db, "dave", "secret1").await.unwrap();
        let by_email = login(&db, "dave@example.com", "secret1").await.unwrap();
        assert_eq!(by_name.id, by_email.id);
    }

    #[tokio::test]
    async fn test_wrong_password_is_auth_error() {
        let db = db().await;
        register(&db, "erin", "erin@example.com", "secret1", "secret1")
            .await
            .unwrap();

        let err = login(&db, "erin", "wrong").await.unwrap_err();
        assert!(matches!(err, WebError::Core(CoreError::Auth)));
    }

    #[tokio::test]
    async fn test_unknown_identifier_is_the_same_auth_error() {
        let db = db().await;
        let err = login(&db, "nobody", "whatever").await.unwrap_err();
        assert!(matches!(err, WebError::Core(CoreError::Auth)));
    }
}
