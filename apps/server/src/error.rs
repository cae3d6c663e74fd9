//! Web error type.
//!
//! Handlers surface expected failures (bad input, duplicate registration,
//! wrong password) as flash messages and redirects themselves; [`WebError`]
//! carries whatever still propagates through `?`. Its response is a
//! redirect to a safe page, never a raw fault body.

use axum::response::{IntoResponse, Redirect, Response};
use tracing::error;

use stockroom_core::CoreError;
use stockroom_db::DbError;

/// Errors escaping a route handler.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl WebError {
    /// The message a user should see for this failure.
    ///
    /// Expected domain failures get their own wording; infrastructure
    /// failures all collapse into one generic line.
    pub fn user_message(&self) -> String {
        match self {
            WebError::Core(CoreError::Validation(v)) => v.to_string(),
            WebError::Core(CoreError::Conflict) => {
                "Username or email already exists!".to_string()
            }
            WebError::Core(CoreError::Auth) => "Invalid username or password!".to_string(),
            WebError::Core(CoreError::ItemNotFound(_)) => "Item not found.".to_string(),
            WebError::Core(CoreError::EmptyCart) => "Your cart is empty!".to_string(),
            WebError::Db(DbError::UniqueViolation { .. }) => {
                "Username or email already exists!".to_string()
            }
            WebError::Db(DbError::NotFound { .. }) => "Item not found.".to_string(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");

        // The index page depends on nothing, so it cannot re-fail
        Redirect::to("/").into_response()
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::ValidationError;

    #[test]
    fn test_domain_failures_have_specific_wording() {
        let err = WebError::Core(CoreError::Conflict);
        assert_eq!(err.user_message(), "Username or email already exists!");

        let err = WebError::Core(CoreError::Auth);
        assert_eq!(err.user_message(), "Invalid username or password!");

        let err = WebError::Core(CoreError::ItemNotFound(7));
        assert_eq!(err.user_message(), "Item not found.");

        let err = WebError::Core(CoreError::Validation(ValidationError::PasswordMismatch));
        assert!(err.user_message().to_lowercase().contains("password"));
    }

    #[test]
    fn test_infrastructure_failures_stay_generic() {
        let err = WebError::Db(DbError::PoolExhausted);
        assert_eq!(
            err.user_message(),
            "Something went wrong. Please try again."
        );
    }
}
