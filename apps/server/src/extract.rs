//! Authentication extractors.
//!
//! Gated routes declare [`RequireAuth`] as a handler argument; the session
//! check runs before the handler body and an anonymous visitor is
//! redirected to the login page.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::debug;

use crate::session::{self, CurrentUser};
use stockroom_core::CoreError;

/// Extractor that requires a logged-in session.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Rejection for [`RequireAuth`]: the gated operation was attempted
/// without an active session. Always answers with a redirect to the login
/// page, never a raw 401.
pub struct AuthRejection(pub CoreError);

impl AuthRejection {
    fn unauthorized() -> Self {
        AuthRejection(CoreError::Unauthorized)
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        debug!(error = %self.0, "Gated route refused");
        Redirect::to("/login").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // The session is set in extensions by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(AuthRejection::unauthorized)?;

        let user = session::current_user(session)
            .await
            .ok_or_else(AuthRejection::unauthorized)?;

        Ok(Self(user))
    }
}

/// Extractor that optionally reads the current user without rejecting.
///
/// Used by the public pages and by the search endpoint, whose
/// unauthenticated answer is an empty result set rather than a redirect.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session::current_user(session).await,
            None => None,
        };

        Ok(Self(user))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_rejection_redirects_to_login() {
        let response = AuthRejection::unauthorized().into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(axum::http::header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/login")
        );
    }
}
