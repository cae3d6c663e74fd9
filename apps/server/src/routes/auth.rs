//! Registration, login and logout routes.
//!
//! POST handlers follow the flash-and-redirect flow end to end: a failed
//! registration bounces back to `/register` with the reason, a failed
//! login back to `/login`, and success lands on the next page in the flow.

use axum::extract::State;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum::Form;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::debug;

use crate::error::WebResult;
use crate::extract::OptionalAuth;
use crate::services;
use crate::session::{flash, set_current_user, take_flash, CurrentUser};
use crate::AppState;

// =============================================================================
// Page Views
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPageView {
    pub page: &'static str,
    pub flash: Vec<String>,
}

/// `GET /register`
pub async fn register_page(session: Session) -> Json<AuthPageView> {
    Json(AuthPageView {
        page: "register",
        flash: take_flash(&session).await,
    })
}

/// `GET /login`
pub async fn login_page(session: Session) -> Json<AuthPageView> {
    Json(AuthPageView {
        page: "login",
        flash: take_flash(&session).await,
    })
}

// =============================================================================
// Registration
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// `POST /register`
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> WebResult<Response> {
    match services::auth::register(
        &state.db,
        &form.username,
        &form.email,
        &form.password,
        &form.confirm_password,
    )
    .await
    {
        Ok(_) => {
            flash(&session, "Registration successful! Please login.").await;
            Ok(Redirect::to("/login").into_response())
        }
        Err(err) => {
            debug!(error = %err, "Registration rejected");
            flash(&session, err.user_message()).await;
            Ok(Redirect::to("/register").into_response())
        }
    }
}

// =============================================================================
// Login / Logout
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Username or email, one field for both. The login form historically
    /// posts it as `username`, so that spelling is accepted too.
    #[serde(default, alias = "username")]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> WebResult<Response> {
    match services::auth::login(&state.db, &form.identifier, &form.password).await {
        Ok(user) => {
            set_current_user(
                &session,
                &CurrentUser {
                    id: user.id,
                    username: user.username,
                },
            )
            .await?;
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(err) => {
            debug!(identifier = %form.identifier, "Login rejected");
            flash(&session, err.user_message()).await;
            Ok(Redirect::to("/login").into_response())
        }
    }
}

/// `GET /logout`
///
/// Clears the whole session: login state, cart and any pending flash all
/// go at once, for any visitor, logged in or not.
pub async fn logout(OptionalAuth(user): OptionalAuth, session: Session) -> Redirect {
    if let Some(user) = &user {
        debug!(user_id = user.id, "Logout");
    }
    session.clear().await;
    Redirect::to("/login")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_accepts_username_spelling() {
        // The historical login form posts the field as "username"
        let form: LoginForm =
            serde_json::from_str(r#"{"username":"dave","password":"secret1"}"#).unwrap();
        assert_eq!(form.identifier, "dave");

        let form: LoginForm =
            serde_json::from_str(r#"{"identifier":"dave@example.com","password":"secret1"}"#)
                .unwrap();
        assert_eq!(form.identifier, "dave@example.com");
    }
}
