//! Public welcome page.

use axum::response::Json;
use serde::Serialize;
use tower_sessions::Session;

use crate::extract::OptionalAuth;
use crate::session::take_flash;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub app: &'static str,
    pub message: &'static str,
    pub logged_in_as: Option<String>,
    pub flash: Vec<String>,
}

/// `GET /` and `GET /home`: the landing page, visible to everyone.
pub async fn index(OptionalAuth(user): OptionalAuth, session: Session) -> Json<HomeView> {
    Json(HomeView {
        app: "Stockroom",
        message: "Welcome to the Stockroom inventory system.",
        logged_in_as: user.map(|u| u.username),
        flash: take_flash(&session).await,
    })
}
