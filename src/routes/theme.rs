use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    models::{
        dto::{Message, ThemeBody},
        Error,
    },
    AppState,
};

#[derive(OpenApi)]
#[openapi(paths(get_theme_handler, set_theme_handler, toggle_theme_handler))]
/// Defines the OpenAPI spec for theme preference endpoints
pub struct ThemeApi;

pub const THEME_API_GROUP: &str = "THEME";

/// Builds a router for all the theme routes
pub fn theme_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_theme_handler).put(set_theme_handler))
        .route("/toggle", post(toggle_theme_handler))
}

#[utoipa::path(
    get,
    path = "/api/theme",
    tag = THEME_API_GROUP,
    responses(
        (status = 200, description = "Stored theme, dark when unset", body = ThemeBody),
        (status = 500, description = "Preferences unreadable", body = Message),
    )
)]
pub async fn get_theme_handler(State(state): State<Arc<AppState>>) -> Result<Json<ThemeBody>, Error> {
    let theme = state.preferences.theme().await?;
    Ok(Json(ThemeBody { theme }))
}

#[utoipa::path(
    put,
    path = "/api/theme",
    tag = THEME_API_GROUP,
    request_body = ThemeBody,
    responses(
        (status = 200, description = "Theme stored", body = ThemeBody),
        (status = 500, description = "Preferences unwritable", body = Message),
    )
)]
pub async fn set_theme_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ThemeBody>,
) -> Result<Json<ThemeBody>, Error> {
    let theme = state.preferences.set_theme(body.theme).await?;
    Ok(Json(ThemeBody { theme }))
}

#[utoipa::path(
    post,
    path = "/api/theme/toggle",
    tag = THEME_API_GROUP,
    responses(
        (status = 200, description = "Theme flipped and stored", body = ThemeBody),
        (status = 500, description = "Preferences unwritable", body = Message),
    )
)]
pub async fn toggle_theme_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ThemeBody>, Error> {
    let theme = state.preferences.toggle_theme().await?;
    Ok(Json(ThemeBody { theme }))
}
