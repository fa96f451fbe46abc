use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    dashboard::TokenSnapshot,
    models::{
        dto::{Message, SelectToken, TokenQuery},
        Error, Token,
    },
    services::filter::{filter_tokens, sort_tokens},
    AppState,
};

#[derive(OpenApi)]
#[openapi(paths(
    list_tokens_handler,
    refresh_tokens_handler,
    get_selected_token_handler,
    select_token_handler
))]
/// Defines the OpenAPI spec for token directory endpoints
pub struct TokensApi;

/// Used to group token endpoints together in the OpenAPI documentation
pub const TOKEN_API_GROUP: &str = "TOKEN";

/// Builds a router for all the token routes
pub fn token_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_tokens_handler))
        .route("/refresh", post(refresh_tokens_handler))
        .route(
            "/selected",
            get(get_selected_token_handler).put(select_token_handler),
        )
}

#[utoipa::path(
    get,
    path = "/api/tokens",
    tag = TOKEN_API_GROUP,
    params(TokenQuery),
    responses(
        (status = 200, description = "Filtered and sorted token directory", body = TokenSnapshot),
    )
)]
pub async fn list_tokens_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
) -> Json<TokenSnapshot> {
    let mut snapshot = state.dashboard.tokens.snapshot().await;
    if let Some(search) = query.search.as_deref() {
        snapshot.tokens = filter_tokens(&snapshot.tokens, search);
    }
    if let Some(sort) = query.sort_by {
        sort_tokens(&mut snapshot.tokens, sort);
    }
    Json(snapshot)
}

#[utoipa::path(
    post,
    path = "/api/tokens/refresh",
    tag = TOKEN_API_GROUP,
    responses(
        (status = 200, description = "Directory reloaded", body = TokenSnapshot),
        (status = 502, description = "Token directory unreachable", body = Message),
    )
)]
pub async fn refresh_tokens_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TokenSnapshot>, Error> {
    state
        .dashboard
        .tokens
        .refresh(&state.ext, &state.random)
        .await?;
    Ok(Json(state.dashboard.tokens.snapshot().await))
}

#[utoipa::path(
    get,
    path = "/api/tokens/selected",
    tag = TOKEN_API_GROUP,
    responses(
        (status = 200, description = "Currently selected token", body = Token),
        (status = 404, description = "No token selected", body = Message),
    )
)]
pub async fn get_selected_token_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Token>, Error> {
    let token = state
        .dashboard
        .tokens
        .selected()
        .await
        .ok_or((StatusCode::NOT_FOUND, "No token selected"))?;
    Ok(Json(token))
}

#[utoipa::path(
    put,
    path = "/api/tokens/selected",
    tag = TOKEN_API_GROUP,
    request_body = SelectToken,
    responses(
        (status = 200, description = "Token selected", body = Token),
        (status = 400, description = "Address not in the directory", body = Message),
    )
)]
pub async fn select_token_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SelectToken>,
) -> Result<Json<Token>, Error> {
    let token = state
        .dashboard
        .tokens
        .select(&body.address)
        .await
        .ok_or((StatusCode::BAD_REQUEST, "Token is not listed"))?;
    Ok(Json(token))
}
