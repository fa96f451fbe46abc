use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    models::{
        dto::{Message, SwapQuery, SwapsResponse},
        Error,
    },
    AppState,
};

#[derive(OpenApi)]
#[openapi(paths(list_swaps_handler, address_swaps_handler))]
/// Defines the OpenAPI spec for swap endpoints
pub struct SwapsApi;

/// Used to group swap endpoints together in the OpenAPI documentation
pub const SWAP_API_GROUP: &str = "SWAP";

/// Builds a router for all the swap routes
pub fn swap_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_swaps_handler))
        .route("/:address", get(address_swaps_handler))
}

async fn ticker_or_selected(state: &AppState, query: SwapQuery) -> String {
    match query.ticker {
        Some(ticker) if !ticker.is_empty() => ticker,
        _ => state.dashboard.tokens.selected_symbol().await,
    }
}

#[utoipa::path(
    get,
    path = "/api/swaps",
    tag = SWAP_API_GROUP,
    params(SwapQuery),
    responses(
        (status = 200, description = "Recent swaps of the token", body = SwapsResponse),
        (status = 502, description = "Swap API unreachable", body = Message),
    )
)]
pub async fn list_swaps_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SwapQuery>,
) -> Result<Json<SwapsResponse>, Error> {
    let ticker = ticker_or_selected(&state, query).await;
    let swaps = state.ext.fetch_swaps(&ticker, None).await?;
    Ok(Json(SwapsResponse::new(ticker, None, swaps)))
}

#[utoipa::path(
    get,
    path = "/api/swaps/{address}",
    tag = SWAP_API_GROUP,
    params(
        ("address" = String, Path, description = "Wallet address"),
        SwapQuery
    ),
    responses(
        (status = 200, description = "Swaps of one wallet", body = SwapsResponse),
        (status = 502, description = "Swap API unreachable", body = Message),
    )
)]
pub async fn address_swaps_handler(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
    Query(query): Query<SwapQuery>,
) -> Result<Json<SwapsResponse>, Error> {
    let ticker = ticker_or_selected(&state, query).await;
    let swaps = state.ext.fetch_swaps(&ticker, Some(&address)).await?;
    Ok(Json(SwapsResponse::new(ticker, Some(address), swaps)))
}
