use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use utoipa::OpenApi;

use crate::{
    dashboard::LeaderboardQuery,
    models::{
        dto::{LeaderboardParams, LeaderboardResponse, Message},
        stats::{base_token, mock_leaderboard_stats, mock_market_data, mock_user_stats, native_token},
        Error, LeaderboardStats, MarketData, Token, UserStats,
    },
    AppState,
};

#[derive(OpenApi)]
#[openapi(paths(
    fetch_leaderboard_handler,
    current_leaderboard_handler,
    leaderboard_stats_handler,
    user_stats_handler,
    market_data_handler,
    trading_pair_handler
))]
/// Defines the OpenAPI spec for leaderboard endpoints
pub struct LeaderboardApi;

/// Used to group leaderboard endpoints together in the OpenAPI documentation
pub const LEADERBOARD_API_GROUP: &str = "LEADERBOARD";

/// Builds a router for all the leaderboard routes
pub fn leaderboard_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(fetch_leaderboard_handler))
        .route("/current", get(current_leaderboard_handler))
        .route("/stats", get(leaderboard_stats_handler))
}

pub fn user_routes() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(user_stats_handler))
}

pub fn market_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(market_data_handler))
        .route("/pair", get(trading_pair_handler))
}

/// Fetches the leaderboard for the requested window, then answers with the
/// filtered view of whatever batch is current afterwards.
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    tag = LEADERBOARD_API_GROUP,
    params(LeaderboardParams),
    responses(
        (status = 200, description = "Ranked and filtered entries", body = LeaderboardResponse),
        (status = 502, description = "Leaderboard API unreachable", body = Message),
    )
)]
pub async fn fetch_leaderboard_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, Error> {
    let token = match params.token.as_deref() {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => state.dashboard.tokens.selected_symbol().await,
    };
    let query = LeaderboardQuery {
        date: params.date.unwrap_or_else(|| Utc::now().date_naive()),
        period: params.period.unwrap_or_default(),
        token,
    };

    if query.token.is_empty() {
        let loading = state.dashboard.leaderboard.snapshot().await.loading;
        return Ok(Json(LeaderboardResponse::empty(query, loading)));
    }

    state
        .dashboard
        .leaderboard
        .refresh(&state.ext, query, &state.random)
        .await?;

    let snapshot = state.dashboard.leaderboard.snapshot().await;
    Ok(Json(LeaderboardResponse::from_snapshot(
        snapshot,
        &params.filter(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/leaderboard/current",
    tag = LEADERBOARD_API_GROUP,
    params(LeaderboardParams),
    responses(
        (status = 200, description = "Last applied batch, filtered", body = LeaderboardResponse),
    )
)]
pub async fn current_leaderboard_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardParams>,
) -> Json<LeaderboardResponse> {
    let snapshot = state.dashboard.leaderboard.snapshot().await;
    Json(LeaderboardResponse::from_snapshot(snapshot, &params.filter()))
}

#[utoipa::path(
    get,
    path = "/api/leaderboard/stats",
    tag = LEADERBOARD_API_GROUP,
    responses(
        (status = 200, description = "Aggregate leaderboard statistics", body = LeaderboardStats),
    )
)]
pub async fn leaderboard_stats_handler() -> Json<LeaderboardStats> {
    Json(mock_leaderboard_stats())
}

#[utoipa::path(
    get,
    path = "/api/user/stats",
    tag = LEADERBOARD_API_GROUP,
    responses(
        (status = 200, description = "Statistics of the connected wallet", body = UserStats),
    )
)]
pub async fn user_stats_handler() -> Json<UserStats> {
    Json(mock_user_stats(Utc::now()))
}

#[utoipa::path(
    get,
    path = "/api/market",
    tag = LEADERBOARD_API_GROUP,
    responses(
        (status = 200, description = "Market overview", body = MarketData),
    )
)]
pub async fn market_data_handler() -> Json<MarketData> {
    Json(mock_market_data())
}

/// Native and counter asset of the default trading pair.
#[utoipa::path(
    get,
    path = "/api/market/pair",
    tag = LEADERBOARD_API_GROUP,
    responses(
        (status = 200, description = "Native token followed by the base token", body = [Token]),
    )
)]
pub async fn trading_pair_handler() -> Json<Vec<Token>> {
    Json(vec![native_token(), base_token()])
}
