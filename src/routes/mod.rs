mod calendar;
mod health;
mod leaderboard;
mod swagger;
mod swaps;
mod theme;
mod tokens;
use health::health_checker_handler;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::{routing::get, Router};
use std::error::Error;
use std::sync::Arc;

fn cors_layer(cors_url: Option<&str>) -> Result<CorsLayer, Box<dyn Error>> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([CONTENT_TYPE]);
    Ok(match cors_url {
        Some(url) => {
            info!("Allowing cross-origin requests from {}", url);
            cors.allow_origin(HeaderValue::from_str(url)?)
        }
        None => cors.allow_origin(Any),
    })
}

pub fn make_app(state: Arc<AppState>) -> Result<Router, Box<dyn Error>> {
    let cors = cors_layer(state.config.cors_url.as_deref())?;

    let ret = Router::new()
        .route("/api", get(health_checker_handler))
        .route("/api/health", get(health_checker_handler))
        .nest("/api/tokens", tokens::token_routes())
        .nest("/api/leaderboard", leaderboard::leaderboard_routes())
        .nest("/api/user", leaderboard::user_routes())
        .nest("/api/market", leaderboard::market_routes())
        .nest("/api/swaps", swaps::swap_routes())
        .nest("/api/calendar", calendar::calendar_routes())
        .nest("/api/theme", theme::theme_routes())
        .merge(swagger::build_documentation())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Ok(ret)
}
