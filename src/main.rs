mod app_state;
mod config;
mod dashboard;
mod models;
mod preferences;
mod random;
mod routes;
mod services;
pub mod external;
pub use app_state::AppState;
pub use config::Config;

use crate::routes::make_app;
use dotenv::dotenv;
use std::{error::Error, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    let config = Config::init();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    let port = config.port;
    let state = Arc::new(AppState::new(config));

    info!("Loading token directory...");
    match state
        .dashboard
        .tokens
        .refresh(&state.ext, &state.random)
        .await
    {
        Ok(count) => info!("Token directory ready with {} tokens", count),
        Err(e) => error!("Starting without a token directory: {}", e),
    }

    let app = make_app(state)?;
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("🚀 Server started successfully on port {}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
