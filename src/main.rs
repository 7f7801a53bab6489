// src/main.rs
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use workout_tracker::{build_router, config::Config, database, state::AppState};

#[tokio::main]
async fn main() {
    // Load environment variables
    let dotenv_loaded = dotenv().is_ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if dotenv_loaded {
        tracing::info!("Loaded config from .env file");
    } else {
        tracing::info!("No .env file found, using system environment variables");
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return;
        }
    };

    // Create database pool, schema and catalog before accepting traffic
    let db_pool = match database::prepare(&config.db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, db_path = %config.db_path, "Database startup failed");
            return;
        }
    };

    let host = config.host;
    let base_port = config.port;
    let app = build_router(AppState::new(db_pool, config));

    // Try base_port..base_port+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = base_port.saturating_add(offset);
            let addr = SocketAddr::from((host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Workout Tracker running on http://{}", addr);
                l
            }
            None => {
                tracing::error!("Failed to bind to any port starting at {} on {}", base_port, host);
                return;
            }
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}
