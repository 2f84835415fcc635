//! Punch Clock - A personal time-tracking HTTP server
//!
//! This is the main entry point for the punch-clock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use punch_clock::{
    config::Config,
    state::TimerStore,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("punch_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting punch-clock server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, state_file={}",
          config.host, config.port, config.state_file.display());

    let store = match TimerStore::load(&config.state_file) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to load state: {}", e);
            std::process::exit(1);
        }
    };

    let app = create_router(store);

    let addr = config.address();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /api/timer - Current timer reading");
    info!("  POST /api/start - Start the timer (optional {{\"offset_hours\": f64}})");
    info!("  POST /api/stop  - Stop the timer");
    info!("  POST /api/reset - Reset the timer to zero");
    info!("  GET  /health    - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
                return Err(e.into());
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
