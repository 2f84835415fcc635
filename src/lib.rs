//! Punch Clock - A personal time-tracking HTTP server
//!
//! This library provides a single start/stop/reset timer whose state is
//! persisted to a JSON file after every change, plus the HTTP API over it.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::StoreError;
pub use state::{TimerState, TimerStore};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
