//! Utility functions module
//!
//! Clock abstraction, elapsed-time formatting and shutdown signal handling.

pub mod clock;
pub mod format;
pub mod signals;

// Re-export main items
pub use clock::{Clock, ManualClock, SystemClock};
pub use format::format_elapsed;
pub use signals::shutdown_signal;
