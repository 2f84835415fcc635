//! State management module
//!
//! The persisted timer record and the store that guards and saves it.

pub mod timer_state;
pub mod timer_store;

// Re-export main types
pub use timer_state::{hours_to_seconds, Phase, TimerState};
pub use timer_store::{StartOutcome, StopOutcome, TimerStore};
