//! Timer state structure and elapsed-time computation

use serde::{Deserialize, Serialize};

/// Persisted timer record
///
/// All timestamps are whole seconds since the Unix epoch. While running,
/// `stopped_at` is always `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// When the timer was last started, `0` if never started since reset
    pub start_time: i64,
    /// When the timer was last stopped while running, `0` otherwise
    pub stopped_at: i64,
    /// Banked time from earlier runs or a manual baseline
    pub offset_seconds: i64,
    pub is_running: bool,
}

/// Convert an hour count to whole seconds, truncating any fraction
///
/// Returns `None` when the result is not finite or does not fit in an `i64`.
pub fn hours_to_seconds(hours: f64) -> Option<i64> {
    let seconds = (hours * 3600.0).trunc();
    // i64::MAX is not exactly representable; its f64 rounding is 2^63
    if seconds.is_finite() && seconds >= i64::MIN as f64 && seconds < i64::MAX as f64 {
        Some(seconds as i64)
    } else {
        None
    }
}

/// Logical state of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Never started since the last reset
    Idle,
    Running,
    /// Stopped after running
    Paused,
}

impl TimerState {
    /// Create a zeroed, idle timer state
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the state into its phase
    pub fn phase(&self) -> Phase {
        if self.is_running {
            Phase::Running
        } else if self.stopped_at > 0 {
            Phase::Paused
        } else {
            Phase::Idle
        }
    }

    /// Total elapsed seconds as of `now`
    pub fn elapsed_at(&self, now: i64) -> i64 {
        let live = match self.phase() {
            Phase::Running => now.saturating_sub(self.start_time),
            Phase::Paused => self.stopped_at.saturating_sub(self.start_time),
            Phase::Idle => 0,
        };
        self.offset_seconds.saturating_add(live)
    }

    /// Move a paused interval into the offset so a new run can begin
    pub(crate) fn fold_paused(&mut self) {
        if self.stopped_at > 0 {
            self.offset_seconds = self
                .offset_seconds
                .saturating_add(self.stopped_at.saturating_sub(self.start_time));
            self.stopped_at = 0;
        }
    }
}
