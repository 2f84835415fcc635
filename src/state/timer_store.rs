//! Persistent, lock-guarded timer store

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tracing::{debug, error, info};

use super::{hours_to_seconds, TimerState};
use crate::{
    error::StoreError,
    utils::{Clock, SystemClock},
};

/// Result of a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

impl StartOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::AlreadyRunning => "already running",
        }
    }
}

/// Result of a stop request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    AlreadyStopped,
}

impl StopOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::AlreadyStopped => "already stopped",
        }
    }
}

/// Owner of the single timer state and its backing file
///
/// Queries take the read lock. Mutations hold the write lock across the
/// file write, so a reader never sees a change that has not been written.
/// A failed write is reported but the in-memory change is kept.
#[derive(Debug)]
pub struct TimerStore {
    state: RwLock<TimerState>,
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl TimerStore {
    /// Load the store from `path` using the system clock
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::load_with_clock(path, Arc::new(SystemClock))
    }

    /// Load the store from `path`, reading time from `clock`
    ///
    /// A missing file yields a zeroed timer.
    pub fn load_with_clock(
        path: impl Into<PathBuf>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        let state = read_state(&path)?;
        debug!("Loaded timer state from {}: {:?}", path.display(), state);

        Ok(Self {
            state: RwLock::new(state),
            path,
            clock,
        })
    }

    /// Path of the backing state file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> Result<TimerState, StoreError> {
        Ok(*self.read()?)
    }

    /// Whether the timer is running, and total elapsed seconds
    pub fn elapsed(&self) -> Result<(bool, i64), StoreError> {
        let state = self.read()?;
        Ok((state.is_running, state.elapsed_at(self.clock.now())))
    }

    /// Start the timer, optionally re-baselining it to `offset_hours`
    ///
    /// A positive offset replaces any banked time, including the interval
    /// folded in from a previous pause.
    pub fn start(&self, offset_hours: Option<f64>) -> Result<StartOutcome, StoreError> {
        let mut state = self.write()?;

        if state.is_running {
            debug!("Start requested while already running");
            return Ok(StartOutcome::AlreadyRunning);
        }

        state.fold_paused();

        if let Some(hours) = offset_hours.filter(|h| *h > 0.0) {
            // Offsets beyond the i64 range saturate
            state.offset_seconds = hours_to_seconds(hours).unwrap_or(i64::MAX);
        }

        state.start_time = self.clock.now();
        state.is_running = true;

        self.persist(&state)?;
        info!(
            "Timer started (offset_hours={}, offset_seconds={})",
            offset_hours.unwrap_or(0.0),
            state.offset_seconds
        );
        Ok(StartOutcome::Started)
    }

    /// Stop the timer, banking the running interval
    pub fn stop(&self) -> Result<StopOutcome, StoreError> {
        let mut state = self.write()?;

        if !state.is_running {
            debug!("Stop requested while already stopped");
            return Ok(StopOutcome::AlreadyStopped);
        }

        state.stopped_at = self.clock.now();
        state.is_running = false;

        self.persist(&state)?;
        info!("Timer stopped at {}", state.stopped_at);
        Ok(StopOutcome::Stopped)
    }

    /// Zero the timer regardless of its current phase
    pub fn reset(&self) -> Result<(), StoreError> {
        let mut state = self.write()?;
        *state = TimerState::new();

        self.persist(&state)?;
        info!("Timer reset");
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, TimerState>, StoreError> {
        self.state.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, TimerState>, StoreError> {
        self.state.write().map_err(|_| StoreError::LockPoisoned)
    }

    fn persist(&self, state: &TimerState) -> Result<(), StoreError> {
        write_state(&self.path, state).map_err(|source| {
            error!("Failed to save state to {}: {}", self.path.display(), source);
            StoreError::PersistenceFailed {
                path: self.path.clone(),
                source,
            }
        })
    }
}

fn read_state(path: &Path) -> Result<TimerState, StoreError> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("No state file at {}, starting with a fresh timer", path.display());
            return Ok(TimerState::new());
        }
        Err(source) => {
            return Err(StoreError::StateUnreadable {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_slice(&data).map_err(|source| StoreError::StateCorrupt {
        path: path.to_path_buf(),
        source,
    })
}

fn write_state(path: &Path, state: &TimerState) -> io::Result<()> {
    let data = serde_json::to_vec_pretty(state)?;
    fs::write(path, data)
}
