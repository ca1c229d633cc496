//! In-memory score store

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use super::{PersistenceError, ScoreStore};

/// Score store kept in memory
///
/// Clones share the same slot, so a test can keep a handle on a store it
/// handed to a simulation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<AtomicU32>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self {
            slot: Arc::new(AtomicU32::new(value)),
            unavailable: false,
        }
    }

    /// A store whose every call fails, like disabled browser storage
    pub fn unavailable() -> Self {
        Self {
            slot: Arc::default(),
            unavailable: true,
        }
    }
}

impl ScoreStore for MemoryStore {
    fn best_score(&self) -> Result<u32, PersistenceError> {
        if self.unavailable {
            return Err(PersistenceError::Unavailable("memory store disabled".into()));
        }
        Ok(self.slot.load(Ordering::Relaxed))
    }

    fn set_best_score(&mut self, value: u32) -> Result<(), PersistenceError> {
        if self.unavailable {
            return Err(PersistenceError::Unavailable("memory store disabled".into()));
        }
        self.slot.store(value, Ordering::Relaxed);
        Ok(())
    }
}
