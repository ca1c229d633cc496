//! Best score persistence
//!
//! A store holds a single integer. Stores may fail (storage disabled, disk
//! errors, corrupt files); `BestScore` absorbs those failures so they never
//! reach gameplay:
//! - read failure: best score starts at 0
//! - write failure: logged, the in-memory value still advances

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;

#[cfg(target_arch = "wasm32")]
mod local_storage;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use std::fmt;

use thiserror::Error;

/// Errors raised by a score store
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed score record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Get/set access to the persisted best score
///
/// Stores travel with the simulation, so they must be `Send`.
pub trait ScoreStore: Send {
    /// Read the stored best score; `Ok(0)` when nothing was stored yet
    fn best_score(&self) -> Result<u32, PersistenceError>;

    /// Overwrite the stored best score
    fn set_best_score(&mut self, value: u32) -> Result<(), PersistenceError>;
}

/// Best score tracker in front of a store
pub struct BestScore {
    value: u32,
    store: Box<dyn ScoreStore>,
}

impl BestScore {
    /// Load the best score once; unreadable stores count as 0
    pub fn load(store: Box<dyn ScoreStore>) -> Self {
        let value = match store.best_score() {
            Ok(v) => {
                log::info!("Loaded best score {}", v);
                v
            }
            Err(e) => {
                log::warn!("Best score unavailable, starting at 0: {}", e);
                0
            }
        };
        Self { value, store }
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    /// Record a score; returns true if it set a new best
    ///
    /// The store write is best-effort.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        if let Err(e) = self.store.set_best_score(score) {
            log::warn!("Failed to save best score {}: {}", score, e);
        }
        true
    }
}

impl Default for BestScore {
    fn default() -> Self {
        Self::load(Box::new(MemoryStore::default()))
    }
}

impl fmt::Debug for BestScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BestScore").field("value", &self.value).finish()
    }
}
