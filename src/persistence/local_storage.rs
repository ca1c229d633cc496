//! Browser LocalStorage score store (wasm32)

use super::{PersistenceError, ScoreStore};

/// Best score kept under a LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    /// LocalStorage key used by earlier releases of the game
    pub const DEFAULT_KEY: &'static str = "snakeHighScore";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .ok_or_else(|| PersistenceError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|_| PersistenceError::Unavailable("localStorage access denied".into()))?
            .ok_or_else(|| PersistenceError::Unavailable("localStorage disabled".into()))
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl ScoreStore for LocalStorageStore {
    fn best_score(&self) -> Result<u32, PersistenceError> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(raw)) => Ok(serde_json::from_str(&raw)?),
            Ok(None) => Ok(0),
            Err(_) => Err(PersistenceError::Unavailable("localStorage read failed".into())),
        }
    }

    fn set_best_score(&mut self, value: u32) -> Result<(), PersistenceError> {
        let storage = Self::storage()?;
        storage
            .set_item(&self.key, &value.to_string())
            .map_err(|_| PersistenceError::Unavailable("localStorage write failed".into()))
    }
}
