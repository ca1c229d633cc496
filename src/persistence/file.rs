//! JSON file score store (native)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{PersistenceError, ScoreStore};

/// Current on-disk record version
const RECORD_VERSION: u32 = 1;

/// Versioned record written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScoreRecord {
    version: u32,
    best_score: u32,
}

/// Best score kept in a small JSON file
///
/// Writes go to a sibling `.tmp` file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl ScoreStore for JsonFileStore {
    fn best_score(&self) -> Result<u32, PersistenceError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let record: ScoreRecord = serde_json::from_str(&json)?;
        if record.version != RECORD_VERSION {
            log::warn!(
                "Score record version {} in {} (expected {})",
                record.version,
                self.path.display(),
                RECORD_VERSION
            );
        }
        Ok(record.best_score)
    }

    fn set_best_score(&mut self, value: u32) -> Result<(), PersistenceError> {
        let record = ScoreRecord {
            version: RECORD_VERSION,
            best_score: value,
        };
        let json = serde_json::to_string_pretty(&record)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Best score {} saved to {}", value, self.path.display());
        Ok(())
    }
}
