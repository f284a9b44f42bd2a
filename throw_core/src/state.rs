//! Cached streak record with file locking.
//!
//! The cache is a convenience for quick display; it is always recomputed
//! from the session log and never treated as authoritative.

use crate::streak::{calculate_streak, last_log_date};
use crate::{Error, Result, ThrowSession};
use chrono::NaiveDate;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Last computed streak and the date of the newest session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub current: u32,
    pub last_log_date: Option<NaiveDate>,
}

impl StreakRecord {
    /// Recompute the record from the session log
    pub fn refresh(sessions: &[ThrowSession], today: NaiveDate) -> Self {
        Self {
            current: calculate_streak(sessions, today),
            last_log_date: last_log_date(sessions),
        }
    }

    /// Load the record with shared locking
    ///
    /// Returns the default record if the file doesn't exist or can't be
    /// read or parsed; a warning is logged in the latter cases.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No streak cache found, using default");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open streak cache {:?}: {}. Using defaults.", path, e);
                return Ok(Self::default());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock streak cache {:?}: {}. Using defaults.", path, e);
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read streak cache {:?}: {}. Using defaults.", path, e);
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<StreakRecord>(&contents) {
            Ok(record) => Ok(record),
            Err(e) => {
                tracing::warn!("Failed to parse streak cache {:?}: {}. Using defaults.", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Save the record atomically (temp file, sync, rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::State(format!("streak cache path {:?} has no parent", path)))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved streak cache to {:?}", path);
        Ok(())
    }

    /// Recompute from `sessions` and persist
    pub fn update(path: &Path, sessions: &[ThrowSession], today: NaiveDate) -> Result<Self> {
        let record = Self::refresh(sessions, today);
        record.save(path)?;
        Ok(record)
    }

    /// Remove the cache file
    pub fn clear(path: &Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
