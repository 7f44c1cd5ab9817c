use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    error::{AirQualityError, Result},
    model::HistoryRecord,
};

/// Append-only store of readings, persisted as one pretty-printed JSON
/// array.
///
/// `append` rewrites the whole file rather than truly appending, so the
/// invariant holds: the file is either absent (empty history) or a valid
/// JSON array. Concurrent writers race (last writer wins); acceptable at
/// this scale.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored records in insertion order; empty if the file does not
    /// exist yet.
    pub fn read_all(&self) -> Result<Vec<HistoryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| AirQualityError::Io {
            action: "read",
            path: self.path.clone(),
            source,
        })?;

        let records = serde_json::from_str(&contents).map_err(|source| {
            AirQualityError::Storage { path: self.path.clone(), source }
        })?;

        Ok(records)
    }

    /// Read-modify-rewrite append. Creates parent directories as needed.
    pub fn append(&self, record: HistoryRecord) -> Result<()> {
        let mut records = self.read_all()?;
        records.push(record);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| AirQualityError::Io {
                action: "create directory for",
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // A derived Serialize cannot fail on these records.
        let json = serde_json::to_string_pretty(&records).map_err(|source| {
            AirQualityError::Storage { path: self.path.clone(), source }
        })?;

        fs::write(&self.path, json).map_err(|source| AirQualityError::Io {
            action: "write",
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), total = records.len(), "appended history record");

        Ok(())
    }
}

/// Keep only records whose `location` exactly equals `location`.
/// Case-sensitive, whitespace-sensitive, order-preserving.
pub fn filter_by_location(mut records: Vec<HistoryRecord>, location: &str) -> Vec<HistoryRecord> {
    records.retain(|record| record.location == location);
    records
}
