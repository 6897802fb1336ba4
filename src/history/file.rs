use crate::error::{FrontierError, Result};
use crate::history::{date_key, push_capture, AppendOutcome, Snapshot, SnapshotStore};
use crate::types::model::ModelRecord;
use chrono::NaiveDate;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

enum StoredHistory {
    Missing,
    Loaded(Vec<Snapshot>),
    Unusable(String),
}

pub struct FileSnapshotStore {
    path: PathBuf,
    max_snapshots: usize,
    append_lock: Mutex<()>,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>, max_snapshots: usize) -> Self {
        Self {
            path: path.into(),
            max_snapshots: max_snapshots.max(1),
            append_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("history.json"));
        name.push(suffix);
        self.path.with_file_name(name)
    }

    // One staging file per process; the append lock only covers this one.
    fn staging_path(&self) -> PathBuf {
        self.sibling(&format!(".{}.tmp", std::process::id()))
    }

    fn quarantine_path(&self) -> PathBuf {
        self.sibling(".corrupt")
    }

    fn read_history(&self) -> StoredHistory {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return StoredHistory::Missing;
            }
            Err(error) => return StoredHistory::Unusable(error.to_string()),
        };
        match serde_json::from_str::<Vec<Snapshot>>(&raw) {
            Ok(history) => StoredHistory::Loaded(history),
            Err(error) => StoredHistory::Unusable(error.to_string()),
        }
    }

    fn write_history(&self, history: &[Snapshot]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| self.write_error(error))?;
        }
        let json = serde_json::to_string_pretty(history)?;
        let staging = self.staging_path();
        std::fs::write(&staging, json).map_err(|error| self.write_error(error))?;
        if let Err(error) = std::fs::rename(&staging, &self.path) {
            let _ = std::fs::remove_file(&staging);
            return Err(self.write_error(error));
        }
        Ok(())
    }

    fn write_error(&self, error: std::io::Error) -> FrontierError {
        FrontierError::SnapshotWrite(format!("{}: {}", self.path.display(), error))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Vec<Snapshot> {
        match self.read_history() {
            StoredHistory::Loaded(history) => history,
            StoredHistory::Missing => {
                tracing::debug!(path = %self.path.display(), "no snapshot history yet");
                Vec::new()
            }
            StoredHistory::Unusable(reason) => {
                tracing::warn!(path = %self.path.display(), %reason, "snapshot history unusable, treating as empty");
                Vec::new()
            }
        }
    }

    fn append_on(&self, date: NaiveDate, models: &[ModelRecord]) -> Result<AppendOutcome> {
        let _guard = self
            .append_lock
            .lock()
            .map_err(|_| FrontierError::SnapshotWrite("append lock poisoned".to_string()))?;

        let mut history = match self.read_history() {
            StoredHistory::Loaded(history) => history,
            StoredHistory::Missing => Vec::new(),
            StoredHistory::Unusable(reason) => {
                let quarantine = self.quarantine_path();
                std::fs::copy(&self.path, &quarantine).map_err(|error| self.write_error(error))?;
                tracing::warn!(
                    path = %self.path.display(),
                    saved = %quarantine.display(),
                    %reason,
                    "snapshot history unusable, starting a new log"
                );
                Vec::new()
            }
        };

        match push_capture(&mut history, date, models, self.max_snapshots) {
            Some(outcome) => {
                self.write_history(&history)?;
                tracing::info!(
                    path = %self.path.display(),
                    retained = history.len(),
                    "snapshot appended"
                );
                Ok(outcome)
            }
            None => {
                tracing::info!(date = %date_key(date), "snapshot already captured today");
                Ok(AppendOutcome::AlreadyCaptured {
                    date: date_key(date),
                })
            }
        }
    }
}
