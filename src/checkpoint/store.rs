use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::types::ScanFingerprint;

use super::state::ScanState;
use super::CheckpointError;

/// A scan checkpoint stored as one JSON file.
///
/// Writes go to a sibling temp file that is synced and then renamed over the
/// checkpoint, so a crash mid-write leaves the previous state intact.
/// Not safe for concurrent writers.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` if no checkpoint has been written yet.
    pub fn load(&self) -> Result<Option<ScanState>, CheckpointError> {
        let f = match fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let state: ScanState = serde_json::from_reader(f)?;

        tracing::info!(
            path = %self.path.display(),
            completed = state.total_completed(),
            "Loaded scan checkpoint"
        );

        Ok(Some(state))
    }

    pub fn load_or_new(&self, fingerprint: ScanFingerprint) -> Result<ScanState, CheckpointError> {
        Ok(self.load()?.unwrap_or_else(|| ScanState::new(fingerprint)))
    }

    pub fn save(&self, state: &ScanState) -> Result<(), CheckpointError> {
        let temp_path = self.path.with_extension("json.tmp");

        let f = fs::File::create(&temp_path)?;
        serde_json::to_writer_pretty(&f, state)?;
        f.sync_all()?;

        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            completed = state.total_completed(),
            "Saved scan checkpoint"
        );
        Ok(())
    }

    /// Remove the checkpoint. Succeeds if there is none.
    pub fn clear(&self) -> Result<(), CheckpointError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
