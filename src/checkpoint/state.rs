use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ParamSetKey, ScanFingerprint};

/// Progress of a scan: how many runs of each parameter set have finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanState {
    /// Scan that last wrote this state. A different scan may resume it.
    pub scan_fingerprint: ScanFingerprint,
    pub created_at: DateTime<Utc>, // informational only
    pub updated_at: DateTime<Utc>, // informational only
    pub completed: BTreeMap<ParamSetKey, usize>,
}

impl ScanState {
    pub fn new(scan_fingerprint: ScanFingerprint) -> Self {
        let now = Utc::now();
        Self {
            scan_fingerprint,
            created_at: now,
            updated_at: now,
            completed: BTreeMap::new(),
        }
    }

    pub fn completed(&self, key: &ParamSetKey) -> usize {
        self.completed.get(key).copied().unwrap_or(0)
    }

    pub fn record(&mut self, key: ParamSetKey) {
        *self.completed.entry(key).or_insert(0) += 1;
        self.updated_at = Utc::now();
    }

    pub fn total_completed(&self) -> usize {
        self.completed.values().sum()
    }
}
