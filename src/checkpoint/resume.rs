use std::collections::BTreeMap;
use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::scan::Scan;
use crate::types::{ParamSet, ParamSetKey};

use super::store::CheckpointStore;
use super::RunError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub executed: usize,
    pub skipped: usize,
}

impl Scan {
    /// Run `f` for every point the checkpoint in `store` has not seen yet.
    ///
    /// Progress is keyed on parameter values, so the scan may be changed
    /// between runs: points that were already run are skipped, new values or
    /// higher repeat counts are executed. The checkpoint is saved after each
    /// successful call. On error the work done so far stays recorded.
    ///
    /// A parameter set yielded several times in one pass (duplicate axis
    /// values, repeated joint tuples) is run that many times.
    pub fn run_resumable<F, E>(
        &self,
        store: &CheckpointStore,
        mut f: F,
    ) -> Result<RunSummary, RunError>
    where
        F: FnMut(&ParamSet) -> Result<(), E>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let fingerprint = self.fingerprint();
        let mut state = store.load_or_new(fingerprint.clone())?;

        if state.scan_fingerprint != fingerprint {
            tracing::info!(
                previous = %state.scan_fingerprint,
                current = %fingerprint,
                "Scan changed since checkpoint, resuming with new parameters"
            );
            state.scan_fingerprint = fingerprint;
        }

        // occurrences of each parameter set so far in this pass
        let mut seen: BTreeMap<ParamSetKey, usize> = BTreeMap::new();
        let mut summary = RunSummary::default();
        for point in self.params() {
            let key = ParamSetKey::from_params(&point.params);
            let occurrence = seen.entry(key.clone()).or_insert(0);
            let index = *occurrence;
            *occurrence += 1;

            if state.completed(&key) > index {
                summary.skipped += 1;
                continue;
            }

            f(&point.params).map_err(|e| RunError::Task {
                combination: point.combination,
                repeat: point.repeat,
                source: e.into(),
            })?;

            state.record(key);
            store.save(&state)?;
            summary.executed += 1;
        }

        tracing::info!(
            executed = summary.executed,
            skipped = summary.skipped,
            "Scan run finished"
        );

        Ok(summary)
    }
}
