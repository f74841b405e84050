use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::value::{hash_str, ParamSet};

/// Content hash of a single parameter assignment.
///
/// Two `ParamSet`s with the same names and values always map to the same key,
/// whatever scan produced them. Checkpoints are keyed on this.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamSetKey(String);

impl ParamSetKey {
    pub fn from_params(params: &ParamSet) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((params.len() as u64).to_le_bytes());
        for (name, value) in params.iter() {
            hash_str(&mut hasher, name);
            value.hash_into(&mut hasher);
        }
        ParamSetKey(finish(hasher))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParamSetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash of a scan's shape: its axes, joint groups and default repeat count.
///
/// Repeat rules are arbitrary closures and do not contribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanFingerprint(String);

impl ScanFingerprint {
    pub(crate) fn from_hasher(hasher: Sha256) -> Self {
        ScanFingerprint(finish(hasher))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScanFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn finish(hasher: Sha256) -> String {
    let hash = hasher.finalize();
    format!("sha256:{}", hex::encode(hash))
}
