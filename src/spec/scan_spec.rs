use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::scan::{ConditionalRepeat, Scan};

use super::values::ValueSpec;
use super::SpecError;

fn default_repeats() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamSpec {
    pub name: String,
    pub values: ValueSpec,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, values: impl Into<ValueSpec>) -> Self {
        Self {
            name: name.into(),
            values: values.into(),
        }
    }
}

/// Declarative description of a scan, as read from a JSON file.
///
/// Parameters are listed in axis order. `joint` names groups of parameters
/// that vary together; `repeats` rules apply in order after
/// `default_repeats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanSpec {
    pub params: Vec<ParamSpec>,
    #[serde(default)]
    pub joint: Vec<Vec<String>>,
    #[serde(default = "default_repeats")]
    pub default_repeats: usize,
    #[serde(default)]
    pub repeats: Vec<ConditionalRepeat>,
}

impl ScanSpec {
    pub fn from_json_str(s: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SpecError> {
        let f = fs::File::open(path)?;
        let spec = serde_json::from_reader(f)?;
        tracing::debug!(path = %path.display(), "Loaded scan spec");
        Ok(spec)
    }

    pub fn build(&self) -> Result<Scan, SpecError> {
        let mut params = Vec::with_capacity(self.params.len());
        for p in &self.params {
            let values = p.values.expand().map_err(|reason| SpecError::InvalidValues {
                param: p.name.clone(),
                reason,
            })?;
            params.push((p.name.clone(), values));
        }

        let mut scan = Scan::from_params(params, &self.joint)?;
        scan.set_default_repeats(self.default_repeats);
        for rule in &self.repeats {
            scan.add_rule(rule.clone());
        }
        Ok(scan)
    }
}
