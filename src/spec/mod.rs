pub mod scan_spec;
pub mod values;

use thiserror::Error;

use crate::scan::ScanError;

pub use scan_spec::{ParamSpec, ScanSpec};
pub use values::{linspace, logspace, range, Generator, ValueSpec};

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid values for {param}: {reason}")]
    InvalidValues { param: String, reason: String },
    #[error("Invalid scan: {0}")]
    Scan(#[from] ScanError),
}
