pub mod expansion;
pub mod joint;
pub mod repeats;
pub mod scan;

use thiserror::Error;

pub use expansion::{unravel_index, ScanIter, ScanPoint};
pub use joint::JointGroup;
pub use repeats::{CompareOp, Condition, ConditionalRepeat, RepeatRule};
pub use scan::Scan;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error(
        "Param {param} set to vary jointly with {first}, but their sizes ({size},{first_size}) do not match"
    )]
    JointParameterListSize {
        param: String,
        first: String,
        size: usize,
        first_size: usize,
    },
    #[error("Joint list names unknown parameter: {0}")]
    UnknownParameter(String),
    #[error("Parameter {0} already varies jointly")]
    DuplicateJointParameter(String),
    #[error("Joint group must name at least one parameter")]
    EmptyJointGroup,
    #[error("Parameter {0} varies jointly and cannot be set combinatorially")]
    ParameterIsJoint(String),
}
