pub mod identifiers;
pub mod value;

pub use identifiers::{ParamSetKey, ScanFingerprint};
pub use value::{values, ParamSet, ParamValue};
