//! Micro-DSL for specifying parameter scans.
//!
//! A [`Scan`] sweeps the cartesian product of its parameters. Parameters
//! declared *jointly* move together index by index and count as one axis.
//! Repeat rules decide how many times each combination is run, and a
//! checkpoint lets an interrupted scan pick up where it stopped, even after
//! its parameters were changed.
//!
//! ```
//! use pscan::{linspace, values, JointGroup, Scan};
//!
//! let mut scan = Scan::new();
//! scan.add_params([("c", linspace(10.0, 20.0, 3))]).unwrap();
//! scan.add_joint(
//!     JointGroup::new([("a", values([0, 1])), ("b", values(["x", "y"]))]).unwrap(),
//! )
//! .unwrap();
//! scan.add_count(|p| if p.get_f64("c")? >= 14.0 { Some(1) } else { Some(2) });
//!
//! assert_eq!(scan.combination_count(), 6);
//! assert_eq!(scan.params().count(), 8);
//! ```

pub mod checkpoint;
pub mod scan;
pub mod spec;
pub mod types;

pub use checkpoint::{CheckpointError, CheckpointStore, RunError, RunSummary, ScanState};
pub use scan::{
    CompareOp, Condition, ConditionalRepeat, JointGroup, RepeatRule, Scan, ScanError, ScanIter,
    ScanPoint,
};
pub use spec::{linspace, logspace, range, ScanSpec, SpecError, ValueSpec};
pub use types::{values, ParamSet, ParamSetKey, ParamValue, ScanFingerprint};
