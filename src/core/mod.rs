//! Validation engine and asset probing

pub mod engine;
pub mod probe;

pub use engine::{run_audit, Auditor, CheckRequest, PathScope};
pub use probe::{AssetProber, IdentifyProber, ProbeInfo};
