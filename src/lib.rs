//! Asset Auditor Library
//!
//! Audits declared media assets against existence, type, dimension and size
//! expectations, collecting violations into a pluggable report.

pub mod config;
pub mod core;
pub mod reporting;
pub mod tabular;

pub use crate::core::engine;
pub use crate::core::probe;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{AuditConfig, CheckSpec, EntityListSpec, DEFAULT_CONFIG_PATH};
    pub use crate::core::engine::{run_audit, Auditor, CheckRequest, PathScope};
    pub use crate::core::probe::{AssetProber, IdentifyProber, ProbeInfo};
    pub use crate::reporting::collector::{MessageCollector, Severity, ValidationMessage};
    pub use crate::reporting::formatter::{ConsoleFormatter, FormatKind, Formatter, JsonFormatter};
    pub use crate::reporting::html_report::HtmlFormatter;
    pub use crate::tabular::entity_list::{EntityList, Row};
}
