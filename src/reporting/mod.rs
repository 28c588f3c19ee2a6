//! Message collection and report rendering

pub mod collector;
pub mod formatter;
pub mod html_report;

pub use collector::{MessageCollector, Severity, ValidationMessage};
pub use formatter::{ConsoleFormatter, FormatKind, Formatter, JsonFormatter};
pub use html_report::HtmlFormatter;
