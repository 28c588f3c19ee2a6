//! Report formatters
//!
//! Every formatter implements the same two-operation contract: collect
//! messages while the audit runs, then render them once at the end.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde_json::json;
use std::fmt::Write as _;

use crate::reporting::collector::{MessageCollector, Severity, ValidationMessage};
use crate::reporting::html_report::HtmlFormatter;

/// Destination for validation messages, rendered once after the run
pub trait Formatter {
    fn add_message(&mut self, message: ValidationMessage);
    fn output(&mut self) -> Result<()>;
}

/// Closed set of output formats, selected once at construction time
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatKind {
    /// Colored console text
    Simple,
    /// HTML report file
    Html,
    /// Machine-readable JSON on stdout
    Json,
}

impl FormatKind {
    pub fn build(self) -> Box<dyn Formatter> {
        match self {
            FormatKind::Simple => Box::new(ConsoleFormatter::new()),
            FormatKind::Html => Box::new(HtmlFormatter::new()),
            FormatKind::Json => Box::new(JsonFormatter::new()),
        }
    }
}

/// Console formatter: one header per entity, one line per message
#[derive(Default)]
pub struct ConsoleFormatter {
    collector: MessageCollector,
}

impl ConsoleFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the collected messages to a string
    ///
    /// Entities that never received a message do not appear.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (entity, messages) in self.collector.iter() {
            let _ = writeln!(out, "{} ({} problem(s))", entity.bold(), messages.len());
            for message in messages {
                let tag = match message.severity {
                    Severity::Missing => "missing".red().bold(),
                    Severity::Invalid => "invalid".yellow().bold(),
                };
                let line = format!("  {} {} {}", tag, message.path.display(), message.description);
                let _ = writeln!(out, "{}", line.trim_end());
            }
            out.push('\n');
        }
        out
    }
}

impl Formatter for ConsoleFormatter {
    fn add_message(&mut self, message: ValidationMessage) {
        self.collector.add(message);
    }

    fn output(&mut self) -> Result<()> {
        if self.collector.is_empty() {
            println!("All assets check out.");
            return Ok(());
        }
        println!(
            "{} problem(s) in {} entity list(s)\n",
            self.collector.message_count(),
            self.collector.entity_count()
        );
        print!("{}", self.render());
        Ok(())
    }
}

/// JSON formatter: one object per entity bucket, order preserved
#[derive(Default)]
pub struct JsonFormatter {
    collector: MessageCollector,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let entities: Vec<serde_json::Value> = self
            .collector
            .iter()
            .map(|(entity, messages)| json!({ "entity": entity, "messages": messages }))
            .collect();
        json!({ "entities": entities })
    }
}

impl Formatter for JsonFormatter {
    fn add_message(&mut self, message: ValidationMessage) {
        self.collector.add(message);
    }

    fn output(&mut self) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(&self.to_json())?);
        Ok(())
    }
}
