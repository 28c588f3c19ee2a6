//! Ordered accumulation of validation messages per entity

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Kind of violation attached to a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Declared asset does not exist at the resolved path
    Missing,
    /// Asset exists but fails a type, dimension or size expectation
    Invalid,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Missing => write!(f, "missing"),
            Severity::Invalid => write!(f, "invalid"),
        }
    }
}

/// One validation result, immutable once created
#[derive(Debug, Clone, Serialize)]
pub struct ValidationMessage {
    pub entity: String,
    pub severity: Severity,
    pub path: PathBuf,
    pub description: String,
}

/// Entity name to ordered message bucket
///
/// Buckets are created on first message for an entity; insertion order is
/// preserved both across entities and within a bucket.
#[derive(Debug, Default)]
pub struct MessageCollector {
    buckets: IndexMap<String, Vec<ValidationMessage>>,
}

impl MessageCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, message: ValidationMessage) {
        self.buckets
            .entry(message.entity.clone())
            .or_insert_with(Vec::new)
            .push(message);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ValidationMessage])> {
        self.buckets
            .iter()
            .map(|(entity, messages)| (entity.as_str(), messages.as_slice()))
    }

    pub fn entity_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn message_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
