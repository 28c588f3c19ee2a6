//! Entity list loading and row iteration

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One data row of an entity list, with field access by header name
#[derive(Debug, Clone)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// A named, ordered collection of tabular records
///
/// The source is read as raw lines; comment lines (leading `#`, including the
/// quoted `"#` variant) and blank lines are discarded before parsing. The
/// first remaining line is the header, every following line is a data row.
#[derive(Debug)]
pub struct EntityList {
    pub name: String,
    rows: Vec<Row>,
}

impl EntityList {
    /// Load an entity list from a tabular source file
    ///
    /// # Arguments
    /// * `name` - Identifier for the list, used to bucket validation messages
    /// * `source` - Path to the tabular source file
    pub fn load(name: &str, source: &Path) -> Result<Self> {
        let content = fs::read_to_string(source)
            .with_context(|| format!("failed to read entity source {}", source.display()))?;
        Ok(Self::parse(name, &content))
    }

    /// Parse an entity list from in-memory tabular content
    pub fn parse(name: &str, content: &str) -> Self {
        let mut lines = content.lines().filter(|line| !is_comment_or_blank(line));

        let headers: Vec<String> = match lines.next() {
            Some(header) => split_fields(header),
            None => {
                return Self {
                    name: name.to_string(),
                    rows: Vec::new(),
                }
            }
        };

        let rows = lines
            .map(|line| Row {
                fields: headers.iter().cloned().zip(split_fields(line)).collect(),
            })
            .collect();

        Self {
            name: name.to_string(),
            rows,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn is_comment_or_blank(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("\"#")
}

/// Split a line into comma-separated fields, honoring double quotes
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                // "" inside a quoted field is a literal quote
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => {
                in_quotes = true;
                field.clear();
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field).trim().to_string());
            }
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}
