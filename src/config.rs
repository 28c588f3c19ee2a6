//! Declarative audit configuration
//!
//! The configuration file registers entity lists and their checks as plain
//! data; the engine later executes the registered lists. File-name templates
//! reference row columns with `{column}` placeholders.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::engine::CheckRequest;
use crate::tabular::entity_list::Row;

/// Conventional configuration location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "asset_audit.toml";

#[derive(Debug, Deserialize)]
pub struct AuditConfig {
    #[serde(default, rename = "list")]
    pub lists: Vec<EntityListSpec>,
}

/// One registered entity list: tabular source, base path, checks
#[derive(Debug, Deserialize)]
pub struct EntityListSpec {
    pub name: String,
    pub source: PathBuf,
    pub base_path: PathBuf,
    #[serde(default, rename = "check")]
    pub checks: Vec<CheckSpec>,
}

/// One declared check, applied to every row of its list
#[derive(Debug, Deserialize)]
pub struct CheckSpec {
    /// File-name template with `{column}` placeholders
    pub file: String,
    /// Expected `WIDTHxHEIGHT`; absent means no dimension check
    pub dimension: Option<String>,
    /// Maximum allowed size in bytes; absent or 0 means no size check
    #[serde(default)]
    pub max_size_bytes: u64,
}

impl AuditConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read audit configuration {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("malformed audit configuration {}", path.display()))
    }
}

impl CheckSpec {
    /// Expand the file-name template against a concrete row
    pub fn expand(&self, row: &Row) -> Result<CheckRequest> {
        Ok(CheckRequest {
            file: expand_template(&self.file, row)?,
            dimension: self.dimension.clone(),
            max_size_bytes: self.max_size_bytes,
        })
    }
}

fn expand_template(template: &str, row: &Row) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find('}')
            .ok_or_else(|| anyhow!("unclosed '{{' in file template {:?}", template))?;
        let column = &after[..end];
        let value = row.get(column).ok_or_else(|| {
            anyhow!("file template {:?} references unknown column {:?}", template, column)
        })?;
        out.push_str(value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::entity_list::EntityList;

    fn sample_row() -> Row {
        let list = EntityList::parse("t", "id,name\n1,alice\n");
        list.rows()[0].clone()
    }

    #[test]
    fn test_parse_configuration() {
        let config: AuditConfig = toml::from_str(
            r#"
            [[list]]
            name = "avatars"
            source = "data/avatars.csv"
            base_path = "public/avatars"

            [[list.check]]
            file = "{id}/{name}.png"
            dimension = "60x60"
            max_size_bytes = 3072

            [[list.check]]
            file = "{id}/{name}_small.png"
            "#,
        )
        .unwrap();

        assert_eq!(config.lists.len(), 1);
        let list = &config.lists[0];
        assert_eq!(list.name, "avatars");
        assert_eq!(list.source, PathBuf::from("data/avatars.csv"));
        assert_eq!(list.checks.len(), 2);
        assert_eq!(list.checks[0].dimension.as_deref(), Some("60x60"));
        assert_eq!(list.checks[0].max_size_bytes, 3072);
        // absent fields default to "no check"
        assert_eq!(list.checks[1].dimension, None);
        assert_eq!(list.checks[1].max_size_bytes, 0);
    }

    #[test]
    fn test_empty_configuration_registers_nothing() {
        let config: AuditConfig = toml::from_str("").unwrap();
        assert!(config.lists.is_empty());
    }

    #[test]
    fn test_expand_substitutes_row_fields() {
        let spec = CheckSpec {
            file: "{id}/{name}.png".to_string(),
            dimension: Some("60x60".to_string()),
            max_size_bytes: 3072,
        };
        let check = spec.expand(&sample_row()).unwrap();
        assert_eq!(check.file, "1/alice.png");
        assert_eq!(check.dimension.as_deref(), Some("60x60"));
        assert_eq!(check.max_size_bytes, 3072);
    }

    #[test]
    fn test_expand_rejects_unknown_column() {
        let spec = CheckSpec {
            file: "{user_id}.png".to_string(),
            dimension: None,
            max_size_bytes: 0,
        };
        let err = spec.expand(&sample_row()).unwrap_err();
        assert!(err.to_string().contains("user_id"));
    }

    #[test]
    fn test_expand_rejects_unclosed_placeholder() {
        let spec = CheckSpec {
            file: "{id.png".to_string(),
            dimension: None,
            max_size_bytes: 0,
        };
        assert!(spec.expand(&sample_row()).is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(AuditConfig::load(Path::new("/no/such/audit.toml")).is_err());
    }
}
