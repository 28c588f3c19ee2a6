//! HTML report rendering

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tera::{Context as TeraContext, Tera};

use crate::reporting::collector::{MessageCollector, ValidationMessage};
use crate::reporting::formatter::Formatter;

/// Fixed report location, relative to the working directory.
/// Overwritten on every run.
pub const REPORT_PATH: &str = "asset_audit_report.html";

const REPORT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Asset audit report</title>
<style>
  body { font-family: sans-serif; margin: 2em; }
  h2 { border-bottom: 1px solid #ccc; padding-bottom: 0.2em; }
  td { padding: 2px 10px; }
  .missing { color: #c0392b; font-weight: bold; }
  .invalid { color: #b7950b; font-weight: bold; }
</style>
</head>
<body>
<h1>Asset audit report</h1>
{% if entities | length == 0 %}
<p>All assets check out.</p>
{% endif %}
{% for list in entities %}
<h2>{{ list.name }} ({{ list.messages | length }})</h2>
<table>
{% for message in list.messages %}
<tr>
  <td class="{{ message.severity }}">{{ message.severity }}</td>
  <td>{{ message.path }}</td>
  <td>{{ message.description }}</td>
</tr>
{% endfor %}
</table>
{% endfor %}
</body>
</html>
"#;

#[derive(Serialize)]
struct EntitySection<'a> {
    name: &'a str,
    messages: &'a [ValidationMessage],
}

/// Formatter that renders the full entity map into a single HTML file
pub struct HtmlFormatter {
    collector: MessageCollector,
    output_path: PathBuf,
}

impl HtmlFormatter {
    pub fn new() -> Self {
        Self::with_output_path(PathBuf::from(REPORT_PATH))
    }

    pub fn with_output_path(output_path: PathBuf) -> Self {
        Self {
            collector: MessageCollector::new(),
            output_path,
        }
    }

    pub fn render(&self) -> Result<String> {
        let sections: Vec<EntitySection<'_>> = self
            .collector
            .iter()
            .map(|(name, messages)| EntitySection { name, messages })
            .collect();

        let mut tera = Tera::default();
        tera.add_raw_template("report", REPORT_TEMPLATE)
            .context("invalid report template")?;
        let mut context = TeraContext::new();
        context.insert("entities", &sections);
        tera.render("report", &context)
            .context("failed to render report template")
    }
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for HtmlFormatter {
    fn add_message(&mut self, message: ValidationMessage) {
        self.collector.add(message);
    }

    fn output(&mut self) -> Result<()> {
        let html = self.render()?;
        fs::write(&self.output_path, html)
            .with_context(|| format!("failed to write report {}", self.output_path.display()))?;
        println!("Report saved to: {}", self.output_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::collector::Severity;

    fn message(entity: &str, severity: Severity, description: &str) -> ValidationMessage {
        ValidationMessage {
            entity: entity.to_string(),
            severity,
            path: PathBuf::from("public/banners/top.gif"),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_render_contains_every_message() {
        let mut formatter = HtmlFormatter::new();
        formatter.add_message(message("banners", Severity::Missing, ""));
        formatter.add_message(message("banners", Severity::Invalid, "expected dimension 728x90, found 720x90"));

        let html = formatter.render().unwrap();
        assert!(html.contains("<h2>banners (2)</h2>"));
        assert!(html.contains("public/banners/top.gif"));
        assert!(html.contains(r#"class="missing""#));
        assert!(html.contains("expected dimension 728x90, found 720x90"));
    }

    #[test]
    fn test_render_empty_collector() {
        let formatter = HtmlFormatter::new();
        let html = formatter.render().unwrap();
        assert!(html.contains("All assets check out."));
    }

    #[test]
    fn test_output_writes_report_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let report_path = dir.path().join("report.html");
        let mut formatter = HtmlFormatter::with_output_path(report_path.clone());
        formatter.add_message(message("banners", Severity::Missing, ""));

        formatter.output().unwrap();

        let written = fs::read_to_string(&report_path).unwrap();
        assert!(written.contains("banners"));
    }
}
