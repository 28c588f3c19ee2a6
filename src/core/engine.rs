//! Asset validation logic

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::config::AuditConfig;
use crate::core::probe::AssetProber;
use crate::reporting::collector::{Severity, ValidationMessage};
use crate::reporting::formatter::Formatter;
use crate::tabular::entity_list::EntityList;

/// Image types whose metadata is compared against declared expectations.
/// Anything else only gets the existence check.
pub const IMAGE_TYPES: [&str; 3] = ["GIF", "JPG", "PNG"];

/// Base directory that relative asset file names are resolved against
///
/// One scope is built per entity list and passed into every validate call for
/// that list; dropping it ends the scope. No process-wide state.
#[derive(Debug, Clone)]
pub struct PathScope {
    base: PathBuf,
}

impl PathScope {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.base.join(file_name)
    }
}

/// One asset check, expanded against a concrete row
#[derive(Debug, Clone)]
pub struct CheckRequest {
    /// File name relative to the active [`PathScope`]
    pub file: String,
    /// Expected `WIDTHxHEIGHT`; `None` skips the dimension comparison
    pub dimension: Option<String>,
    /// Maximum allowed size in bytes; 0 means no size check
    pub max_size_bytes: u64,
}

/// Runs per-asset checks and emits messages into a [`Formatter`]
pub struct Auditor<'a> {
    prober: &'a dyn AssetProber,
}

impl<'a> Auditor<'a> {
    pub fn new(prober: &'a dyn AssetProber) -> Self {
        Self { prober }
    }

    /// Validate one declared asset
    ///
    /// A file that fails the existence check receives exactly one `missing`
    /// message and no further checks. For recognized image types the probed
    /// metadata is compared against the declared expectations; every mismatch
    /// emits one `invalid` message. All domain results are observable only
    /// through the formatter; `Err` is reserved for probe failures.
    pub fn validate(
        &self,
        entity: &str,
        scope: &PathScope,
        check: &CheckRequest,
        formatter: &mut dyn Formatter,
    ) -> Result<()> {
        let full_path = scope.resolve(&check.file);

        if !full_path.exists() {
            formatter.add_message(ValidationMessage {
                entity: entity.to_string(),
                severity: Severity::Missing,
                path: full_path,
                description: String::new(),
            });
            return Ok(());
        }

        let extension = file_extension(&check.file);
        if !IMAGE_TYPES.contains(&extension.as_str()) {
            return Ok(());
        }

        let info = self
            .prober
            .probe(&full_path)
            .with_context(|| format!("probe failed for {}", full_path.display()))?;

        let mut invalid = |description: String| {
            formatter.add_message(ValidationMessage {
                entity: entity.to_string(),
                severity: Severity::Invalid,
                path: full_path.clone(),
                description,
            });
        };

        if let Some(expected) = &check.dimension {
            if info.dimension != *expected {
                invalid(format!(
                    "expected dimension {}, found {}",
                    expected, info.dimension
                ));
            }
        }

        if info.kind != extension {
            invalid(format!("expected type {}, found {}", extension, info.kind));
        }

        // An asset exactly at the limit counts as over it
        if check.max_size_bytes != 0 && info.size_bytes >= check.max_size_bytes {
            invalid(format!(
                "expected at most {:.2}kB, found {:.2}kB",
                kilobytes(check.max_size_bytes),
                kilobytes(info.size_bytes)
            ));
        }

        Ok(())
    }
}

/// Execute every registered entity list and render the report
///
/// # Arguments
/// * `config` - Registered entity lists and their checks
/// * `root` - Directory that sources and base paths are resolved against
/// * `prober` - Image metadata probe implementation
/// * `formatter` - Destination for validation messages; its report is
///   rendered once all lists are processed
/// * `show_progress` - Draw a per-list progress bar (disabled in batch mode)
pub fn run_audit(
    config: &AuditConfig,
    root: &Path,
    prober: &dyn AssetProber,
    formatter: &mut dyn Formatter,
    show_progress: bool,
) -> Result<()> {
    let auditor = Auditor::new(prober);

    for spec in &config.lists {
        let list = EntityList::load(&spec.name, &root.join(&spec.source))?;
        let scope = PathScope::new(root.join(&spec.base_path));
        let progress = list_progress(list.len() as u64, show_progress);

        for row in list.rows() {
            for check_spec in &spec.checks {
                let check = check_spec.expand(row)?;
                auditor.validate(&spec.name, &scope, &check, formatter)?;
            }
            progress.inc(1);
        }
        progress.finish_with_message("done");
    }

    formatter.output()
}

fn list_progress(total: u64, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    bar
}

fn file_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}

fn kilobytes(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}
