//! Image metadata probing
//!
//! The production prober shells out to ImageMagick's `identify`; tests supply
//! deterministic stub implementations of [`AssetProber`].

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Observed metadata for one image file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeInfo {
    /// Image type as reported by the probe, e.g. `PNG`
    pub kind: String,
    /// `WIDTHxHEIGHT` dimension string, e.g. `60x60`
    pub dimension: String,
    /// File size in bytes
    pub size_bytes: u64,
}

/// Extracts observed type, dimension and size from an image file
pub trait AssetProber {
    fn probe(&self, path: &Path) -> Result<ProbeInfo>;
}

/// Prober backed by ImageMagick `identify`
pub struct IdentifyProber {
    binary: String,
}

impl IdentifyProber {
    pub fn new() -> Self {
        Self::with_binary("identify")
    }

    /// Use a different introspection binary, e.g. a wrapper script
    pub fn with_binary(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
        }
    }
}

impl Default for IdentifyProber {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetProber for IdentifyProber {
    fn probe(&self, path: &Path) -> Result<ProbeInfo> {
        let output = Command::new(&self.binary)
            .arg("-format")
            .arg("%m %wx%h %b")
            .arg(path)
            .output()
            .with_context(|| format!("failed to invoke {}", self.binary))?;

        if !output.status.success() {
            anyhow::bail!(
                "{} exited with {} for {}",
                self.binary,
                output.status,
                path.display()
            );
        }

        parse_probe_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse probe output of the form `TYPE WIDTHxHEIGHT SIZE`
///
/// The size token carries a trailing unit suffix (`3072B`) which is stripped
/// before numeric parsing.
pub fn parse_probe_output(raw: &str) -> Result<ProbeInfo> {
    let mut tokens = raw.split_whitespace();
    let (kind, dimension, size) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(kind), Some(dimension), Some(size)) => (kind, dimension, size),
        _ => anyhow::bail!("malformed probe output: {:?}", raw.trim()),
    };

    let digits = size.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let size_bytes: u64 = digits
        .parse()
        .with_context(|| format!("unparsable size token {:?} in probe output", size))?;

    Ok(ProbeInfo {
        kind: kind.to_string(),
        dimension: dimension.to_string(),
        size_bytes,
    })
}
