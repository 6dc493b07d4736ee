//! Filesystem primitives shared across targets.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Replace `path` with `bytes` in one step, creating parent directories.
///
/// The content is staged in a temp file next to `path` and renamed over it,
/// so readers see either the old or the new file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;

    let mut staged = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to stage write in: {}", parent.display()))?;
    staged
        .write_all(bytes)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    staged
        .persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to replace config file: {}", path.display()))?;
    Ok(())
}

/// Secondary location kept as a byte-identical copy of the canonical file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyMirror {
    /// Mirroring only happens when this directory already exists.
    pub dir: PathBuf,
    pub path: PathBuf,
}

impl LegacyMirror {
    pub fn new(dir: PathBuf, path: PathBuf) -> Self {
        Self { dir, path }
    }

    pub fn is_active(&self) -> bool {
        self.dir.is_dir()
    }

    /// Copy `bytes` to the legacy path if the legacy directory exists.
    ///
    /// Returns the path written, if any.
    pub fn mirror(&self, bytes: &[u8]) -> anyhow::Result<Option<PathBuf>> {
        if !self.is_active() {
            return Ok(None);
        }
        write_atomic(&self.path, bytes)?;
        tracing::debug!(path = %self.path.display(), "Mirrored to legacy location");
        Ok(Some(self.path.clone()))
    }
}
