//! Host-side file handling around the core pipeline.
//!
//! The pipeline itself only sees explicit paths; this module owns the
//! upload contract: which extensions are accepted, how the input is
//! persisted into the working directory, and how finished artifacts are
//! resolved by name for retrieval.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::debug;

/// File extensions accepted as tabular input, lowercase.
pub const ALLOWED_EXTENSIONS: &[&str] = &["csv"];

/// Whether `name` carries a recognized tabular extension
/// (case-insensitive).
pub fn has_allowed_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Copy the input file into the working directory under its bare file
/// name, stripping any directory components from the source path.
///
/// Returns the stored path the pipeline should read from.
pub fn persist_input(src: &Path, work_dir: &Path) -> anyhow::Result<PathBuf> {
    let name = src
        .file_name()
        .with_context(|| format!("input path {} has no file name", src.display()))?;
    let dest = work_dir.join(name);

    std::fs::copy(src, &dest)
        .with_context(|| format!("failed to store {} in {}", src.display(), work_dir.display()))?;

    debug!("Stored input as {}", dest.display());
    Ok(dest)
}

/// Resolve a finished artifact by name inside the working directory.
///
/// Refuses names carrying path separators or parent references, so a
/// caller can pass through user-supplied names safely.
pub fn artifact_path(work_dir: &Path, name: &str) -> anyhow::Result<PathBuf> {
    if name.contains(['/', '\\']) || name.contains("..") {
        bail!("invalid artifact name: {name:?}");
    }
    let path = work_dir.join(name);
    if !path.is_file() {
        bail!("artifact {name:?} not found in {}", work_dir.display());
    }
    Ok(path)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
