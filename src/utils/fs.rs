//! File system utilities.

use std::io;
use std::path::Path;

/// Ensure `dir` exists, creating it with its parent's permission mode.
pub fn ensure_dir_like_parent(dir: &Path) -> io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    let parent = match dir.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let parent_meta = std::fs::metadata(parent)?;

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
        builder.mode(parent_meta.permissions().mode() & 0o7777);
    }
    #[cfg(not(unix))]
    let _ = parent_meta;

    builder.create(dir)
}

/// Get file extension in lowercase.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}
