use std::fs;
use std::io::Write;

use camino::Utf8Path;
use tempfile::Builder;

use crate::error::PanresError;

/// Writes `content` to a temp file next to `path` and renames it into place,
/// so readers never observe a half-written file.
pub fn write_bytes_atomic(path: &Utf8Path, content: &[u8]) -> Result<(), PanresError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    fs::create_dir_all(parent.as_std_path())
        .map_err(|err| PanresError::Filesystem(format!("create {parent}: {err}")))?;
    let mut temp = Builder::new()
        .prefix(".panres-json")
        .tempfile_in(parent.as_std_path())
        .map_err(|err| PanresError::Filesystem(err.to_string()))?;
    temp.write_all(content)
        .map_err(|err| PanresError::Filesystem(format!("write {path}: {err}")))?;
    temp.persist(path.as_std_path())
        .map_err(|err| PanresError::Filesystem(format!("persist {path}: {err}")))?;
    Ok(())
}
