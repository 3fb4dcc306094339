//! Path validation and in-place file replacement

use crate::error::{TabError, TabResult};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Fail with [`TabError::NoFile`] unless `path` exists
pub fn ensure_exists(path: &Path) -> TabResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(TabError::NoFile(path.to_path_buf()))
    }
}

/// True when the path's extension equals `extension` in lowercase.
/// A leading dot on `extension` is optional.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.').to_lowercase();
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == wanted)
}

/// Existence and extension check shared by every single-file tool
pub fn validate_input(path: &Path, extension: &str, kind: &'static str) -> TabResult<()> {
    ensure_exists(path)?;
    if !has_extension(path, extension) {
        return Err(TabError::InvalidFileType {
            path: path.to_path_buf(),
            expected: kind,
        });
    }
    Ok(())
}

/// Rewrite `path` with whatever `write` produces.
///
/// Output goes to a temp file next to the original, which then replaces it,
/// so a failed write leaves the original untouched. The original file's
/// permissions are carried over.
pub fn replace_with<F>(path: &Path, write: F) -> TabResult<()>
where
    F: FnOnce(&mut dyn Write) -> TabResult<()>,
{
    let write_err = |source| TabError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    let dir = parent_dir(path);
    let mut temp = NamedTempFile::new_in(&dir).map_err(write_err)?;
    debug!(temp = %temp.path().display(), "Created temp file");

    {
        let mut out = BufWriter::new(temp.as_file_mut());
        write(&mut out)?;
        out.flush().map_err(write_err)?;
    }

    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_err)?;
    }

    temp.persist(path).map_err(|e| TabError::MoveFile {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    debug!(path = %path.display(), "Replaced file");
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
