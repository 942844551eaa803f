//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tempfile::Builder;

/// Ensure a directory exists, creating it (and missing parents) if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        bail!("not a directory: {}", path.display());
    }
    Ok(())
}

/// Check whether a directory has no entries.
pub fn is_dir_empty(path: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(path)
        .with_context(|| format!("failed to read directory: {}", path.display()))?;
    Ok(entries.next().is_none())
}

/// Remove a file if it exists. Returns whether anything was removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => {
            Err(e).with_context(|| format!("failed to remove file: {}", path.display()))
        }
    }
}

/// Remove a directory if it exists and is empty. Returns whether it was removed.
///
/// Never removes anything below `path`.
pub fn remove_dir_if_empty(path: &Path) -> Result<bool> {
    if !path.is_dir() || !is_dir_empty(path)? {
        return Ok(false);
    }
    fs::remove_dir(path)
        .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    Ok(true)
}

/// Remove the direct children of `dir` whose file name starts with `prefix`.
///
/// Only files are removed; the scan does not descend. Returns removed paths.
pub fn remove_prefixed_files(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    if !dir.is_dir() {
        return Ok(removed);
    }

    for entry in fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with(prefix) {
            let path = entry.path();
            if remove_file_if_exists(&path)? {
                removed.push(path);
            }
        }
    }

    removed.sort();
    Ok(removed)
}

/// Copy `src` to `dst` so that `dst` is either absent, its previous content,
/// or a complete copy.
///
/// The data is written to a temporary file named `{temp_prefix}XXXXXX` next
/// to `dst`, flushed, checked against the source length, given the source
/// permissions, and then renamed over `dst`. Returns the number of bytes
/// copied.
pub fn atomic_copy(src: &Path, dst: &Path, temp_prefix: &str) -> Result<u64> {
    let parent = match dst.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let metadata = fs::metadata(src)
        .with_context(|| format!("failed to read metadata: {}", src.display()))?;

    let mut input =
        fs::File::open(src).with_context(|| format!("failed to open file: {}", src.display()))?;

    let mut temp = Builder::new()
        .prefix(temp_prefix)
        .tempfile_in(parent)
        .with_context(|| format!("failed to create temporary file in {}", parent.display()))?;

    let copied = io::copy(&mut input, temp.as_file_mut()).with_context(|| {
        format!("failed to copy {} to {}", src.display(), temp.path().display())
    })?;
    temp.as_file()
        .sync_all()
        .with_context(|| format!("failed to flush {}", temp.path().display()))?;

    if copied != metadata.len() {
        bail!(
            "short copy of {}: wrote {} of {} bytes",
            src.display(),
            copied,
            metadata.len()
        );
    }

    fs::set_permissions(temp.path(), metadata.permissions())
        .with_context(|| format!("failed to set permissions on {}", temp.path().display()))?;

    temp.persist(dst)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to move staged file into {}", dst.display()))?;

    Ok(copied)
}
