//! Removal of staged runtime libraries.
//!
//! The cleaner only deletes what staging creates: the runtime library per
//! ABI and any temporary left behind by an interrupted copy. Directories are
//! pruned bottom-up (ABI directory, then the staging root) and only when
//! empty. It never needs the NDK, so it works on machines without one.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::abi::Abi;
use crate::core::staging::{StagingTree, STAGING_TEMP_PREFIX};
use crate::util::fs::{remove_dir_if_empty, remove_file_if_exists, remove_prefixed_files};

/// What a clean pass removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Staged runtime libraries that were deleted
    pub removed_files: Vec<PathBuf>,

    /// Leftover temporaries from interrupted copies
    pub removed_temps: Vec<PathBuf>,

    /// ABI directories that were pruned
    pub removed_dirs: Vec<PathBuf>,

    /// Whether the staging root itself was removed
    pub removed_root: bool,
}

impl CleanReport {
    /// Check if the pass removed nothing.
    pub fn is_empty(&self) -> bool {
        self.removed_files.is_empty()
            && self.removed_temps.is_empty()
            && self.removed_dirs.is_empty()
            && !self.removed_root
    }
}

/// Remove previously staged libraries from the staging tree.
///
/// Safe to call when nothing was staged. Filesystem errors propagate.
pub fn clean(tree: &StagingTree) -> Result<CleanReport> {
    let mut report = CleanReport::default();

    if !tree.root().is_dir() {
        tracing::debug!("Nothing to clean, {} does not exist", tree.root().display());
        return Ok(report);
    }

    for abi in Abi::ALL {
        let abi_dir = tree.abi_dir(abi);
        if !abi_dir.is_dir() {
            continue;
        }

        let temps = remove_prefixed_files(&abi_dir, STAGING_TEMP_PREFIX)?;
        for temp in &temps {
            tracing::debug!("Deleted leftover temporary: {}", temp.display());
        }

        let lib = tree.staged_lib(abi);
        let removed_lib = remove_file_if_exists(&lib)?;
        if removed_lib {
            tracing::debug!("Deleted: {}", lib.display());
            report.removed_files.push(lib);
        }

        let touched = removed_lib || !temps.is_empty();
        report.removed_temps.extend(temps);

        // Only prune directories this pass emptied
        if touched && remove_dir_if_empty(&abi_dir)? {
            tracing::debug!("Deleted empty directory: {}", abi_dir.display());
            report.removed_dirs.push(abi_dir);
        }
    }

    if remove_dir_if_empty(tree.root())? {
        tracing::debug!("Deleted empty staging directory: {}", tree.root().display());
        report.removed_root = true;
    }

    Ok(report)
}
