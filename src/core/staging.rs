//! The jniLibs staging tree.

use std::path::{Path, PathBuf};

use crate::core::abi::{Abi, LIBCXX_SHARED};

/// Prefix of the temporary files written while a copy is in flight.
///
/// The cleaner sweeps entries with this prefix.
pub const STAGING_TEMP_PREFIX: &str = ".libc++_shared.so.";

/// Directory that receives staged libraries, one subdirectory per ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingTree {
    root: PathBuf,
}

impl StagingTree {
    /// Create a staging tree rooted at `root`. Nothing is created on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        StagingTree { root: root.into() }
    }

    /// Get the staging root (e.g. `app/src/main/jniLibs`).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the directory for a single ABI.
    pub fn abi_dir(&self, abi: Abi) -> PathBuf {
        self.root.join(abi.as_str())
    }

    /// Get the path the C++ runtime is staged to for an ABI.
    pub fn staged_lib(&self, abi: Abi) -> PathBuf {
        self.abi_dir(abi).join(LIBCXX_SHARED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_paths() {
        let tree = StagingTree::new("/proj/app/src/main/jniLibs");
        assert_eq!(
            tree.abi_dir(Abi::Arm64V8a),
            PathBuf::from("/proj/app/src/main/jniLibs/arm64-v8a")
        );
        assert_eq!(
            tree.staged_lib(Abi::X86),
            PathBuf::from("/proj/app/src/main/jniLibs/x86/libc++_shared.so")
        );
    }
}
