//! Test utilities for jnilibs unit tests.
//!
//! [`FakeNdk`] lays out a minimal NDK tree on disk (prebuilt host directory,
//! sysroot library directories, `source.properties`) so staging can be
//! exercised without a real NDK installed.
//!
//! # Example
//!
//! ```rust,ignore
//! let tmp = TempDir::new().unwrap();
//! let ndk = FakeNdk::new(tmp.path().join("ndk")).with_all_runtimes();
//! let env = ndk.env();
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::abi::{Abi, AbiDirMap};
use crate::core::staging::StagingTree;

/// Host directory name used by fake NDKs.
pub const FAKE_HOST: &str = "linux-x86_64";

/// A synthetic NDK installation.
#[derive(Debug, Clone)]
pub struct FakeNdk {
    root: PathBuf,
    prebuilt: PathBuf,
}

impl FakeNdk {
    /// Create an NDK at `root` with an empty Linux prebuilt sysroot.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_host(root, FAKE_HOST)
    }

    /// Create an NDK whose prebuilt directory is named `host`.
    pub fn with_host(root: impl Into<PathBuf>, host: &str) -> Self {
        let root = root.into();
        let prebuilt = root.join("toolchains/llvm/prebuilt").join(host);
        fs::create_dir_all(prebuilt.join("sysroot/usr/lib")).unwrap();
        FakeNdk { root, prebuilt }
    }

    /// Get the NDK root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the prebuilt host directory.
    pub fn prebuilt(&self) -> &Path {
        &self.prebuilt
    }

    /// Path of the runtime library for an ABI in the stock layout.
    pub fn runtime_path(&self, abi: Abi) -> PathBuf {
        self.prebuilt
            .join("sysroot/usr/lib")
            .join(AbiDirMap::ndk().lib_dir(abi))
            .join("libc++_shared.so")
    }

    /// Default library content for an ABI.
    pub fn runtime_content(abi: Abi) -> Vec<u8> {
        format!("\x7fELF libc++_shared for {}", abi).into_bytes()
    }

    /// Install the runtime library for one ABI with the given content.
    pub fn with_runtime(self, abi: Abi, content: &[u8]) -> Self {
        let path = self.runtime_path(abi);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        self
    }

    /// Install runtime libraries for the given ABIs with default content.
    pub fn with_runtimes(self, abis: &[Abi]) -> Self {
        abis.iter().fold(self, |ndk, abi| {
            ndk.with_runtime(*abi, &Self::runtime_content(*abi))
        })
    }

    /// Install runtime libraries for every ABI with default content.
    pub fn with_all_runtimes(self) -> Self {
        self.with_runtimes(&Abi::ALL)
    }

    /// Write `source.properties` with the given `Pkg.Revision`.
    pub fn with_revision(self, revision: &str) -> Self {
        fs::write(
            self.root.join("source.properties"),
            format!("Pkg.Desc = Android NDK\nPkg.Revision = {}\n", revision),
        )
        .unwrap();
        self
    }

    /// An environment pointing `ANDROID_NDK_HOME` at this NDK.
    pub fn env(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert(
            "ANDROID_NDK_HOME".to_string(),
            self.root.display().to_string(),
        );
        env
    }
}

/// Sorted snapshot of a staging tree: relative path to content.
///
/// Directories are recorded with empty content. Empty when the tree does
/// not exist.
pub fn snapshot(tree: &StagingTree) -> Vec<(PathBuf, Vec<u8>)> {
    fn walk(base: &Path, dir: &Path, out: &mut Vec<(PathBuf, Vec<u8>)>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                out.push((path.strip_prefix(base).unwrap().to_path_buf(), Vec::new()));
                walk(base, &path, out);
            } else {
                let rel = path.strip_prefix(base).unwrap().to_path_buf();
                out.push((rel, fs::read(&path).unwrap()));
            }
        }
    }

    let mut out = Vec::new();
    if tree.root().exists() {
        walk(tree.root(), tree.root(), &mut out);
    }
    out.sort();
    out
}
