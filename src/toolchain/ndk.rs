//! A located NDK and its host prebuilt toolchain.

use std::fmt;
use std::path::{Path, PathBuf};

use semver::Version;

use super::LocateError;
use crate::core::abi::{Abi, AbiDirMap, LIBCXX_SHARED};
use crate::util::properties::Properties;

/// Host platform markers found in prebuilt directory names
/// (`linux-x86_64`, `darwin-x86_64`, `windows-x86_64`).
pub const HOST_MARKERS: [&str; 3] = ["linux", "darwin", "windows"];

/// Where the NDK root came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NdkOrigin {
    /// An environment variable
    Env(String),
    /// A properties file
    Properties(PathBuf),
}

impl fmt::Display for NdkOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NdkOrigin::Env(var) => write!(f, "${}", var),
            NdkOrigin::Properties(file) => write!(f, "{}", file.display()),
        }
    }
}

/// An installed NDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ndk {
    root: PathBuf,
    origin: NdkOrigin,
}

impl Ndk {
    /// Create an NDK handle. The root is not checked.
    pub fn new(root: impl Into<PathBuf>, origin: NdkOrigin) -> Self {
        Ndk {
            root: root.into(),
            origin,
        }
    }

    /// Get the NDK root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get where the root was configured.
    pub fn origin(&self) -> &NdkOrigin {
        &self.origin
    }

    /// Get the directory holding one prebuilt toolchain per host.
    pub fn prebuilt_root(&self) -> PathBuf {
        self.root.join("toolchains").join("llvm").join("prebuilt")
    }

    /// Find the host prebuilt toolchain directory.
    ///
    /// Picks the first directory, in name order, whose name contains a
    /// [`HOST_MARKERS`] entry.
    pub fn find_prebuilt(&self) -> Result<PathBuf, LocateError> {
        let searched = self.prebuilt_root();
        let missing = || LocateError::PrebuiltMissing {
            searched: searched.clone(),
        };

        let entries = match std::fs::read_dir(&searched) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("Cannot read {}: {}", searched.display(), e);
                return Err(missing());
            }
        };

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter(|path| {
                path.file_name()
                    .map(|name| {
                        let name = name.to_string_lossy();
                        HOST_MARKERS.iter().any(|marker| name.contains(marker))
                    })
                    .unwrap_or(false)
            })
            .collect();
        candidates.sort();

        candidates.into_iter().next().ok_or_else(missing)
    }

    /// Read the NDK revision from `source.properties` (`Pkg.Revision`).
    pub fn revision(&self) -> Option<Version> {
        let props = Properties::load(&self.root.join("source.properties")).ok()?;
        let raw = props.get("Pkg.Revision")?.trim();
        match Version::parse(raw) {
            Ok(version) => Some(version),
            Err(e) => {
                tracing::debug!("Unparseable NDK revision '{}': {}", raw, e);
                None
            }
        }
    }
}

/// A located NDK together with its host prebuilt toolchain directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    ndk: Ndk,
    prebuilt: PathBuf,
}

impl Toolchain {
    /// Create a toolchain from an NDK and its prebuilt directory.
    pub fn new(ndk: Ndk, prebuilt: impl Into<PathBuf>) -> Self {
        Toolchain {
            ndk,
            prebuilt: prebuilt.into(),
        }
    }

    /// Get the NDK.
    pub fn ndk(&self) -> &Ndk {
        &self.ndk
    }

    /// Get the host prebuilt toolchain directory.
    pub fn prebuilt(&self) -> &Path {
        &self.prebuilt
    }

    /// Get the sysroot library directory.
    pub fn sysroot_lib_dir(&self) -> PathBuf {
        self.prebuilt.join("sysroot").join("usr").join("lib")
    }

    /// Get where the C++ runtime for an ABI is expected.
    pub fn runtime_lib(&self, abi: Abi, dirs: &AbiDirMap) -> PathBuf {
        self.sysroot_lib_dir()
            .join(dirs.lib_dir(abi))
            .join(LIBCXX_SHARED)
    }
}
