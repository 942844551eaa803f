//! NDK discovery.
//!
//! The NDK root is resolved from an ordered list of [`NdkSource`]s (by
//! default `ANDROID_NDK_HOME`, `NDK_HOME`, then `ndk.dir` in
//! `local.properties`). Within the root, the host's prebuilt LLVM toolchain
//! directory holds the sysroot the runtime libraries are taken from.

mod locate;
mod ndk;

pub use locate::{EnvLookup, NdkLocator, NdkSource, ProcessEnv, NDK_DIR_KEY, NDK_HOME_VARS};
pub use ndk::{Ndk, NdkOrigin, Toolchain, HOST_MARKERS};

use std::path::PathBuf;

use thiserror::Error;

/// Why the toolchain could not be used. Always recoverable: callers warn
/// and skip staging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error(
        "NDK directory not found (checked {}); set ANDROID_NDK_HOME or configure ndk.dir in local.properties",
        .checked.join("; ")
    )]
    NdkNotFound { checked: Vec<String> },

    #[error("cannot find NDK toolchain directory under {}", .searched.display())]
    PrebuiltMissing { searched: PathBuf },
}
