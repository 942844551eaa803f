//! Android ABI identity and NDK sysroot layout.
//!
//! Every staged library lives under a directory named after its Android ABI
//! (`jniLibs/arm64-v8a/...`), while the NDK keeps the same library under a
//! target-triple-like directory (`sysroot/usr/lib/aarch64-linux-android/...`).
//! [`AbiDirMap`] bridges the two.

use serde::{Deserialize, Serialize};

/// File name of the C++ runtime shared object shipped with the NDK.
pub const LIBCXX_SHARED: &str = "libc++_shared.so";

/// A target ABI supported by the Android packaging step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Abi {
    /// 32-bit ARM
    #[serde(rename = "armeabi-v7a")]
    ArmeabiV7a,
    /// 64-bit ARM
    #[serde(rename = "arm64-v8a")]
    Arm64V8a,
    /// 64-bit RISC-V
    #[serde(rename = "riscv64")]
    Riscv64,
    /// 32-bit x86
    #[serde(rename = "x86")]
    X86,
    /// 64-bit x86
    #[serde(rename = "x86_64")]
    X86_64,
}

impl Abi {
    /// All supported ABIs, in the order they are staged and cleaned.
    pub const ALL: [Abi; 5] = [
        Abi::ArmeabiV7a,
        Abi::Arm64V8a,
        Abi::Riscv64,
        Abi::X86,
        Abi::X86_64,
    ];

    /// Get the Android ABI identifier (also the jniLibs directory name).
    pub fn as_str(&self) -> &'static str {
        match self {
            Abi::ArmeabiV7a => "armeabi-v7a",
            Abi::Arm64V8a => "arm64-v8a",
            Abi::Riscv64 => "riscv64",
            Abi::X86 => "x86",
            Abi::X86_64 => "x86_64",
        }
    }
}

impl std::fmt::Display for Abi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Abi {
    type Err = AbiParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Abi::ALL
            .into_iter()
            .find(|abi| abi.as_str() == s)
            .ok_or_else(|| AbiParseError(s.to_string()))
    }
}

/// Error returned when parsing an unknown ABI identifier.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown ABI '{0}', valid values: armeabi-v7a, arm64-v8a, riscv64, x86, x86_64")]
pub struct AbiParseError(pub String);

/// Sysroot library directories of the stock NDK layout.
///
/// All five ABIs are listed, riscv64 included: NDK r26 and later ship its
/// runtime under `riscv64-linux-android`, not under a directory named after
/// the ABI. The self-named fallback of [`AbiDirMap::lib_dir`] only applies to
/// maps built without an entry for an ABI.
const NDK_LIB_DIRS: &[(Abi, &str)] = &[
    (Abi::ArmeabiV7a, "arm-linux-androideabi"),
    (Abi::Arm64V8a, "aarch64-linux-android"),
    (Abi::X86, "i686-linux-android"),
    (Abi::X86_64, "x86_64-linux-android"),
    (Abi::Riscv64, "riscv64-linux-android"),
];

/// Immutable mapping from ABI to the NDK sysroot library directory name.
///
/// An ABI without an entry maps to its own identifier. That fallback is
/// the documented policy for layouts that name a directory after the ABI,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiDirMap {
    entries: Vec<(Abi, String)>,
}

impl AbiDirMap {
    /// The mapping used by current NDK releases.
    pub fn ndk() -> Self {
        AbiDirMap::new(NDK_LIB_DIRS.iter().map(|(abi, dir)| (*abi, *dir)))
    }

    /// Build a mapping from explicit entries. Later entries win.
    pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (Abi, S)>) -> Self {
        let mut map = AbiDirMap {
            entries: Vec::new(),
        };
        for (abi, dir) in entries {
            let dir = dir.into();
            match map.entries.iter_mut().find(|(a, _)| *a == abi) {
                Some(entry) => entry.1 = dir,
                None => map.entries.push((abi, dir)),
            }
        }
        map
    }

    /// A mapping with no entries; every ABI maps to itself.
    pub fn identity() -> Self {
        AbiDirMap {
            entries: Vec::new(),
        }
    }

    /// Get the sysroot directory fragment for an ABI.
    pub fn lib_dir(&self, abi: Abi) -> &str {
        self.entries
            .iter()
            .find(|(a, _)| *a == abi)
            .map(|(_, dir)| dir.as_str())
            .unwrap_or_else(|| abi.as_str())
    }

    /// Check whether the ABI has an explicit entry.
    pub fn contains(&self, abi: Abi) -> bool {
        self.entries.iter().any(|(a, _)| *a == abi)
    }
}

impl Default for AbiDirMap {
    fn default() -> Self {
        AbiDirMap::ndk()
    }
}
