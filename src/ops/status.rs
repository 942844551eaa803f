//! Comparison of the staging tree against the NDK.
//!
//! Read-only: nothing on disk is changed.

use std::fmt;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::core::abi::{Abi, AbiDirMap};
use crate::core::staging::StagingTree;
use crate::toolchain::{EnvLookup, LocateError, NdkLocator, Toolchain};
use crate::util::hash::same_content;

/// State of one ABI's staged runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbiState {
    /// Staged copy matches the NDK
    UpToDate,
    /// Staged copy differs from the NDK
    Stale,
    /// The NDK has the library but nothing is staged
    NotStaged,
    /// Staged, but the NDK has no library (or was not found)
    Orphaned,
    /// Neither staged nor available
    Unavailable,
}

impl AbiState {
    /// Whether running `stage` would change this ABI.
    pub fn needs_stage(self) -> bool {
        matches!(self, AbiState::Stale | AbiState::NotStaged | AbiState::Orphaned)
    }
}

impl fmt::Display for AbiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AbiState::UpToDate => "up to date",
            AbiState::Stale => "stale",
            AbiState::NotStaged => "not staged",
            AbiState::Orphaned => "orphaned",
            AbiState::Unavailable => "unavailable",
        };
        f.pad(s)
    }
}

/// Status of one ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiStatus {
    pub abi: Abi,
    pub state: AbiState,
    pub staged: PathBuf,
    pub source: Option<PathBuf>,
}

/// Status of the whole staging tree.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub toolchain: Option<Toolchain>,
    pub unresolved: Option<LocateError>,
    pub abis: Vec<AbiStatus>,
}

impl StatusReport {
    /// Whether every ABI is up to date or has nothing to stage.
    pub fn is_clean(&self) -> bool {
        self.abis.iter().all(|s| !s.state.needs_stage())
    }
}

/// Compare every supported ABI's staged runtime against the NDK.
pub fn status(
    tree: &StagingTree,
    locator: &NdkLocator,
    env: &dyn EnvLookup,
    dirs: &AbiDirMap,
) -> Result<StatusReport> {
    let (toolchain, unresolved) = match locator.resolve(env) {
        Ok(toolchain) => (Some(toolchain), None),
        Err(e) => (None, Some(e)),
    };

    let mut abis = Vec::with_capacity(Abi::ALL.len());
    for abi in Abi::ALL {
        let staged = tree.staged_lib(abi);
        let source = toolchain
            .as_ref()
            .map(|tc| tc.runtime_lib(abi, dirs))
            .filter(|path| path.is_file());

        let state = match (&source, staged.is_file()) {
            (Some(src), true) => {
                if same_content(src, &staged)? {
                    AbiState::UpToDate
                } else {
                    AbiState::Stale
                }
            }
            (Some(_), false) => AbiState::NotStaged,
            (None, true) => AbiState::Orphaned,
            (None, false) => AbiState::Unavailable,
        };

        abis.push(AbiStatus {
            abi,
            state,
            staged,
            source,
        });
    }

    Ok(StatusReport {
        toolchain,
        unresolved,
        abis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Workspace;
    use crate::ops::stage::stage;
    use crate::test_support::FakeNdk;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn states(report: &StatusReport) -> Vec<AbiState> {
        report.abis.iter().map(|s| s.state).collect()
    }

    #[test]
    fn test_status_before_and_after_stage() {
        let tmp = TempDir::new().unwrap();
        let ws = Workspace::new(tmp.path().join("project"));
        let locator = NdkLocator::for_workspace(&ws);
        let ndk = FakeNdk::new(tmp.path().join("ndk")).with_runtimes(&[Abi::Arm64V8a, Abi::X86_64]);
        let dirs = AbiDirMap::ndk();

        let before = status(ws.staging(), &locator, &ndk.env(), &dirs).unwrap();
        assert_eq!(
            states(&before),
            vec![
                AbiState::Unavailable,
                AbiState::NotStaged,
                AbiState::Unavailable,
                AbiState::Unavailable,
                AbiState::NotStaged,
            ]
        );
        assert!(!before.is_clean());

        stage(&ws, &locator, &ndk.env()).unwrap();

        let after = status(ws.staging(), &locator, &ndk.env(), &dirs).unwrap();
        assert_eq!(after.abis[1].state, AbiState::UpToDate);
        assert_eq!(after.abis[4].state, AbiState::UpToDate);
        assert!(after.is_clean());
    }

    #[test]
    fn test_status_detects_stale_copy() {
        let tmp = TempDir::new().unwrap();
        let ws = Workspace::new(tmp.path().join("project"));
        let locator = NdkLocator::for_workspace(&ws);
        let ndk = FakeNdk::new(tmp.path().join("ndk")).with_runtime(Abi::X86, b"r26");

        stage(&ws, &locator, &ndk.env()).unwrap();
        let ndk = ndk.with_runtime(Abi::X86, b"r27");

        let report = status(ws.staging(), &locator, &ndk.env(), &AbiDirMap::ndk()).unwrap();
        let x86 = report.abis.iter().find(|s| s.abi == Abi::X86).unwrap();
        assert_eq!(x86.state, AbiState::Stale);
        assert_eq!(x86.source.as_deref(), Some(ndk.runtime_path(Abi::X86).as_path()));
    }

    #[test]
    fn test_status_without_ndk() {
        let tmp = TempDir::new().unwrap();
        let ws = Workspace::new(tmp.path().join("project"));
        let tree = ws.staging();
        fs::create_dir_all(tree.abi_dir(Abi::ArmeabiV7a)).unwrap();
        fs::write(tree.staged_lib(Abi::ArmeabiV7a), b"old").unwrap();

        let locator = NdkLocator::for_workspace(&ws);
        let report = status(tree, &locator, &HashMap::<String, String>::new(), &AbiDirMap::ndk()).unwrap();

        assert!(report.toolchain.is_none());
        assert!(matches!(
            report.unresolved,
            Some(LocateError::NdkNotFound { .. })
        ));
        assert_eq!(report.abis[0].state, AbiState::Orphaned);
        assert!(report.abis[1..]
            .iter()
            .all(|s| s.state == AbiState::Unavailable));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(AbiState::UpToDate.to_string(), "up to date");
        assert_eq!(AbiState::NotStaged.to_string(), "not staged");
        assert!(!AbiState::Unavailable.needs_stage());
        assert!(AbiState::Orphaned.needs_stage());
    }
}
