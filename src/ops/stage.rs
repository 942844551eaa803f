//! Staging of the NDK C++ runtime into the jniLibs tree.
//!
//! Staging always starts with a clean pass so a second run, or a run after
//! an NDK upgrade, never leaves an old copy in place. A missing NDK, a
//! missing prebuilt toolchain, or a missing library for one ABI are all
//! reported and skipped; only filesystem failures abort.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::abi::{Abi, AbiDirMap};
use crate::core::staging::{StagingTree, STAGING_TEMP_PREFIX};
use crate::core::Workspace;
use crate::ops::clean::{clean, CleanReport};
use crate::toolchain::{EnvLookup, LocateError, NdkLocator, Toolchain};
use crate::util::fs::{atomic_copy, ensure_dir};

/// Result of staging one ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiOutcome {
    /// The library was copied into the staging tree.
    Copied {
        source: PathBuf,
        dest: PathBuf,
        bytes: u64,
    },
    /// The NDK has no library for this ABI at the checked path.
    Missing { checked: PathBuf },
}

/// Staging result for a single ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiStage {
    pub abi: Abi,
    pub outcome: AbiOutcome,
}

/// What a staging run did.
#[derive(Debug, Clone)]
pub struct StageReport {
    /// The clean pass that preceded staging
    pub cleaned: CleanReport,

    /// The toolchain libraries were taken from
    pub toolchain: Option<Toolchain>,

    /// Why staging was skipped entirely, if it was
    pub skipped: Option<LocateError>,

    /// Per-ABI results, in `Abi::ALL` order
    pub abis: Vec<AbiStage>,
}

impl StageReport {
    fn skipped(cleaned: CleanReport, reason: LocateError) -> Self {
        StageReport {
            cleaned,
            toolchain: None,
            skipped: Some(reason),
            abis: Vec::new(),
        }
    }

    /// ABIs whose library was copied.
    pub fn copied(&self) -> impl Iterator<Item = &AbiStage> {
        self.abis
            .iter()
            .filter(|s| matches!(s.outcome, AbiOutcome::Copied { .. }))
    }

    /// ABIs with no library in the NDK.
    pub fn missing(&self) -> impl Iterator<Item = &AbiStage> {
        self.abis
            .iter()
            .filter(|s| matches!(s.outcome, AbiOutcome::Missing { .. }))
    }

    /// Number of warnings this run produces.
    pub fn warning_count(&self) -> usize {
        usize::from(self.skipped.is_some()) + self.missing().count()
    }
}

/// Copies the C++ runtime for a set of ABIs into a staging tree.
#[derive(Debug, Clone)]
pub struct Stager<'a> {
    tree: &'a StagingTree,
    locator: &'a NdkLocator,
    abis: Vec<Abi>,
    dirs: AbiDirMap,
}

impl<'a> Stager<'a> {
    /// Create a stager for every supported ABI with the stock NDK layout.
    pub fn new(tree: &'a StagingTree, locator: &'a NdkLocator) -> Self {
        Stager {
            tree,
            locator,
            abis: Abi::ALL.to_vec(),
            dirs: AbiDirMap::ndk(),
        }
    }

    /// Create a stager for a workspace's tree and ABI selection.
    pub fn for_workspace(ws: &'a Workspace, locator: &'a NdkLocator) -> Self {
        Stager::new(ws.staging(), locator).with_abis(ws.abis().iter().copied())
    }

    /// Restrict staging to a set of ABIs. Order still follows `Abi::ALL`.
    pub fn with_abis(mut self, abis: impl IntoIterator<Item = Abi>) -> Self {
        let selected: Vec<Abi> = abis.into_iter().collect();
        self.abis = Abi::ALL
            .into_iter()
            .filter(|abi| selected.contains(abi))
            .collect();
        self
    }

    /// Use a custom ABI to sysroot directory mapping.
    pub fn with_dir_map(mut self, dirs: AbiDirMap) -> Self {
        self.dirs = dirs;
        self
    }

    /// Clean, then stage every selected ABI the NDK has a library for.
    pub fn stage(&self, env: &dyn EnvLookup) -> Result<StageReport> {
        let cleaned = clean(self.tree)?;

        let toolchain = match self.locator.resolve(env) {
            Ok(toolchain) => toolchain,
            Err(reason) => {
                tracing::debug!("Skipping staging: {}", reason);
                return Ok(StageReport::skipped(cleaned, reason));
            }
        };

        tracing::debug!("Using NDK: {}", toolchain.ndk().root().display());

        let mut abis = Vec::with_capacity(self.abis.len());
        for &abi in &self.abis {
            let outcome = self.stage_abi(&toolchain, abi)?;
            abis.push(AbiStage { abi, outcome });
        }

        Ok(StageReport {
            cleaned,
            toolchain: Some(toolchain),
            skipped: None,
            abis,
        })
    }

    fn stage_abi(&self, toolchain: &Toolchain, abi: Abi) -> Result<AbiOutcome> {
        let source = toolchain.runtime_lib(abi, &self.dirs);
        if !source.is_file() {
            tracing::debug!("No runtime for {} at {}", abi, source.display());
            return Ok(AbiOutcome::Missing { checked: source });
        }

        ensure_dir(&self.tree.abi_dir(abi))?;
        let dest = self.tree.staged_lib(abi);
        let bytes = atomic_copy(&source, &dest, STAGING_TEMP_PREFIX)?;
        tracing::debug!("Copied {} -> {} ({} bytes)", source.display(), dest.display(), bytes);

        Ok(AbiOutcome::Copied {
            source,
            dest,
            bytes,
        })
    }
}

/// Clean, then stage the workspace's ABIs from the NDK the locator finds.
pub fn stage(ws: &Workspace, locator: &NdkLocator, env: &dyn EnvLookup) -> Result<StageReport> {
    Stager::for_workspace(ws, locator).stage(env)
}
