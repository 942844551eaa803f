//! Workspace - the Android project being staged.
//!
//! A Workspace ties together the project root, the properties file the
//! NDK location may be read from, and the staging tree.

use std::path::{Path, PathBuf};

use crate::core::abi::Abi;
use crate::core::staging::StagingTree;
use crate::util::config::Config;
use crate::util::GlobalContext;

/// Default staging root, relative to the project root.
pub const DEFAULT_JNI_LIBS_DIR: &str = "app/src/main/jniLibs";

/// Default untracked properties file holding `ndk.dir`.
pub const DEFAULT_PROPERTIES_FILE: &str = "local.properties";

/// An Android project with its staging configuration resolved.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Project root (the directory holding `local.properties`)
    root: PathBuf,

    /// Staging tree for native libraries
    staging: StagingTree,

    /// Properties file consulted for `ndk.dir`
    properties_file: PathBuf,

    /// ABIs selected for staging, in `Abi::ALL` order
    abis: Vec<Abi>,
}

impl Workspace {
    /// Create a workspace with default layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Workspace {
            staging: StagingTree::new(root.join(DEFAULT_JNI_LIBS_DIR)),
            properties_file: root.join(DEFAULT_PROPERTIES_FILE),
            abis: Abi::ALL.to_vec(),
            root,
        }
    }

    /// Create a workspace for the context's project, applying configuration.
    pub fn from_config(ctx: &GlobalContext, config: &Config) -> Self {
        let mut ws = Workspace::new(ctx.project_root());

        if let Some(dir) = &config.stage.jni_libs_dir {
            ws = ws.with_jni_libs_dir(dir);
        }
        if let Some(file) = &config.ndk.properties_file {
            ws.properties_file = ws.root.join(file);
        }
        if let Some(abis) = config.abis() {
            ws = ws.with_abis(abis);
        }

        ws
    }

    /// Set the staging root. Relative paths are taken from the project root.
    pub fn with_jni_libs_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.staging = StagingTree::new(self.root.join(dir.as_ref()));
        self
    }

    /// Restrict staging to a set of ABIs. Order follows `Abi::ALL`.
    pub fn with_abis(mut self, abis: impl IntoIterator<Item = Abi>) -> Self {
        let selected: Vec<Abi> = abis.into_iter().collect();
        self.abis = Abi::ALL
            .into_iter()
            .filter(|abi| selected.contains(abi))
            .collect();
        self
    }

    /// Get the project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the staging tree.
    pub fn staging(&self) -> &StagingTree {
        &self.staging
    }

    /// Get the properties file path.
    pub fn properties_file(&self) -> &Path {
        &self.properties_file
    }

    /// Get the ABIs selected for staging.
    pub fn abis(&self) -> &[Abi] {
        &self.abis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let ws = Workspace::new("/proj");
        assert_eq!(
            ws.staging().root(),
            Path::new("/proj/app/src/main/jniLibs")
        );
        assert_eq!(ws.properties_file(), Path::new("/proj/local.properties"));
        assert_eq!(ws.abis(), &Abi::ALL);
    }

    #[test]
    fn test_abis_follow_fixed_order() {
        let ws = Workspace::new("/proj").with_abis([Abi::X86_64, Abi::ArmeabiV7a]);
        assert_eq!(ws.abis(), &[Abi::ArmeabiV7a, Abi::X86_64]);
    }

    #[test]
    fn test_jni_libs_dir_absolute_override() {
        let ws = Workspace::new("/proj").with_jni_libs_dir("/elsewhere/jniLibs");
        assert_eq!(ws.staging().root(), Path::new("/elsewhere/jniLibs"));
    }

    #[test]
    fn test_from_config() {
        let ctx = GlobalContext::with_project_root("/proj")
            .unwrap()
            .with_global_config(None);
        let mut config = Config::default();
        config.stage.jni_libs_dir = Some(PathBuf::from("android/jniLibs"));
        config.stage.abis = Some(vec![Abi::X86_64, Abi::Arm64V8a]);
        config.ndk.properties_file = Some(PathBuf::from("android/local.properties"));

        let ws = Workspace::from_config(&ctx, &config);
        assert_eq!(ws.staging().root(), Path::new("/proj/android/jniLibs"));
        assert_eq!(
            ws.properties_file(),
            Path::new("/proj/android/local.properties")
        );
        assert_eq!(ws.abis(), &[Abi::Arm64V8a, Abi::X86_64]);
    }
}
