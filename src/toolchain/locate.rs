//! Ordered NDK root resolution.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{LocateError, Ndk, NdkOrigin, Toolchain};
use crate::core::Workspace;
use crate::util::properties::Properties;

/// Environment variables naming the NDK root, in priority order.
pub const NDK_HOME_VARS: [&str; 2] = ["ANDROID_NDK_HOME", "NDK_HOME"];

/// Key in `local.properties` naming the NDK root.
pub const NDK_DIR_KEY: &str = "ndk.dir";

/// Read access to environment variables.
///
/// Resolution takes the environment as a parameter so precedence can be
/// exercised without touching the process environment.
pub trait EnvLookup {
    /// Get a variable's value, if set.
    fn var(&self, key: &str) -> Option<OsString>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

impl EnvLookup for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<OsString> {
        self.get(key).map(OsString::from)
    }
}

/// One place the NDK root may be configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NdkSource {
    /// An environment variable holding the root path.
    Env(String),

    /// A key in a Java properties file. Relative values are resolved
    /// against the file's directory.
    Properties { file: PathBuf, key: String },
}

impl NdkSource {
    /// Get the candidate root this source names, if it names one.
    ///
    /// The second element describes what was checked, for diagnostics.
    fn candidate(&self, env: &dyn EnvLookup) -> (Option<PathBuf>, String) {
        match self {
            NdkSource::Env(var) => match env.var(var) {
                Some(value) if !value.is_empty() => {
                    let path = PathBuf::from(value);
                    let desc = format!("{}={}", var, path.display());
                    (Some(path), desc)
                }
                _ => (None, format!("{} (unset)", var)),
            },
            NdkSource::Properties { file, key } => {
                tracing::debug!(
                    "Looking for {} at {}, exists: {}",
                    key,
                    file.display(),
                    file.exists()
                );
                if !file.is_file() {
                    return (None, format!("{} (file not found)", file.display()));
                }

                let props = match Properties::load(file) {
                    Ok(props) => props,
                    Err(e) => {
                        tracing::warn!("{:#}", e);
                        return (None, format!("{} (unreadable)", file.display()));
                    }
                };

                match props.get(key) {
                    Some(value) if !value.is_empty() => {
                        let base = file.parent().unwrap_or(Path::new("."));
                        let path = base.join(value);
                        tracing::debug!("Found {} in {}: {}", key, file.display(), value);
                        let desc = format!("{} in {}: {}", key, file.display(), path.display());
                        (Some(path), desc)
                    }
                    _ => (None, format!("{} in {} (not set)", key, file.display())),
                }
            }
        }
    }

    fn origin(&self) -> NdkOrigin {
        match self {
            NdkSource::Env(var) => NdkOrigin::Env(var.clone()),
            NdkSource::Properties { file, .. } => NdkOrigin::Properties(file.clone()),
        }
    }
}

/// Resolves the NDK root by trying sources in order.
///
/// The first source naming an existing directory wins. Sources are never
/// merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdkLocator {
    sources: Vec<NdkSource>,
}

impl NdkLocator {
    /// Create a locator with an explicit source order.
    pub fn new(sources: Vec<NdkSource>) -> Self {
        NdkLocator { sources }
    }

    /// The standard order: `ANDROID_NDK_HOME`, `NDK_HOME`, then `ndk.dir`
    /// in the given properties file.
    pub fn standard(properties_file: impl Into<PathBuf>) -> Self {
        let mut sources: Vec<NdkSource> = NDK_HOME_VARS
            .iter()
            .map(|var| NdkSource::Env(var.to_string()))
            .collect();
        sources.push(NdkSource::Properties {
            file: properties_file.into(),
            key: NDK_DIR_KEY.to_string(),
        });
        NdkLocator { sources }
    }

    /// The standard locator for a workspace's properties file.
    pub fn for_workspace(ws: &Workspace) -> Self {
        Self::standard(ws.properties_file())
    }

    /// Get the sources in priority order.
    pub fn sources(&self) -> &[NdkSource] {
        &self.sources
    }

    /// Resolve the NDK root.
    pub fn locate(&self, env: &dyn EnvLookup) -> Result<Ndk, LocateError> {
        let mut checked = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let (candidate, desc) = source.candidate(env);
            match candidate {
                Some(root) if root.is_dir() => {
                    tracing::debug!("Using NDK from {}", desc);
                    return Ok(Ndk::new(root, source.origin()));
                }
                Some(_) => {
                    tracing::debug!("Skipping {}: not a directory", desc);
                    checked.push(format!("{} (not a directory)", desc));
                }
                None => {
                    tracing::debug!("Skipping {}", desc);
                    checked.push(desc);
                }
            }
        }

        Err(LocateError::NdkNotFound { checked })
    }

    /// Resolve the NDK root and its host prebuilt toolchain directory.
    pub fn resolve(&self, env: &dyn EnvLookup) -> Result<Toolchain, LocateError> {
        let ndk = self.locate(env)?;
        let prebuilt = ndk.find_prebuilt()?;
        Ok(Toolchain::new(ndk, prebuilt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeNdk;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &Path)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.display().to_string()))
            .collect()
    }

    #[test]
    fn test_primary_env_wins_over_fallback() {
        let tmp = TempDir::new().unwrap();
        let primary = FakeNdk::new(tmp.path().join("primary"));
        let fallback = FakeNdk::new(tmp.path().join("fallback"));

        let locator = NdkLocator::standard(tmp.path().join("local.properties"));
        let env = env(&[
            ("ANDROID_NDK_HOME", primary.root()),
            ("NDK_HOME", fallback.root()),
        ]);

        let ndk = locator.locate(&env).unwrap();
        assert_eq!(ndk.root(), primary.root());
        assert_eq!(ndk.origin(), &NdkOrigin::Env("ANDROID_NDK_HOME".to_string()));
    }

    #[test]
    fn test_fallback_env() {
        let tmp = TempDir::new().unwrap();
        let fallback = FakeNdk::new(tmp.path().join("fallback"));

        let locator = NdkLocator::standard(tmp.path().join("local.properties"));
        let ndk = locator
            .locate(&env(&[("NDK_HOME", fallback.root())]))
            .unwrap();
        assert_eq!(ndk.root(), fallback.root());
        assert_eq!(ndk.origin(), &NdkOrigin::Env("NDK_HOME".to_string()));
    }

    #[test]
    fn test_properties_file_only() {
        let tmp = TempDir::new().unwrap();
        let ndk_dir = FakeNdk::new(tmp.path().join("sdk/ndk/27.0.12077973"));
        let props = tmp.path().join("local.properties");
        std::fs::write(
            &props,
            format!("sdk.dir=/unused\nndk.dir={}\n", ndk_dir.root().display()),
        )
        .unwrap();

        let ndk = NdkLocator::standard(&props)
            .locate(&HashMap::<String, String>::new())
            .unwrap();
        assert_eq!(ndk.root(), ndk_dir.root());
        assert_eq!(ndk.origin(), &NdkOrigin::Properties(props));
    }

    #[test]
    fn test_latin1_properties_file() {
        let tmp = TempDir::new().unwrap();
        let ndk_dir = FakeNdk::new(tmp.path().join("ndk"));
        let props = tmp.path().join("local.properties");
        let mut text = b"# G\xe9n\xe9r\xe9 par l'IDE\n".to_vec();
        text.extend_from_slice(format!("ndk.dir={}\n", ndk_dir.root().display()).as_bytes());
        std::fs::write(&props, text).unwrap();

        let ndk = NdkLocator::standard(&props)
            .locate(&HashMap::<String, String>::new())
            .unwrap();
        assert_eq!(ndk.root(), ndk_dir.root());
    }

    #[test]
    fn test_relative_ndk_dir_resolves_against_properties_file() {
        let tmp = TempDir::new().unwrap();
        FakeNdk::new(tmp.path().join("ndk"));
        let props = tmp.path().join("local.properties");
        std::fs::write(&props, "ndk.dir=ndk\n").unwrap();

        let ndk = NdkLocator::standard(&props)
            .locate(&HashMap::<String, String>::new())
            .unwrap();
        assert_eq!(ndk.root(), tmp.path().join("ndk"));
    }

    #[test]
    fn test_nothing_configured() {
        let tmp = TempDir::new().unwrap();
        let locator = NdkLocator::standard(tmp.path().join("local.properties"));

        let err = locator.locate(&HashMap::<String, String>::new()).unwrap_err();
        match &err {
            LocateError::NdkNotFound { checked } => {
                assert_eq!(checked.len(), 3);
                assert_eq!(checked[0], "ANDROID_NDK_HOME (unset)");
                assert_eq!(checked[1], "NDK_HOME (unset)");
                assert!(checked[2].contains("file not found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("NDK directory not found"));
    }

    #[test]
    fn test_missing_directory_falls_through() {
        let tmp = TempDir::new().unwrap();
        let real = FakeNdk::new(tmp.path().join("real"));
        let gone = tmp.path().join("gone");

        let locator = NdkLocator::standard(tmp.path().join("local.properties"));
        let ndk = locator
            .locate(&env(&[("ANDROID_NDK_HOME", gone.as_path()), ("NDK_HOME", real.root())]))
            .unwrap();
        assert_eq!(ndk.root(), real.root());
    }

    #[test]
    fn test_empty_env_value_is_unset() {
        let tmp = TempDir::new().unwrap();
        let mut vars = HashMap::new();
        vars.insert("ANDROID_NDK_HOME".to_string(), String::new());

        let err = NdkLocator::standard(tmp.path().join("local.properties"))
            .locate(&vars)
            .unwrap_err();
        assert!(err.to_string().contains("ANDROID_NDK_HOME (unset)"));
    }

    #[test]
    fn test_properties_without_key() {
        let tmp = TempDir::new().unwrap();
        let props = tmp.path().join("local.properties");
        std::fs::write(&props, "sdk.dir=/opt/sdk\n").unwrap();

        let err = NdkLocator::standard(&props)
            .locate(&HashMap::<String, String>::new())
            .unwrap_err();
        assert!(err.to_string().contains("ndk.dir in"));
        assert!(err.to_string().contains("(not set)"));
    }

    #[test]
    fn test_custom_source_order() {
        let tmp = TempDir::new().unwrap();
        let a = FakeNdk::new(tmp.path().join("a"));
        let b = FakeNdk::new(tmp.path().join("b"));

        let locator = NdkLocator::new(vec![
            NdkSource::Env("NDK_HOME".to_string()),
            NdkSource::Env("ANDROID_NDK_HOME".to_string()),
        ]);
        let ndk = locator
            .locate(&env(&[("ANDROID_NDK_HOME", a.root()), ("NDK_HOME", b.root())]))
            .unwrap();
        assert_eq!(ndk.root(), b.root());
    }

    #[test]
    fn test_resolve_requires_prebuilt() {
        let tmp = TempDir::new().unwrap();
        let bare = tmp.path().join("bare-ndk");
        std::fs::create_dir_all(&bare).unwrap();

        let locator = NdkLocator::standard(tmp.path().join("local.properties"));
        let err = locator
            .resolve(&env(&[("ANDROID_NDK_HOME", bare.as_path())]))
            .unwrap_err();
        assert!(matches!(err, LocateError::PrebuiltMissing { .. }));

        let fake = FakeNdk::new(tmp.path().join("full-ndk"));
        let toolchain = locator
            .resolve(&env(&[("ANDROID_NDK_HOME", fake.root())]))
            .unwrap();
        assert_eq!(toolchain.prebuilt(), fake.prebuilt());
    }
}
