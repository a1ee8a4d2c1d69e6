//! Browser-process settings
//!
//! Built once in the main process, after role dispatch and before engine
//! initialization. Building has one side effect: the root cache directory
//! (and its parents) is created on disk.

use std::path::{Path, PathBuf};

use lumen_config::BootstrapConfig;

use crate::error::BootstrapError;
use crate::helper;

/// Settings handed to [`Engine::initialize`](crate::engine::Engine::initialize)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    /// CEF sandboxes the subprocesses it spawns
    pub sandbox_enabled: bool,
    /// Off-screen rendering only
    pub windowless_rendering_enabled: bool,
    /// Absolute, existing cache directory
    pub root_cache_path: PathBuf,
    /// Dedicated subprocess executable; `None` re-executes the current binary
    pub browser_subprocess_path: Option<PathBuf>,
    /// The host drives CEF work with `do_message_loop_work`
    pub external_message_pump: bool,
}

impl BrowserSettings {
    /// Cache path in the string form the engine expects
    pub fn root_cache_path_string(&self) -> String {
        self.root_cache_path.to_string_lossy().into_owned()
    }
}

#[derive(Debug, Clone)]
pub struct BrowserSettingsBuilder {
    sandbox_enabled: bool,
    windowless_rendering_enabled: bool,
    root_cache_path: PathBuf,
    browser_subprocess_path: Option<PathBuf>,
    discover_helper: bool,
    external_message_pump: bool,
}

impl Default for BrowserSettingsBuilder {
    fn default() -> Self {
        Self::from_config(&BootstrapConfig::default())
    }
}

impl BrowserSettingsBuilder {
    pub fn from_config(config: &BootstrapConfig) -> Self {
        Self {
            sandbox_enabled: config.sandbox,
            windowless_rendering_enabled: config.windowless,
            root_cache_path: config.cache_dir.clone(),
            browser_subprocess_path: config.helper_path.clone(),
            discover_helper: false,
            external_message_pump: config.external_message_pump,
        }
    }

    pub fn sandbox(mut self, enabled: bool) -> Self {
        self.sandbox_enabled = enabled;
        self
    }

    pub fn windowless_rendering(mut self, enabled: bool) -> Self {
        self.windowless_rendering_enabled = enabled;
        self
    }

    pub fn root_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.root_cache_path = path.into();
        self
    }

    pub fn browser_subprocess_path(mut self, path: Option<PathBuf>) -> Self {
        self.browser_subprocess_path = path;
        self
    }

    /// Resolve the helper at build time: the configured path if it exists,
    /// else `lumen-cef-helper` next to the current executable
    pub fn discover_helper(mut self, enabled: bool) -> Self {
        self.discover_helper = enabled;
        self
    }

    pub fn external_message_pump(mut self, enabled: bool) -> Self {
        self.external_message_pump = enabled;
        self
    }

    /// Build against the current working directory
    pub fn build(self) -> Result<BrowserSettings, BootstrapError> {
        let cwd = std::env::current_dir().map_err(|source| BootstrapError::DirectoryCreation {
            path: self.root_cache_path.clone(),
            source,
        })?;
        self.build_in(&cwd)
    }

    /// Build with relative cache paths resolved against `base`
    pub fn build_in(self, base: &Path) -> Result<BrowserSettings, BootstrapError> {
        let root_cache_path = if self.root_cache_path.is_absolute() {
            self.root_cache_path
        } else {
            base.join(&self.root_cache_path)
        };

        std::fs::create_dir_all(&root_cache_path).map_err(|source| {
            BootstrapError::DirectoryCreation {
                path: root_cache_path.clone(),
                source,
            }
        })?;
        tracing::debug!("CEF root cache path: {}", root_cache_path.display());

        let browser_subprocess_path = if self.discover_helper {
            helper::find_helper_binary(self.browser_subprocess_path.as_deref())
        } else {
            self.browser_subprocess_path
        };

        Ok(BrowserSettings {
            sandbox_enabled: self.sandbox_enabled,
            windowless_rendering_enabled: self.windowless_rendering_enabled,
            root_cache_path,
            browser_subprocess_path,
            external_message_pump: self.external_message_pump,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_missing_directory_chain() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = BrowserSettingsBuilder::default()
            .root_cache_path("profiles/default/cache")
            .build_in(tmp.path())
            .unwrap();

        assert_eq!(
            settings.root_cache_path,
            tmp.path().join("profiles/default/cache")
        );
        assert!(settings.root_cache_path.is_dir());
        assert!(settings.root_cache_path.is_absolute());
    }

    #[test]
    fn test_existing_directory_is_fine() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("cache")).unwrap();

        let first = BrowserSettingsBuilder::default().build_in(tmp.path()).unwrap();
        let second = BrowserSettingsBuilder::default().build_in(tmp.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.root_cache_path, tmp.path().join("cache"));
    }

    #[test]
    fn test_absolute_path_ignores_base() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("abs");
        let settings = BrowserSettingsBuilder::default()
            .root_cache_path(&target)
            .build_in(Path::new("/definitely/not/used"))
            .unwrap();
        assert_eq!(settings.root_cache_path, target);
        assert_eq!(
            settings.root_cache_path_string(),
            target.to_string_lossy().into_owned()
        );
    }

    #[test]
    fn test_creation_failure_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("occupied");
        std::fs::write(&file, b"not a directory").unwrap();

        let err = BrowserSettingsBuilder::default()
            .root_cache_path(file.join("cache"))
            .build_in(tmp.path())
            .unwrap_err();
        match err {
            BootstrapError::DirectoryCreation { path, .. } => {
                assert_eq!(path, file.join("cache"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_options_flow_through() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = BrowserSettingsBuilder::default()
            .sandbox(true)
            .windowless_rendering(false)
            .external_message_pump(false)
            .browser_subprocess_path(Some(PathBuf::from("/opt/lumen/helper")))
            .build_in(tmp.path())
            .unwrap();

        assert!(settings.sandbox_enabled);
        assert!(!settings.windowless_rendering_enabled);
        assert!(!settings.external_message_pump);
        assert_eq!(
            settings.browser_subprocess_path,
            Some(PathBuf::from("/opt/lumen/helper"))
        );
    }

    #[test]
    fn test_discovery_drops_missing_helper() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = BrowserSettingsBuilder::default()
            .browser_subprocess_path(Some(tmp.path().join("no-such-helper")))
            .discover_helper(true)
            .build_in(tmp.path())
            .unwrap();
        assert_ne!(
            settings.browser_subprocess_path,
            Some(tmp.path().join("no-such-helper"))
        );
    }

    #[test]
    fn test_from_config_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = BrowserSettingsBuilder::from_config(&BootstrapConfig::default())
            .build_in(tmp.path())
            .unwrap();
        assert!(settings.windowless_rendering_enabled);
        assert_eq!(settings.root_cache_path, tmp.path().join("cache"));
    }
}
