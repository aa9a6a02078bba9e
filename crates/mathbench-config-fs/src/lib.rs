// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `ConfigStore` for Mathbench (uses platform config dir).
//!
//! Every key is one pretty-printed JSON file named `<key>.json` under the
//! base directory. The workbench writes two of them: `prefs.json` holds the
//! serialized `WorkbenchPrefs` (viewport size and resolution, plot window,
//! editor and calculator settings) and `document.json` holds the document
//! editor's Markdown source as a single JSON string. Removing a file resets
//! that key to its default; a missing file is not an error.

use directories::ProjectDirs;
use mathbench_app_core::config::{ConfigError, ConfigStore};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Store configs as JSON files under a base directory.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Create a store rooted at the user config directory (e.g., `~/.config/Mathbench`).
    pub fn new() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "Mathbench")
            .ok_or_else(|| ConfigError::Other("could not resolve config dir".into()))?;
        Self::with_base(proj.config_dir())
    }

    /// Create a store rooted at `base`, creating the directory if needed.
    pub fn with_base(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base = base.as_ref().to_path_buf();
        fs::create_dir_all(&base)?;
        debug!(base = %base.display(), "config store ready");
        Ok(Self { base })
    }

    /// Directory holding the JSON files.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ConfigError> {
        match fs::remove_file(self.path_for(key)) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(ConfigError::Io(err)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mathbench_app_core::config::ConfigService;
    use mathbench_app_core::config_port::{ConfigPort, DOCUMENT_KEY, PREFS_KEY};
    use mathbench_app_core::prefs::WorkbenchPrefs;
    use tempfile::TempDir;

    #[test]
    fn each_key_is_its_own_json_file() {
        let dir = TempDir::new().unwrap();
        let config = ConfigService::new(FsConfigStore::with_base(dir.path()).unwrap());
        assert_eq!(config.store().path_for(PREFS_KEY), dir.path().join("prefs.json"));

        assert!(config.save_prefs(&WorkbenchPrefs::default()));
        assert!(config.save_document("# Notes\n\n$x^2$"));
        assert!(dir.path().join("prefs.json").is_file());
        assert_eq!(
            fs::read_to_string(dir.path().join("document.json")).unwrap(),
            "\"# Notes\\n\\n$x^2$\""
        );

        assert_eq!(config.load_prefs(), Some(WorkbenchPrefs::default()));
        assert_eq!(config.load_document().as_deref(), Some("# Notes\n\n$x^2$"));
    }

    #[test]
    fn missing_and_removed_files_read_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = FsConfigStore::with_base(dir.path().join("nested")).unwrap();
        let config = ConfigService::new(store);
        assert!(config.load_document().is_none());
        config.reset(DOCUMENT_KEY).unwrap();

        assert!(config.save_document("text"));
        config.reset(DOCUMENT_KEY).unwrap();
        assert!(!dir.path().join("nested/document.json").exists());
        assert!(config.load_document().is_none());
    }

    #[test]
    fn corrupt_prefs_fall_back() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("prefs.json"), "{ not json").unwrap();
        let config = ConfigService::new(FsConfigStore::with_base(dir.path()).unwrap());
        assert!(config.load_prefs().is_none());
    }
}
