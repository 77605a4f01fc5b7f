// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved `sch` settings on disk.
//!
//! Each key (for example `load-options`, see
//! [`LoadOptions::CONFIG_KEY`](sch_core::LoadOptions::CONFIG_KEY)) is one
//! `<key>.json` file. By default the files live in the platform config
//! directory (`~/.config/sch` on Linux); `sch --config-dir` points
//! [`FsConfigStore::at`] somewhere else.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use sch_core::{ConfigError, ConfigStore};

/// Directory of `<key>.json` settings files.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    dir: PathBuf,
}

impl FsConfigStore {
    /// Store in the platform config directory for `sch`.
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("dev", "flyingrobots", "sch").ok_or_else(|| {
            ConfigError::Unavailable("no home directory for platform config".into())
        })?;
        Self::at(dirs.config_dir())
    }

    /// Store in `dir`, which is created if missing.
    pub fn at(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the settings files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn file_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        fs::read(self.file_for(key)).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::Io(err),
        })
    }

    /// Writes through a sibling temp file so a crash never leaves a
    /// half-written settings file behind.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let path = self.file_for(key);
        fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
