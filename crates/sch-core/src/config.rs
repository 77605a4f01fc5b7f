// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Load options and a JSON config service over a pluggable store.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// What the loader does with a record whose kind is not modelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKindPolicy {
    /// Keep it as an opaque [`Unknown`](crate::kinds::Unknown) primitive.
    #[default]
    Placeholder,
    /// Drop the record; children pointing at it become orphans.
    Skip,
    /// Fail the whole load.
    Abort,
}

/// What the loader does with a record whose owner cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Attach it to the document root.
    #[default]
    AttachToRoot,
    /// Keep it in the tree as a detached root.
    Detach,
    /// Fail the whole load.
    Abort,
}

/// Knobs for [`load_records`](crate::load_records) and document export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Handling of unmodelled record kinds.
    pub unknown_kinds: UnknownKindPolicy,
    /// Handling of unresolvable owner links.
    pub orphans: OrphanPolicy,
    /// Rewrite `owner_index` from tree order before exporting.
    pub renumber_on_export: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            unknown_kinds: UnknownKindPolicy::default(),
            orphans: OrphanPolicy::default(),
            renumber_on_export: true,
        }
    }
}

impl LoadOptions {
    /// Config key under which options are persisted.
    pub const CONFIG_KEY: &'static str = "load-options";

    /// Options that abort on anything the loader would otherwise repair.
    pub fn strict() -> Self {
        Self {
            unknown_kinds: UnknownKindPolicy::Abort,
            orphans: OrphanPolicy::Abort,
            ..Self::default()
        }
    }
}

/// Where saved [`LoadOptions`] (and any other tool setting) live between
/// runs. Blobs are addressed by key, e.g. [`LoadOptions::CONFIG_KEY`].
pub trait ConfigStore {
    /// Bytes stored under `key`; [`ConfigError::NotFound`] when nothing was
    /// saved yet.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Replaces whatever is stored under `key`.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Failure to read or write saved settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing is stored under the key.
    #[error("config key not found")]
    NotFound,
    /// The backing store could not be read or written.
    #[error("config store i/o: {0}")]
    Io(#[from] std::io::Error),
    /// Stored bytes are not valid JSON for the requested settings.
    #[error("malformed config: {0}")]
    Serde(#[from] serde_json::Error),
    /// The store itself could not be located or opened.
    #[error("config store unavailable: {0}")]
    Unavailable(String),
}

/// Settings kept in memory only; used by tests and by embedders that do not
/// want anything written to disk.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    blobs: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl ConfigStore for MemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        self.blobs
            .borrow()
            .get(key)
            .cloned()
            .ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        self.blobs.borrow_mut().insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}

/// Typed access to saved settings: values are JSON documents in a
/// [`ConfigStore`]. [`load_options`](Self::load_options) and
/// [`save_options`](Self::save_options) cover the loader's own settings.
#[derive(Debug)]
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Wraps `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the wrapped store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Value saved under `key`, or `None` when the key is absent or empty.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        let bytes = match self.store.load_raw(key) {
            Err(ConfigError::NotFound) => return Ok(None),
            other => other?,
        };
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Saves `value` under `key` as pretty-printed JSON.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        self.store.save_raw(key, &serde_json::to_vec_pretty(value)?)
    }

    /// Stored load options, or defaults when none were saved.
    pub fn load_options(&self) -> Result<LoadOptions, ConfigError> {
        Ok(self.load(LoadOptions::CONFIG_KEY)?.unwrap_or_default())
    }

    /// Persists load options.
    pub fn save_options(&self, options: &LoadOptions) -> Result<(), ConfigError> {
        self.save(LoadOptions::CONFIG_KEY, options)
    }
}
