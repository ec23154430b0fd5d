//! JSON-backed host store.
//!
//! The whole document is read at the start of every operation and written
//! back after each mutation; nothing is cached between calls. There is no
//! file locking: two processes mutating the same file concurrently race and
//! the last write wins.

use crate::profile::{HostProfile, DEFAULT_PORT};
use crate::validate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Refuse to parse store documents larger than this.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Failure reading or writing the store document.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config file {} is too large ({size} bytes)", .path.display())]
    TooLarge { path: PathBuf, size: u64 },

    #[error("Failed to serialize host store: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Fallbacks offered when creating a new profile interactively.
///
/// Never applied to profiles that are already stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDefaults {
    pub user: String,
    pub port: u16,
}

impl StoreDefaults {
    pub fn new(user: impl Into<String>, port: u16) -> Self {
        Self {
            user: user.into(),
            port,
        }
    }

    /// Current login name and port 22.
    pub fn from_env() -> Self {
        Self::new(simple_ssh_paths::default_user(), DEFAULT_PORT)
    }
}

impl Default for StoreDefaults {
    fn default() -> Self {
        Self::from_env()
    }
}

/// The persisted document: profiles plus creation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub hosts: Vec<HostProfile>,
    pub default_user: String,
    pub default_port: u16,
}

/// On-disk document; every top-level field may be missing or null.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
    #[serde(default)]
    hosts: Option<Vec<HostProfile>>,
    #[serde(default)]
    default_user: Option<String>,
    #[serde(default)]
    default_port: Option<u16>,
}

impl StoreFile {
    fn merge(self, defaults: &StoreDefaults) -> Store {
        Store {
            hosts: self.hosts.unwrap_or_default(),
            default_user: self
                .default_user
                .unwrap_or_else(|| defaults.user.clone()),
            default_port: self.default_port.unwrap_or(defaults.port),
        }
    }
}

impl Store {
    /// Document with no hosts.
    pub fn empty(defaults: &StoreDefaults) -> Self {
        Self {
            hosts: Vec::new(),
            default_user: defaults.user.clone(),
            default_port: defaults.port,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn find(&self, name: &str) -> Option<&HostProfile> {
        self.hosts.iter().find(|h| h.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(|h| h.name.as_str())
    }

    /// Fallbacks for new profiles, as recorded in this document.
    pub fn defaults(&self) -> StoreDefaults {
        StoreDefaults::new(self.default_user.clone(), self.default_port)
    }

    /// Replace the entry with the same name in place, or append.
    ///
    /// Later entries sharing the name (a hand-edited file) are dropped, so
    /// exactly one remains.
    pub fn upsert(&mut self, profile: HostProfile) {
        match self.hosts.iter().position(|h| h.name == profile.name) {
            Some(index) => {
                let mut position = 0;
                self.hosts.retain(|h| {
                    let keep = position <= index || h.name != profile.name;
                    position += 1;
                    keep
                });
                self.hosts[index] = profile;
            }
            None => self.hosts.push(profile),
        }
    }

    /// Replace the entry named `original` with `profile`, which may carry a
    /// new name. The new name must not belong to any other entry.
    pub fn replace(&mut self, original: &str, profile: HostProfile) -> Result<(), ValidationError> {
        if profile.name != original && self.contains(&profile.name) {
            return Err(ValidationError::DuplicateName(profile.name));
        }
        match self.hosts.iter().position(|h| h.name == original) {
            Some(index) => self.hosts[index] = profile,
            None => self.hosts.push(profile),
        }
        Ok(())
    }

    /// Drop every entry named `name`. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.hosts.len();
        self.hosts.retain(|h| h.name != name);
        self.hosts.len() < before
    }
}

/// Host store bound to one document on disk.
#[derive(Debug, Clone)]
pub struct HostStore {
    path: PathBuf,
    defaults: StoreDefaults,
}

impl HostStore {
    pub fn new(path: impl Into<PathBuf>, defaults: StoreDefaults) -> Self {
        Self {
            path: path.into(),
            defaults,
        }
    }

    /// Store at `~/.ssh-easy/config.json` with environment defaults.
    pub fn open_default() -> Self {
        Self::new(simple_ssh_paths::config_file(), StoreDefaults::from_env())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, degrading to an in-memory default on any error.
    ///
    /// A missing file is bootstrapped with the default document. A malformed
    /// file is reported and left untouched.
    pub fn load(&self) -> Store {
        match self.try_load() {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("{}, using an empty host list", e);
                Store::empty(&self.defaults)
            }
        }
    }

    /// Load the document, propagating read and parse failures.
    ///
    /// A missing file is bootstrapped with the default document.
    pub fn try_load(&self) -> Result<Store, StoreError> {
        let size = match fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let store = Store::empty(&self.defaults);
                self.save(&store)?;
                tracing::info!("Created default host store at {:?}", self.path);
                return Ok(store);
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if size > MAX_FILE_SIZE {
            return Err(StoreError::TooLarge {
                path: self.path.clone(),
                size,
            });
        }

        let content = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let file: StoreFile =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let store = file.merge(&self.defaults);
        tracing::debug!("Loaded {} host(s) from {:?}", store.len(), self.path);
        Ok(store)
    }

    /// Write the full document, pretty-printed, creating the directory if
    /// needed.
    pub fn save(&self, store: &Store) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let content = serde_json::to_string_pretty(store).map_err(StoreError::Serialize)?;
        fs::write(&self.path, content).map_err(|e| {
            tracing::error!("Failed to save host store {:?}: {}", self.path, e);
            StoreError::io(&self.path, e)
        })?;
        tracing::debug!("Saved {} host(s) to {:?}", store.len(), self.path);
        Ok(())
    }

    /// Insert `profile`, replacing any entry with the same name.
    pub fn upsert_host(&self, profile: HostProfile) -> Result<(), StoreError> {
        let mut store = self.try_load()?;
        let name = profile.name.clone();
        store.upsert(profile);
        self.save(&store)?;
        tracing::info!("Saved host '{}'", name);
        Ok(())
    }

    /// Replace the entry named `original` (keeping its position), allowing a
    /// rename as long as the new name is free.
    pub fn replace_host(&self, original: &str, profile: HostProfile) -> Result<(), StoreError> {
        let mut store = self.try_load()?;
        let name = profile.name.clone();
        store.replace(original, profile)?;
        self.save(&store)?;
        if name == original {
            tracing::info!("Updated host '{}'", name);
        } else {
            tracing::info!("Updated host '{}' (renamed to '{}')", original, name);
        }
        Ok(())
    }

    /// Remove every entry named `name`. Writes only when something was
    /// removed.
    pub fn remove_host(&self, name: &str) -> Result<bool, StoreError> {
        let mut store = self.try_load()?;
        if !store.remove(name) {
            tracing::debug!("No host named '{}' to remove", name);
            return Ok(false);
        }
        self.save(&store)?;
        tracing::info!("Removed host '{}'", name);
        Ok(true)
    }

    pub fn find_host(&self, name: &str) -> Option<HostProfile> {
        self.load().find(name).cloned()
    }
}
