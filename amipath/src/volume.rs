//! Volume registry.
//!
//! A volume binds a guest name to one host base directory. Names are looked
//! up case-insensitively through a lowercase index while the primary map
//! keeps the spelling used at registration.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{Error, RegistryKind, Result};
use crate::path::{host, name_key, validate_name};

/// Maps volume names to host base directories.
///
/// # Examples
///
/// ```
/// use amipath::VolumeManager;
///
/// let mut volumes = VolumeManager::new();
/// volumes.add_volume("Work", "/tmp/work").unwrap();
/// assert!(volumes.has_volume("work"));
/// assert!(volumes.add_volume("WORK", "/tmp/other").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct VolumeManager {
    volumes: BTreeMap<String, PathBuf>,
    index: HashMap<String, String>,
}

impl VolumeManager {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a volume.
    ///
    /// `host_path` is normalized at registration: `~` expands to the home
    /// directory and relative paths are made absolute against the process
    /// working directory. The directory does not need to exist.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPath` for an unusable name, `DuplicateRegistration`
    /// if the name is taken in any letter case, and `InvalidHostPath` if the
    /// host path cannot be normalized.
    pub fn add_volume(&mut self, name: &str, host_path: impl AsRef<Path>) -> Result<()> {
        validate_name(name)?;
        let key = name_key(name);
        if let Some(existing) = self.index.get(&key) {
            return Err(Error::DuplicateRegistration {
                kind: RegistryKind::Volume,
                name: existing.clone(),
            });
        }

        let sys_path = host::normalize(host_path.as_ref())?;
        log::info!("volume {name}: -> {}", sys_path.display());
        self.index.insert(key, name.to_string());
        self.volumes.insert(name.to_string(), sys_path);
        Ok(())
    }

    /// Remove a volume and return its host base directory.
    ///
    /// # Errors
    ///
    /// Returns `UnknownName` if no such volume exists.
    pub fn remove_volume(&mut self, name: &str) -> Result<PathBuf> {
        let stored = self
            .index
            .remove(&name_key(name))
            .ok_or_else(|| Error::UnknownName {
                name: name.to_string(),
            })?;
        log::info!("volume {stored}: removed");
        self.volumes
            .remove(&stored)
            .ok_or(Error::UnknownName { name: stored })
    }

    /// Whether a volume with this name exists, in any letter case.
    #[must_use]
    pub fn has_volume(&self, name: &str) -> bool {
        self.index.contains_key(&name_key(name))
    }

    /// The stored spelling of a volume name.
    #[must_use]
    pub fn get_name(&self, name: &str) -> Option<&str> {
        self.index.get(&name_key(name)).map(String::as_str)
    }

    /// The host base directory of a volume.
    ///
    /// # Errors
    ///
    /// Returns `UnknownName` if no such volume exists.
    pub fn get_sys_path(&self, name: &str) -> Result<&Path> {
        self.get_name(name)
            .and_then(|stored| self.volumes.get(stored))
            .map(PathBuf::as_path)
            .ok_or_else(|| Error::UnknownName {
                name: name.to_string(),
            })
    }

    /// All volume names as registered, sorted.
    #[must_use]
    pub fn all_names(&self) -> Vec<&str> {
        self.volumes.keys().map(String::as_str).collect()
    }

    /// Iterate over `(name, host base directory)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.volumes
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }

    /// Number of registered volumes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// Whether no volume is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }
}
