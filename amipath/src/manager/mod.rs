//! The path manager facade.
//!
//! [`PathManager`] owns the volume registry, the assign registry and the
//! default execution environment. Every query goes through it:
//!
//! - classification of absolute paths (`is_volume_path`, `is_assign_path`, ...)
//! - resolution (`abspath`, `volpath`, `volpaths`, `resolve_assigns`,
//!   `cmdpaths`)
//! - bridging to the host filesystem (`to_sys_path`, `from_sys_path`,
//!   `resolve_esc_sys_path`)
//! - bulk loading from configuration (`parse_config`) and consistency
//!   checking (`validate`)
//!
//! Resolution operations take an `Option<&AmiPathEnv>`; `None` selects the
//! manager's default environment.
//!
//! # Examples
//!
//! ```
//! use amipath::{AmiPath, PathManager};
//!
//! let mut pm = PathManager::new();
//! pm.add_volume("sys", "/tmp/sys").unwrap();
//! pm.add_assign("c", vec![AmiPath::parse("sys:c").unwrap()]).unwrap();
//!
//! let p = AmiPath::parse("c:dir").unwrap();
//! let vol = pm.volpath(&p, None, true).unwrap().unwrap();
//! assert_eq!(vol.to_string(), "sys:c/dir");
//! ```

mod chase;
mod classify;
mod load;
mod resolve;
mod syspath;
mod validate;

use std::path::Path;

use crate::assign::AssignManager;
use crate::error::{Error, RegistryKind, Result};
use crate::path::{AmiPath, AmiPathEnv, PrefixRegistry};
use crate::volume::VolumeManager;

pub use resolve::Resolved;
pub use validate::{ValidationIssue, ValidationReport};

/// Escape marker introducing a raw host path in place of a guest path.
pub const ESCAPE_MARKER: &str = "::";

/// Orchestrates volumes, assigns and the default environment.
#[derive(Debug, Clone, Default)]
pub struct PathManager {
    volumes: VolumeManager,
    assigns: AssignManager,
    default_env: AmiPathEnv,
}

impl PathManager {
    /// Create a manager with empty registries and the default environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The volume registry.
    #[must_use]
    pub fn get_vol_mgr(&self) -> &VolumeManager {
        &self.volumes
    }

    /// The volume registry, mutable.
    ///
    /// Registrations made here skip the check against assign names; run
    /// [`validate`](Self::validate) afterwards.
    pub fn get_vol_mgr_mut(&mut self) -> &mut VolumeManager {
        &mut self.volumes
    }

    /// The assign registry.
    #[must_use]
    pub fn get_assign_mgr(&self) -> &AssignManager {
        &self.assigns
    }

    /// The assign registry, mutable.
    ///
    /// Registrations made here skip the check against volume names; run
    /// [`validate`](Self::validate) afterwards.
    pub fn get_assign_mgr_mut(&mut self) -> &mut AssignManager {
        &mut self.assigns
    }

    /// The default environment.
    #[must_use]
    pub fn get_default_env(&self) -> &AmiPathEnv {
        &self.default_env
    }

    /// The default environment, mutable.
    pub fn get_default_env_mut(&mut self) -> &mut AmiPathEnv {
        &mut self.default_env
    }

    /// Replace the default environment.
    pub fn set_default_env(&mut self, env: AmiPathEnv) {
        self.default_env = env;
    }

    /// Register a volume.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateRegistration` if the name is already used by a
    /// volume or an assign, plus any error of
    /// [`VolumeManager::add_volume`].
    pub fn add_volume(&mut self, name: &str, host_path: impl AsRef<Path>) -> Result<()> {
        if let Some(existing) = self.assigns.get_name(name) {
            return Err(Error::DuplicateRegistration {
                kind: RegistryKind::Assign,
                name: existing.to_string(),
            });
        }
        self.volumes.add_volume(name, host_path)
    }

    /// Register an assign.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateRegistration` if the name is already used by a
    /// volume or an assign, plus any error of
    /// [`AssignManager::add_assign`].
    pub fn add_assign(&mut self, name: &str, targets: Vec<AmiPath>) -> Result<()> {
        if let Some(existing) = self.volumes.get_name(name) {
            return Err(Error::DuplicateRegistration {
                kind: RegistryKind::Volume,
                name: existing.to_string(),
            });
        }
        self.assigns.add_assign(name, targets)
    }

    /// All volume names, sorted.
    #[must_use]
    pub fn get_all_volume_names(&self) -> Vec<&str> {
        self.volumes.all_names()
    }

    /// All assign names, sorted.
    #[must_use]
    pub fn get_all_assign_names(&self) -> Vec<&str> {
        self.assigns.all_names()
    }

    /// The host base directory of a volume.
    ///
    /// # Errors
    ///
    /// Returns `UnknownName` if no such volume exists.
    pub fn get_volume_sys_path(&self, name: &str) -> Result<&Path> {
        self.volumes.get_sys_path(name)
    }

    /// The default environment's current directory, checked.
    ///
    /// # Errors
    ///
    /// Fails if the stored directory's prefix is currently unknown.
    pub fn get_cwd(&self) -> Result<&AmiPath> {
        self.default_env.get_cwd(self)
    }

    /// The default environment's command search path.
    #[must_use]
    pub fn get_cmd_paths(&self) -> &[AmiPath] {
        self.default_env.cmd_paths()
    }

    /// Clone the default environment, applying overrides.
    ///
    /// A `cmd_paths` override replaces the list; a `cwd` override is not
    /// checked until it is read.
    ///
    /// # Examples
    ///
    /// ```
    /// use amipath::{AmiPath, PathManager};
    ///
    /// let pm = PathManager::new();
    /// let env = pm.create_env(Some(AmiPath::parse("what:").unwrap()), None);
    /// assert!(env.get_cwd(&pm).is_err());
    /// assert_eq!(env.cmd_paths(), pm.get_cmd_paths());
    /// ```
    #[must_use]
    pub fn create_env(&self, cwd: Option<AmiPath>, cmd_paths: Option<Vec<AmiPath>>) -> AmiPathEnv {
        let mut env = self.default_env.clone();
        if let Some(cwd) = cwd {
            env.set_cwd(cwd);
        }
        if let Some(cmd_paths) = cmd_paths {
            env.set_cmd_paths(cmd_paths);
        }
        env
    }

    fn env_or_default<'a>(&'a self, env: Option<&'a AmiPathEnv>) -> &'a AmiPathEnv {
        env.unwrap_or(&self.default_env)
    }
}

impl PrefixRegistry for PathManager {
    fn knows_prefix(&self, prefix: &str) -> bool {
        self.volumes.has_volume(prefix) || self.assigns.has_assign(prefix)
    }
}
