//! Classification predicates over absolute paths.

use super::chase::{OnUnknown, Prefix};
use super::PathManager;
use crate::error::{Error, Result};
use crate::path::AmiPath;

fn require_prefix<'a>(path: &'a AmiPath, operation: &'static str) -> Result<&'a str> {
    path.prefix().ok_or_else(|| {
        Error::invalid_op(
            operation,
            format!("relative path '{path}' has no prefix"),
        )
    })
}

impl PathManager {
    /// Whether the prefix of `path` is a registered volume.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` for a relative path.
    pub fn is_volume_path(&self, path: &AmiPath) -> Result<bool> {
        let prefix = require_prefix(path, "is_volume_path")?;
        Ok(self.volumes.has_volume(prefix))
    }

    /// Whether the prefix of `path` is a registered assign.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` for a relative path.
    pub fn is_assign_path(&self, path: &AmiPath) -> Result<bool> {
        let prefix = require_prefix(path, "is_assign_path")?;
        Ok(self.assigns.has_assign(prefix))
    }

    /// Whether `path` expands to more than one leaf.
    ///
    /// The whole assign chain is followed, so an assign whose single target
    /// is itself a multi-assign counts as multi.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` for a relative path and `CyclicAssign` if
    /// the chain loops.
    pub fn is_multi_assign_path(&self, path: &AmiPath) -> Result<bool> {
        let prefix = require_prefix(path, "is_multi_assign_path")?;
        match self.lookup_prefix(prefix) {
            Prefix::Assign { .. } => Ok(self.leaves(path, OnUnknown::Keep)?.len() > 1),
            Prefix::Volume | Prefix::Unknown => Ok(false),
        }
    }

    /// Whether the prefix of `path` is a known volume or assign.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` for a relative path.
    pub fn is_prefix_valid(&self, path: &AmiPath) -> Result<bool> {
        let prefix = require_prefix(path, "is_prefix_valid")?;
        Ok(self.volumes.has_volume(prefix) || self.assigns.has_assign(prefix))
    }

    /// Whether `path` can be resolved at all.
    ///
    /// Relative paths are always valid; absolute paths are valid when their
    /// prefix is known.
    #[must_use]
    pub fn is_valid(&self, path: &AmiPath) -> bool {
        self.is_prefix_valid(path).unwrap_or(true)
    }
}
