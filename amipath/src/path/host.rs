//! Host path normalization.
//!
//! Volume base directories and the inputs of `from_sys_path` are brought
//! into one comparable form: tilde expanded, absolute against the process
//! working directory, with `.` and `..` folded away. Symlinks are left
//! alone so that a volume registered through a link maps back through the
//! same link.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading `~` to the user's home directory.
///
/// Only `~` and `~/...` are understood; `~user` is rejected.
///
/// # Errors
///
/// Returns `InvalidHostPath` if the path is not UTF-8, the home directory
/// is unknown, or `~user` syntax is used.
///
/// # Examples
///
/// ```
/// use amipath::path::host::expand_tilde;
/// use std::path::Path;
///
/// assert!(expand_tilde(Path::new("~")).unwrap().is_absolute());
/// assert_eq!(expand_tilde(Path::new("/abs")).unwrap(), Path::new("/abs"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(raw) = path.to_str() else {
        return Err(Error::InvalidHostPath {
            path: path.to_path_buf(),
            reason: "path contains invalid UTF-8".to_string(),
        });
    };

    if !raw.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidHostPath {
        path: path.to_path_buf(),
        reason: "cannot determine home directory".to_string(),
    })?;

    if raw == "~" {
        Ok(home)
    } else if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        Ok(home.join(rest))
    } else {
        Err(Error::InvalidHostPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported".to_string(),
        })
    }
}

/// Fold `.` and `..` components of an absolute path.
///
/// `..` at the root stays at the root.
///
/// # Examples
///
/// ```
/// use amipath::path::host::fold_components;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(fold_components(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(fold_components(Path::new("/a/../..")), PathBuf::from("/"));
/// ```
#[must_use]
pub fn fold_components(path: &Path) -> PathBuf {
    let mut folded = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                folded.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if folded.parent().is_some() {
                    folded.pop();
                }
            }
        }
    }
    folded
}

/// Normalize a host path to absolute, folded form.
///
/// # Errors
///
/// Returns `InvalidHostPath` if tilde expansion fails or the process
/// working directory cannot be read.
///
/// # Examples
///
/// ```
/// use amipath::path::host::normalize;
/// use std::path::Path;
///
/// let cwd = std::env::current_dir().unwrap();
/// assert_eq!(normalize(Path::new(".")).unwrap(), cwd);
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir().map_err(|e| Error::InvalidHostPath {
            path: path.to_path_buf(),
            reason: format!("cannot get current directory: {e}"),
        })?;
        cwd.join(expanded)
    };
    Ok(fold_components(&absolute))
}

/// The components of `path` below `base` as UTF-8 strings.
///
/// Returns `None` if `path` is not inside `base` or a component below it is
/// not valid UTF-8. Both paths must already be normalized.
#[must_use]
pub fn relative_components(base: &Path, path: &Path) -> Option<Vec<String>> {
    let rest = path.strip_prefix(base).ok()?;
    rest.components()
        .map(|c| c.as_os_str().to_str().map(str::to_string))
        .collect()
}
