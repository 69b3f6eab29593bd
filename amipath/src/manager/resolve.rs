//! Path resolution: current directory, assign expansion and command search.

use super::chase::{Chase, OnUnknown, Prefix};
use super::PathManager;
use crate::error::{Error, Result};
use crate::path::{AmiPath, AmiPathEnv};

/// Outcome of [`PathManager::resolve_assigns`].
///
/// A single result is always `One`, never a one-element `Many`; callers
/// branch on the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Exactly one path.
    One(AmiPath),
    /// Several paths, in assign definition order.
    Many(Vec<AmiPath>),
}

impl Resolved {
    fn collapse(mut paths: Vec<AmiPath>) -> Self {
        if paths.len() == 1 {
            if let Some(only) = paths.pop() {
                return Self::One(only);
            }
        }
        Self::Many(paths)
    }

    /// Number of paths.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(paths) => paths.len(),
        }
    }

    /// Whether there are no paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The paths as a list, regardless of variant.
    #[must_use]
    pub fn into_vec(self) -> Vec<AmiPath> {
        match self {
            Self::One(path) => vec![path],
            Self::Many(paths) => paths,
        }
    }
}

impl PathManager {
    /// Make `path` absolute against the environment's current directory.
    ///
    /// Absolute paths are returned unchanged without looking at their
    /// prefix.
    ///
    /// # Errors
    ///
    /// For a relative path, fails if the current directory cannot be read
    /// (see [`AmiPathEnv::get_cwd`]).
    pub fn abspath(&self, path: &AmiPath, env: Option<&AmiPathEnv>) -> Result<AmiPath> {
        if path.is_absolute() {
            return Ok(path.clone());
        }
        let cwd = self.env_or_default(env).get_cwd(self)?;
        cwd.join(path)
    }

    /// Resolve `path` to the one volume-rooted path it denotes.
    ///
    /// Returns `None` for an unknown prefix unless `strict`.
    ///
    /// # Errors
    ///
    /// Returns `AmbiguousResolution` if a multi-assign is crossed,
    /// `CyclicAssign` on a loop, and `UnknownPrefix` in strict mode.
    pub fn volpath(
        &self,
        path: &AmiPath,
        env: Option<&AmiPathEnv>,
        strict: bool,
    ) -> Result<Option<AmiPath>> {
        let abs = self.abspath(path, env)?;
        self.chase_single(&abs, strict)
    }

    /// Resolve `path` to every volume-rooted path it denotes.
    ///
    /// Multi-assigns are expanded depth-first in definition order;
    /// duplicates are kept. Branches ending at an unknown prefix are dropped
    /// unless `strict`.
    ///
    /// # Errors
    ///
    /// Returns `CyclicAssign` on a loop and `UnknownPrefix` in strict mode.
    pub fn volpaths(
        &self,
        path: &AmiPath,
        env: Option<&AmiPathEnv>,
        strict: bool,
    ) -> Result<Vec<AmiPath>> {
        let abs = self.abspath(path, env)?;
        let on_unknown = if strict {
            OnUnknown::Fail
        } else {
            OnUnknown::Skip
        };
        self.leaves(&abs, on_unknown)
    }

    /// Substitute assign prefixes.
    ///
    /// Without `recursive` only the first assign is replaced by its targets.
    /// With it, substitution continues until every result is volume-rooted,
    /// relative, or has an unknown prefix.
    ///
    /// # Errors
    ///
    /// Returns `CyclicAssign` if a recursive substitution loops.
    ///
    /// # Examples
    ///
    /// ```
    /// use amipath::{AmiPath, PathManager, Resolved};
    ///
    /// let mut pm = PathManager::new();
    /// pm.add_volume("root", "/tmp/root").unwrap();
    /// pm.add_assign("b", vec![AmiPath::parse("root:bla").unwrap()]).unwrap();
    ///
    /// let resolved = pm.resolve_assigns(&AmiPath::parse("b:foo").unwrap(), false).unwrap();
    /// assert_eq!(resolved, Resolved::One(AmiPath::parse("root:bla/foo").unwrap()));
    /// ```
    pub fn resolve_assigns(&self, path: &AmiPath, recursive: bool) -> Result<Resolved> {
        let Some(prefix) = path.prefix() else {
            return Ok(Resolved::One(path.clone()));
        };
        if recursive {
            let mut out = Vec::new();
            self.expand(path, &mut Chase::default(), OnUnknown::Keep, &mut out)?;
            return Ok(Resolved::collapse(out));
        }
        match self.lookup_prefix(prefix) {
            Prefix::Assign { targets, .. } => Ok(Resolved::collapse(
                targets.iter().map(|target| path.rebase(target)).collect(),
            )),
            Prefix::Volume | Prefix::Unknown => Ok(Resolved::One(path.clone())),
        }
    }

    /// Candidate locations for the command named by `path`.
    ///
    /// - An absolute path is used as is, or expanded to its volume paths.
    /// - A relative path with several segments is taken literally: as given,
    ///   or made absolute against the current directory.
    /// - A bare name is joined onto the current directory (if
    ///   `prepend_cur_dir`) and every command path entry, in order; with
    ///   `make_volpaths` each candidate is expanded to its volume paths and
    ///   candidates with unknown prefixes are dropped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` for a path with a trailing separator or
    /// without any segment, and propagates resolution failures.
    pub fn cmdpaths(
        &self,
        path: &AmiPath,
        env: Option<&AmiPathEnv>,
        make_volpaths: bool,
        prepend_cur_dir: bool,
    ) -> Result<Vec<AmiPath>> {
        if path.has_trailing_separator() {
            return Err(Error::invalid_op(
                "cmdpaths",
                format!("'{path}' ends in a separator and cannot name a command"),
            ));
        }
        if path.segments().is_empty() {
            return Err(Error::invalid_op(
                "cmdpaths",
                format!("'{path}' does not name a command"),
            ));
        }

        let env = self.env_or_default(env);
        let candidate = |p: &AmiPath| -> Result<Vec<AmiPath>> {
            if make_volpaths {
                self.volpaths(p, Some(env), false)
            } else {
                Ok(vec![p.clone()])
            }
        };

        if path.is_absolute() {
            return candidate(path);
        }
        if !path.is_name_only() {
            return if make_volpaths {
                Ok(vec![self.abspath(path, Some(env))?])
            } else {
                Ok(vec![path.clone()])
            };
        }

        let mut roots = Vec::with_capacity(env.cmd_paths().len() + 1);
        if prepend_cur_dir {
            roots.push(env.get_cwd(self)?);
        }
        roots.extend(env.cmd_paths());

        let mut result = Vec::new();
        for root in roots {
            result.extend(candidate(&root.join(path)?)?);
        }
        log::debug!("cmdpaths {path}: {} candidate(s)", result.len());
        Ok(result)
    }
}
