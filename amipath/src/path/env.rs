//! Per-context execution environment.

use crate::error::{Error, Result};
use crate::path::AmiPath;

/// Answers whether a prefix names something resolvable.
///
/// Implemented by [`PathManager`](crate::PathManager); the environment only
/// needs this much of the namespace to check its current directory.
pub trait PrefixRegistry {
    /// Whether `prefix` is a registered volume or assign.
    fn knows_prefix(&self, prefix: &str) -> bool;
}

/// Current directory and command search path of one guest context.
///
/// The current directory is stored as given and only checked when read
/// through [`get_cwd`](Self::get_cwd), so an environment may point at a name
/// that is registered later. Clones share nothing.
///
/// # Examples
///
/// ```
/// use amipath::{AmiPath, AmiPathEnv};
///
/// let mut env = AmiPathEnv::default();
/// env.set_cwd(AmiPath::parse("work:src").unwrap());
/// assert_eq!(env.cwd().to_string(), "work:src");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmiPathEnv {
    cwd: AmiPath,
    cmd_paths: Vec<AmiPath>,
}

impl AmiPathEnv {
    /// Create an environment from its parts.
    #[must_use]
    pub fn new(cwd: AmiPath, cmd_paths: Vec<AmiPath>) -> Self {
        Self { cwd, cmd_paths }
    }

    /// The current directory, unchecked.
    #[must_use]
    pub fn cwd(&self) -> &AmiPath {
        &self.cwd
    }

    /// The current directory, checked against `registry`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the stored directory is relative and
    /// `UnknownPrefix` if its prefix is not known to `registry`.
    pub fn get_cwd(&self, registry: &impl PrefixRegistry) -> Result<&AmiPath> {
        let Some(prefix) = self.cwd.prefix() else {
            return Err(Error::invalid_op(
                "get_cwd",
                format!("current directory '{}' is not absolute", self.cwd),
            ));
        };
        if !registry.knows_prefix(prefix) {
            return Err(Error::UnknownPrefix {
                prefix: prefix.to_string(),
            });
        }
        Ok(&self.cwd)
    }

    /// Replace the current directory.
    pub fn set_cwd(&mut self, cwd: AmiPath) {
        self.cwd = cwd;
    }

    /// The command search path, in search order.
    #[must_use]
    pub fn cmd_paths(&self) -> &[AmiPath] {
        &self.cmd_paths
    }

    /// Replace the command search path.
    pub fn set_cmd_paths(&mut self, cmd_paths: Vec<AmiPath>) {
        self.cmd_paths = cmd_paths;
    }
}

impl Default for AmiPathEnv {
    /// `sys:` as current directory and `c:` as the only search location.
    fn default() -> Self {
        Self {
            cwd: AmiPath::root("sys").unwrap_or_default(),
            cmd_paths: AmiPath::root("c").into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Names(HashSet<&'static str>);

    impl PrefixRegistry for Names {
        fn knows_prefix(&self, prefix: &str) -> bool {
            self.0.contains(prefix.to_lowercase().as_str())
        }
    }

    fn p(s: &str) -> AmiPath {
        AmiPath::parse(s).unwrap()
    }

    #[test]
    fn test_default_env() {
        let env = AmiPathEnv::default();
        assert_eq!(env.cwd(), &p("sys:"));
        assert_eq!(env.cmd_paths(), [p("c:")]);
    }

    #[test]
    fn test_get_cwd_checks_prefix_lazily() {
        let names = Names(["work"].into_iter().collect());
        let mut env = AmiPathEnv::new(p("what:"), Vec::new());
        assert!(env.get_cwd(&names).unwrap_err().is_unknown());

        env.set_cwd(p("Work:bla"));
        assert_eq!(env.get_cwd(&names).unwrap(), &p("work:bla"));
    }

    #[test]
    fn test_get_cwd_rejects_relative() {
        let names = Names(HashSet::new());
        let env = AmiPathEnv::new(p("rel"), Vec::new());
        assert!(matches!(
            env.get_cwd(&names),
            Err(Error::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_clone_is_independent() {
        let env = AmiPathEnv::default();
        let mut other = env.clone();
        other.set_cmd_paths(vec![p("b:")]);
        other.set_cwd(p("work:"));
        assert_eq!(env.cmd_paths(), [p("c:")]);
        assert_eq!(env.cwd(), &p("sys:"));
    }
}
