//! Configuration schema definitions.
//!
//! The document shape is:
//!
//! ```yaml
//! volumes:
//!   sys: /opt/amiga/sys
//!   home: "~"
//! assigns:
//!   c: ["sys:c", "home:c"]
//!   libs: sys:libs
//! path:
//!   command: ["c:", "work:c"]
//!   cwd: "work:"
//! ```
//!
//! Path strings may use the `::` escape form to name a host path.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::manager::ESCAPE_MARKER;

/// Complete path configuration.
///
/// # Examples
///
/// ```
/// use amipath::config::{EnvConfig, PathConfig, PathList};
///
/// let mut config = PathConfig::default();
/// config.volumes.insert("sys".to_string(), "/opt/sys".to_string());
/// config.assigns.insert("c".to_string(), PathList::from(vec!["sys:c".to_string()]));
/// config.path = Some(EnvConfig {
///     command: Some(PathList::from(vec!["c:".to_string()])),
///     cwd: Some("sys:".to_string()),
/// });
/// assert_eq!(config.assigns["c"].len(), 1);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PathConfig {
    /// Volume name to host directory.
    #[serde(default)]
    pub volumes: BTreeMap<String, String>,

    /// Assign name to target paths.
    #[serde(default)]
    pub assigns: BTreeMap<String, PathList>,

    /// Default environment settings.
    #[serde(default)]
    pub path: Option<EnvConfig>,
}

/// Default environment settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EnvConfig {
    /// Command search path, in search order.
    pub command: Option<PathList>,

    /// Current directory.
    pub cwd: Option<String>,
}

/// An ordered list of path strings.
///
/// Deserializes from either a sequence or a single comma-separated string.
/// A string starting with the `::` escape is one host path and is never
/// split, since host paths may contain commas; list several escaped paths
/// as a sequence.
///
/// # Examples
///
/// ```
/// use amipath::config::PathList;
///
/// let list: PathList = serde_yaml::from_str("sys:c, home:c").unwrap();
/// assert_eq!(list.as_slice(), ["sys:c", "home:c"]);
///
/// let list: PathList = serde_yaml::from_str("['c:', 'work:c']").unwrap();
/// assert_eq!(list.as_slice(), ["c:", "work:c"]);
/// ```
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct PathList(Vec<String>);

impl PathList {
    /// Split a comma-separated list, dropping empty entries.
    ///
    /// An escaped host path (`::...`) is kept whole.
    #[must_use]
    pub fn split(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.starts_with(ESCAPE_MARKER) {
            return Self(vec![trimmed.to_string()]);
        }
        Self(
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// The entries.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterate over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for PathList {
    fn from(entries: Vec<String>) -> Self {
        Self(entries)
    }
}

impl<'a> IntoIterator for &'a PathList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for PathList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            List(Vec<String>),
            Joined(String),
        }

        match Helper::deserialize(deserializer)? {
            Helper::List(entries) => Ok(Self(entries)),
            Helper::Joined(s) => Ok(Self::split(&s)),
        }
    }
}
