//! Assign registry.
//!
//! An assign is a named alias for one or more absolute guest paths. Targets
//! may themselves start with another assign, so the definitions form a
//! directed graph; the registry only stores it. Chasing and cycle detection
//! happen in [`PathManager`](crate::PathManager).

use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, RegistryKind, Result};
use crate::path::{name_key, validate_name, AmiPath};

/// Maps assign names to ordered target lists.
///
/// # Examples
///
/// ```
/// use amipath::{AmiPath, AssignManager};
///
/// let mut assigns = AssignManager::new();
/// let targets = vec![
///     AmiPath::parse("sys:c").unwrap(),
///     AmiPath::parse("home:c").unwrap(),
/// ];
/// assigns.add_assign("C", targets).unwrap();
/// assert!(assigns.is_multi("c"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssignManager {
    assigns: BTreeMap<String, Vec<AmiPath>>,
    index: HashMap<String, String>,
}

impl AssignManager {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an assign.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPath` for an unusable name, `InvalidAssign` if
    /// `targets` is empty or holds a relative path, and
    /// `DuplicateRegistration` if the name is taken in any letter case.
    pub fn add_assign(&mut self, name: &str, targets: Vec<AmiPath>) -> Result<()> {
        validate_name(name)?;
        if targets.is_empty() {
            return Err(Error::InvalidAssign {
                name: name.to_string(),
                reason: "no targets given".to_string(),
            });
        }
        if let Some(relative) = targets.iter().find(|t| t.is_relative()) {
            return Err(Error::InvalidAssign {
                name: name.to_string(),
                reason: format!("target '{relative}' is not absolute"),
            });
        }

        let key = name_key(name);
        if let Some(existing) = self.index.get(&key) {
            return Err(Error::DuplicateRegistration {
                kind: RegistryKind::Assign,
                name: existing.clone(),
            });
        }

        log::info!(
            "assign {name}: -> {}",
            targets
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.index.insert(key, name.to_string());
        self.assigns.insert(name.to_string(), targets);
        Ok(())
    }

    /// Remove an assign and return its targets.
    ///
    /// # Errors
    ///
    /// Returns `UnknownName` if no such assign exists.
    pub fn remove_assign(&mut self, name: &str) -> Result<Vec<AmiPath>> {
        let stored = self
            .index
            .remove(&name_key(name))
            .ok_or_else(|| Error::UnknownName {
                name: name.to_string(),
            })?;
        self.assigns
            .remove(&stored)
            .ok_or(Error::UnknownName { name: stored })
    }

    /// Whether an assign with this name exists, in any letter case.
    #[must_use]
    pub fn has_assign(&self, name: &str) -> bool {
        self.index.contains_key(&name_key(name))
    }

    /// The stored spelling of an assign name.
    #[must_use]
    pub fn get_name(&self, name: &str) -> Option<&str> {
        self.index.get(&name_key(name)).map(String::as_str)
    }

    /// The targets of an assign, in definition order.
    ///
    /// # Errors
    ///
    /// Returns `UnknownName` if no such assign exists.
    pub fn get_targets(&self, name: &str) -> Result<&[AmiPath]> {
        self.get_name(name)
            .and_then(|stored| self.assigns.get(stored))
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownName {
                name: name.to_string(),
            })
    }

    /// Whether the assign has more than one direct target.
    ///
    /// Unknown names are not multi-assigns.
    #[must_use]
    pub fn is_multi(&self, name: &str) -> bool {
        self.get_targets(name).is_ok_and(|targets| targets.len() > 1)
    }

    /// All assign names as registered, sorted.
    #[must_use]
    pub fn all_names(&self) -> Vec<&str> {
        self.assigns.keys().map(String::as_str).collect()
    }

    /// Iterate over `(name, targets)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AmiPath])> {
        self.assigns
            .iter()
            .map(|(name, targets)| (name.as_str(), targets.as_slice()))
    }

    /// Number of registered assigns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assigns.len()
    }

    /// Whether no assign is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(list: &[&str]) -> Vec<AmiPath> {
        list.iter().map(|s| AmiPath::parse(s).unwrap()).collect()
    }

    #[test]
    fn test_add_and_get_targets() {
        let mut am = AssignManager::new();
        am.add_assign("a", paths(&["b:", "c:foo"])).unwrap();
        am.add_assign("B", paths(&["root:bla"])).unwrap();

        assert!(am.has_assign("A"));
        assert_eq!(am.get_targets("a").unwrap(), paths(&["b:", "c:foo"]));
        assert!(am.is_multi("a"));
        assert!(!am.is_multi("b"));
        assert!(!am.is_multi("nope"));
        assert_eq!(am.get_name("b"), Some("B"));
        assert_eq!(am.all_names(), ["B", "a"]);
    }

    #[test]
    fn test_empty_targets_rejected() {
        let mut am = AssignManager::new();
        let err = am.add_assign("libs", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidAssign { .. }));
        assert!(!am.has_assign("libs"));
    }

    #[test]
    fn test_relative_target_rejected() {
        let mut am = AssignManager::new();
        let err = am.add_assign("libs", paths(&["sys:libs", "libs"])).unwrap_err();
        assert!(matches!(err, Error::InvalidAssign { .. }));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut am = AssignManager::new();
        am.add_assign("c", paths(&["sys:c"])).unwrap();
        let err = am.add_assign("C", paths(&["work:c"])).unwrap_err();
        assert!(matches!(err, Error::DuplicateRegistration { .. }));
        assert_eq!(am.get_targets("c").unwrap(), paths(&["sys:c"]));
    }

    #[test]
    fn test_remove_assign() {
        let mut am = AssignManager::new();
        am.add_assign("devs", paths(&["sys:devs"])).unwrap();
        assert_eq!(am.remove_assign("DEVS").unwrap(), paths(&["sys:devs"]));
        assert!(am.is_empty());
        assert!(am.get_targets("devs").unwrap_err().is_unknown());
    }
}
