//! Consistency check of the loaded namespace.

use std::fmt;

use super::chase::OnUnknown;
use super::PathManager;
use crate::error::Error;
use crate::path::AmiPath;

/// One problem found by [`PathManager::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// An assign target chain ends at a prefix nobody registered.
    DanglingTarget {
        /// The assign being checked.
        assign: String,
        /// The target that fails to resolve.
        target: AmiPath,
        /// The unknown prefix reached.
        prefix: String,
    },
    /// An assign target chain loops back onto itself.
    Cycle {
        /// The assign being checked.
        assign: String,
        /// The assign that was revisited.
        revisited: String,
    },
    /// A name is both a volume and an assign.
    NameClash {
        /// The shared name.
        name: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingTarget {
                assign,
                target,
                prefix,
            } => write!(f, "assign {assign}: target '{target}' reaches unknown '{prefix}:'"),
            Self::Cycle { assign, revisited } => {
                write!(f, "assign {assign}: cycle through '{revisited}'")
            }
            Self::NameClash { name } => write!(f, "'{name}' is both a volume and an assign"),
        }
    }
}

/// Result of [`PathManager::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Whether no issue was found.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    /// The issues found, in check order.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return write!(f, "ok");
        }
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl PathManager {
    /// Check that every assign resolves to volumes without loops.
    ///
    /// Volumes whose host directory does not exist are logged but do not
    /// fail the check.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        for (name, sys_path) in self.volumes.iter() {
            if !sys_path.is_dir() {
                log::warn!("volume {name}: host directory {} is missing", sys_path.display());
            }
            if self.assigns.has_assign(name) {
                report.issues.push(ValidationIssue::NameClash {
                    name: name.to_string(),
                });
            }
        }

        for (name, targets) in self.assigns.iter() {
            let Ok(root) = AmiPath::root(name) else {
                continue;
            };
            match self.leaves(&root, OnUnknown::Fail) {
                Ok(_) => {}
                Err(Error::CyclicAssign { name: revisited, .. }) => {
                    report.issues.push(ValidationIssue::Cycle {
                        assign: name.to_string(),
                        revisited,
                    });
                }
                Err(Error::UnknownPrefix { prefix }) => {
                    let target = targets
                        .iter()
                        .find(|t| self.leaves(t, OnUnknown::Fail).is_err())
                        .cloned()
                        .unwrap_or(root);
                    report.issues.push(ValidationIssue::DanglingTarget {
                        assign: name.to_string(),
                        target,
                        prefix,
                    });
                }
                Err(other) => log::warn!("assign {name}: {other}"),
            }
        }

        for issue in report.issues() {
            log::warn!("validate: {issue}");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> AmiPath {
        AmiPath::parse(s).unwrap()
    }

    #[test]
    fn test_consistent_namespace_passes() {
        let mut pm = PathManager::new();
        pm.add_volume("sys", "/tmp/sys").unwrap();
        pm.add_assign("c", vec![p("sys:c")]).unwrap();
        pm.add_assign("d", vec![p("c:"), p("sys:d")]).unwrap();
        let report = pm.validate();
        assert!(report.passed(), "{report}");
        assert_eq!(report.to_string(), "ok");
    }

    #[test]
    fn test_dangling_target() {
        let mut pm = PathManager::new();
        pm.add_volume("sys", "/tmp/sys").unwrap();
        pm.add_assign("libs", vec![p("sys:libs"), p("nope:libs")]).unwrap();

        let report = pm.validate();
        assert_eq!(
            report.issues(),
            [ValidationIssue::DanglingTarget {
                assign: "libs".to_string(),
                target: p("nope:libs"),
                prefix: "nope".to_string(),
            }]
        );
    }

    #[test]
    fn test_cycle_reported_for_each_member() {
        let mut pm = PathManager::new();
        pm.add_assign("a", vec![p("b:")]).unwrap();
        pm.add_assign("b", vec![p("a:x")]).unwrap();

        let report = pm.validate();
        assert!(!report.passed());
        assert_eq!(report.issues().len(), 2);
        assert!(report
            .issues()
            .iter()
            .all(|i| matches!(i, ValidationIssue::Cycle { .. })));
    }

    #[test]
    fn test_name_clash_via_raw_registry() {
        let mut pm = PathManager::new();
        pm.add_volume("sys", "/tmp/sys").unwrap();
        pm.get_assign_mgr_mut()
            .add_assign("SYS", vec![p("sys:x")])
            .unwrap();

        let report = pm.validate();
        assert!(report
            .issues()
            .contains(&ValidationIssue::NameClash {
                name: "sys".to_string()
            }));
    }
}
