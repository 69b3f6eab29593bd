//! Assign graph traversal shared by the resolution operations.

use std::collections::HashSet;

use super::PathManager;
use crate::error::{Error, Result};
use crate::path::{name_key, AmiPath};

/// What a prefix refers to.
pub(super) enum Prefix<'a> {
    Volume,
    Assign {
        name: &'a str,
        targets: &'a [AmiPath],
    },
    Unknown,
}

/// How an expansion treats a leaf whose prefix is neither volume nor assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum OnUnknown {
    /// Keep the leaf as it is.
    Keep,
    /// Drop the leaf.
    Skip,
    /// Fail with `UnknownPrefix`.
    Fail,
}

/// Assign names visited on the current chase, in visiting order.
#[derive(Debug, Default)]
pub(super) struct Chase {
    chain: Vec<String>,
    seen: HashSet<String>,
}

impl Chase {
    /// Record entering `name`.
    ///
    /// Fails with `CyclicAssign` if `name` is already on the chain.
    pub(super) fn enter(&mut self, name: &str) -> Result<()> {
        if !self.seen.insert(name_key(name)) {
            return Err(Error::CyclicAssign {
                name: name.to_string(),
                chain: self.chain.clone(),
            });
        }
        self.chain.push(name.to_string());
        Ok(())
    }

    /// Record leaving the most recently entered assign.
    pub(super) fn leave(&mut self) {
        if let Some(name) = self.chain.pop() {
            self.seen.remove(&name_key(&name));
        }
    }
}

impl PathManager {
    pub(super) fn lookup_prefix(&self, prefix: &str) -> Prefix<'_> {
        if self.volumes.has_volume(prefix) {
            return Prefix::Volume;
        }
        match self.assigns.get_name(prefix) {
            Some(name) => match self.assigns.get_targets(name) {
                Ok(targets) => Prefix::Assign { name, targets },
                Err(_) => Prefix::Unknown,
            },
            None => Prefix::Unknown,
        }
    }

    /// Follow single-target assigns from `path` until a volume is reached.
    pub(super) fn chase_single(&self, path: &AmiPath, strict: bool) -> Result<Option<AmiPath>> {
        let mut chase = Chase::default();
        let mut current = path.clone();
        while let Some(prefix) = current.prefix() {
            match self.lookup_prefix(prefix) {
                Prefix::Volume => return Ok(Some(current)),
                Prefix::Assign { name, targets } => {
                    chase.enter(name)?;
                    let [target] = targets else {
                        return Err(Error::AmbiguousResolution {
                            path: path.to_string(),
                            assign: name.to_string(),
                            targets: targets.len(),
                        });
                    };
                    let next = current.rebase(target);
                    log::debug!("resolve {current} -> {next}");
                    current = next;
                }
                Prefix::Unknown => return Self::unknown_prefix(prefix, strict).map(|()| None),
            }
        }
        Ok(Some(current))
    }

    /// Expand every assign branch below `path` depth-first into `out`.
    pub(super) fn expand(
        &self,
        path: &AmiPath,
        chase: &mut Chase,
        on_unknown: OnUnknown,
        out: &mut Vec<AmiPath>,
    ) -> Result<()> {
        let Some(prefix) = path.prefix() else {
            out.push(path.clone());
            return Ok(());
        };
        match self.lookup_prefix(prefix) {
            Prefix::Volume => out.push(path.clone()),
            Prefix::Assign { name, targets } => {
                chase.enter(name)?;
                for target in targets {
                    let next = path.rebase(target);
                    log::debug!("expand {path} -> {next}");
                    self.expand(&next, chase, on_unknown, out)?;
                }
                chase.leave();
            }
            Prefix::Unknown => match on_unknown {
                OnUnknown::Keep => out.push(path.clone()),
                OnUnknown::Skip => log::debug!("expand {path}: unknown prefix, dropped"),
                OnUnknown::Fail => Self::unknown_prefix(prefix, true)?,
            },
        }
        Ok(())
    }

    /// All leaves below `path`.
    pub(super) fn leaves(&self, path: &AmiPath, on_unknown: OnUnknown) -> Result<Vec<AmiPath>> {
        let mut out = Vec::new();
        self.expand(path, &mut Chase::default(), on_unknown, &mut out)?;
        Ok(out)
    }

    pub(super) fn unknown_prefix(prefix: &str, strict: bool) -> Result<()> {
        if strict {
            Err(Error::UnknownPrefix {
                prefix: prefix.to_string(),
            })
        } else {
            log::debug!("unknown prefix '{prefix}:'");
            Ok(())
        }
    }
}
