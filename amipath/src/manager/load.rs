//! Bulk loading from configuration.

use super::PathManager;
use crate::config::PathConfig;
use crate::error::{Error, Result};
use crate::path::AmiPath;

impl PathManager {
    /// Load volumes, assigns and the default environment.
    ///
    /// Volumes are registered first so that `::` escape strings in assign
    /// targets, command paths and the current directory can be mapped back
    /// through them. The result is validated before it replaces the current
    /// state; on any failure the manager is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first registration or parse failure, or `Validation` if
    /// the loaded namespace does not pass [`validate`](Self::validate).
    pub fn parse_config(&mut self, config: &PathConfig) -> Result<()> {
        let mut staged = self.clone();

        for (name, sys_path) in &config.volumes {
            staged.add_volume(name, sys_path)?;
        }

        for (name, entries) in &config.assigns {
            let targets = entries
                .iter()
                .map(|entry| staged.config_path(entry))
                .collect::<Result<Vec<_>>>()?;
            staged.add_assign(name, targets)?;
        }

        if let Some(path) = &config.path {
            if let Some(cwd) = &path.cwd {
                let cwd = staged.config_path(cwd)?;
                staged.default_env.set_cwd(cwd);
            }
            if let Some(command) = &path.command {
                let cmd_paths = command
                    .iter()
                    .map(|entry| staged.config_path(entry))
                    .collect::<Result<Vec<_>>>()?;
                staged.default_env.set_cmd_paths(cmd_paths);
            }
        }

        let report = staged.validate();
        if !report.passed() {
            return Err(Error::Validation {
                field: "assigns".to_string(),
                message: report.to_string(),
            });
        }

        log::info!(
            "path configuration loaded: {} volume(s), {} assign(s)",
            staged.volumes.len(),
            staged.assigns.len()
        );
        *self = staged;
        Ok(())
    }

    fn config_path(&self, entry: &str) -> Result<AmiPath> {
        self.resolve_esc_sys_path(entry, true)?
            .ok_or_else(|| Error::Validation {
                field: entry.to_string(),
                message: "host path is not inside any volume".to_string(),
            })
    }
}
