//! Environment variable overrides.
//!
//! - `AMIPATH_CWD` replaces `path.cwd`
//! - `AMIPATH_COMMAND` (comma-separated) replaces `path.command`

use crate::config::schema::{PathConfig, PathList};
use std::env;

/// Variable overriding the default current directory.
pub const CWD_VAR: &str = "AMIPATH_CWD";

/// Variable overriding the default command search path.
pub const COMMAND_VAR: &str = "AMIPATH_COMMAND";

/// Applies environment variable overrides to a configuration.
///
/// # Examples
///
/// ```no_run
/// use amipath::config::{EnvironmentConfig, PathConfig};
///
/// let mut config = PathConfig::default();
/// EnvironmentConfig::apply_overrides(&mut config);
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply overrides read from the process environment.
    pub fn apply_overrides(config: &mut PathConfig) {
        Self::apply_from(config, |name| env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_from<F>(config: &mut PathConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(cwd) = lookup(CWD_VAR) {
            log::debug!("{CWD_VAR} overrides cwd with '{cwd}'");
            config.path.get_or_insert_with(Default::default).cwd = Some(cwd);
        }

        if let Some(command) = lookup(COMMAND_VAR) {
            log::debug!("{COMMAND_VAR} overrides command path with '{command}'");
            config.path.get_or_insert_with(Default::default).command =
                Some(PathList::split(&command));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_no_variables_no_change() {
        let mut config = PathConfig::default();
        EnvironmentConfig::apply_from(&mut config, |_| None);
        assert_eq!(config, PathConfig::default());
    }

    #[test]
    fn test_cwd_override() {
        let env = vars(&[(CWD_VAR, "work:src")]);
        let mut config = PathConfig::default();
        EnvironmentConfig::apply_from(&mut config, |k| env.get(k).cloned());
        assert_eq!(config.path.unwrap().cwd.as_deref(), Some("work:src"));
    }

    #[test]
    fn test_command_override_replaces_list() {
        let env = vars(&[(COMMAND_VAR, "c:, work:c")]);
        let mut config: PathConfig =
            serde_yaml::from_str("path:\n  command: ['sys:c']\n  cwd: 'sys:'\n").unwrap();
        EnvironmentConfig::apply_from(&mut config, |k| env.get(k).cloned());

        let path = config.path.unwrap();
        assert_eq!(path.command.unwrap().as_slice(), ["c:", "work:c"]);
        assert_eq!(path.cwd.as_deref(), Some("sys:"));
    }
}
