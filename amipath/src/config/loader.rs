//! Configuration file loading.
//!
//! YAML is the primary format; files with a `.json` extension are read as
//! JSON. Both produce the same [`PathConfig`].

use crate::config::schema::PathConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Loads path configuration documents.
///
/// # Examples
///
/// ```
/// use amipath::config::ConfigLoader;
///
/// let config = ConfigLoader::from_yaml_str("volumes:\n  sys: /tmp/sys\n").unwrap();
/// assert_eq!(config.volumes["sys"], "/tmp/sys");
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `Configuration`/`Json`
    /// if its content is invalid.
    pub fn load_file(path: &Path) -> Result<PathConfig> {
        let contents = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_yaml_str(&contents)?
        };
        log::info!("loaded path configuration from {}", path.display());
        Ok(config)
    }

    /// Parse a YAML document.
    ///
    /// An empty document yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the YAML is invalid.
    pub fn from_yaml_str(contents: &str) -> Result<PathConfig> {
        if contents.trim().is_empty() {
            return Ok(PathConfig::default());
        }
        serde_yaml::from_str(contents).map_err(Error::from)
    }

    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `Json` if the JSON is invalid.
    pub fn from_json_str(contents: &str) -> Result<PathConfig> {
        serde_json::from_str(contents).map_err(Error::from)
    }
}
