//! Configuration input for the path manager.
//!
//! A configuration document names the volumes, the assigns and the default
//! environment. It is read from YAML or JSON, optionally adjusted from
//! `AMIPATH_*` environment variables, and handed to
//! [`PathManager::parse_config`](crate::PathManager::parse_config), which
//! applies it all at once or not at all.
//!
//! # Examples
//!
//! ```
//! use amipath::config::ConfigLoader;
//! use amipath::PathManager;
//!
//! let dir = std::env::temp_dir();
//! let yaml = format!(
//!     "volumes:\n  sys: '{}'\nassigns:\n  c: 'sys:c'\npath:\n  command: ['c:']\n  cwd: 'sys:'\n",
//!     dir.display()
//! );
//! let config = ConfigLoader::from_yaml_str(&yaml).unwrap();
//!
//! let mut pm = PathManager::new();
//! pm.parse_config(&config).unwrap();
//! assert_eq!(pm.get_cwd().unwrap().to_string(), "sys:");
//! ```

pub mod environment;
pub mod loader;
pub mod schema;

pub use environment::EnvironmentConfig;
pub use loader::ConfigLoader;
pub use schema::{EnvConfig, PathConfig, PathList};
