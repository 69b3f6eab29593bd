#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # amipath
//!
//! Guest path resolution for an Amiga-compatible execution environment.
//!
//! Guest programs see a namespace of named volumes (`sys:`, `work:`) and
//! assigns (`c:`, `libs:`), where an assign may point at several locations
//! and at other assigns. This library maps that namespace onto host
//! directories and back.
//!
//! ## Core Types
//!
//! - [`AmiPath`]: parsed guest path
//! - [`VolumeManager`] and [`AssignManager`]: the name registries
//! - [`AmiPathEnv`]: current directory and command search path
//! - [`PathManager`]: classification, resolution and host mapping
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use amipath::{AmiPath, PathManager, Resolved};
//!
//! let mut pm = PathManager::new();
//! pm.add_volume("sys", "/tmp/sys").unwrap();
//! pm.add_volume("home", "/tmp/home").unwrap();
//! pm.add_assign("c", vec![
//!     AmiPath::parse("sys:c").unwrap(),
//!     AmiPath::parse("home:c").unwrap(),
//! ]).unwrap();
//!
//! let cmd = AmiPath::parse("c:dir").unwrap();
//! match pm.resolve_assigns(&cmd, true).unwrap() {
//!     Resolved::One(path) => println!("single: {path}"),
//!     Resolved::Many(paths) => assert_eq!(paths.len(), 2),
//! }
//! ```

pub mod assign;
pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod path;
pub mod volume;

pub use assign::AssignManager;
pub use config::{ConfigLoader, PathConfig};
pub use error::{Error, RegistryKind, Result};
pub use logging::{init_logger, LogLevel};
pub use manager::{PathManager, Resolved, ValidationIssue, ValidationReport, ESCAPE_MARKER};
pub use path::{AmiPath, AmiPathEnv, PrefixRegistry};
pub use volume::VolumeManager;
