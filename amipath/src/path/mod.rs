//! Guest paths, host path normalization and execution environments.
//!
//! # Guest paths
//!
//! An [`AmiPath`] follows AmigaDOS conventions: an optional `name:` prefix
//! naming a volume or assign, then `/`-separated segments, and an optional
//! trailing `/` marking directory intent.
//!
//! ```
//! use amipath::path::AmiPath;
//!
//! let cmd = AmiPath::parse("c:dir").unwrap();
//! let rel = AmiPath::parse("sub/file").unwrap();
//! assert_eq!(cmd.join(&rel).unwrap().to_string(), "c:dir/sub/file");
//! ```
//!
//! # Host paths
//!
//! The [`host`] functions bring host paths into the normalized form used
//! for volume base directories and reverse mapping.
//!
//! # Environments
//!
//! An [`AmiPathEnv`] carries a current directory and a command search path
//! for one guest context.

mod ami;
mod env;
pub mod host;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use ami::{AmiPath, PREFIX_SEPARATOR, SEGMENT_SEPARATOR};
pub(crate) use ami::{name_key, validate_name};
pub use env::{AmiPathEnv, PrefixRegistry};
