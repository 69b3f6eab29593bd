//! Error types for the amipath library.
//!
//! Every fallible operation in the crate returns [`Result`], whose error side
//! is the single [`Error`] enum defined here. Non-strict lookups never
//! produce an error for an unknown name; they degrade to `None` or an empty
//! list instead, so only the strict variants surface `UnknownPrefix` and
//! `UnmappableHostPath`.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with an amipath error.
///
/// # Examples
///
/// ```
/// use amipath::{AmiPath, Result};
///
/// fn parse_cwd() -> Result<AmiPath> {
///     AmiPath::parse("work:projects")
/// }
/// assert!(parse_cwd().is_ok());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Kind of registry an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    /// The volume registry.
    Volume,
    /// The assign registry.
    Assign,
}

impl std::fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Volume => write!(f, "volume"),
            Self::Assign => write!(f, "assign"),
        }
    }
}

/// The main error type for the amipath library.
#[derive(Debug, Error)]
pub enum Error {
    /// A guest path string does not follow the path grammar.
    #[error("malformed path '{path}': {reason}")]
    MalformedPath {
        /// The offending input.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A strict lookup hit a prefix that is neither a volume nor an assign.
    #[error("unknown prefix '{prefix}:'")]
    UnknownPrefix {
        /// The unresolvable prefix.
        prefix: String,
    },

    /// A registry lookup by name failed.
    #[error("unknown name '{name}'")]
    UnknownName {
        /// The name that was looked up.
        name: String,
    },

    /// A single-result resolution reached an assign with several targets.
    #[error("ambiguous resolution of '{path}': assign '{assign}' has {targets} targets")]
    AmbiguousResolution {
        /// The path being resolved.
        path: String,
        /// The multi-assign that caused the ambiguity.
        assign: String,
        /// How many targets the assign has.
        targets: usize,
    },

    /// An assign chase came back to an assign it already visited.
    #[error("cyclic assign '{name}' (chain: {})", chain.join(" -> "))]
    CyclicAssign {
        /// The assign that was revisited.
        name: String,
        /// The assigns visited before the revisit, in chase order.
        chain: Vec<String>,
    },

    /// A name is already registered.
    #[error("{kind} '{name}' is already registered")]
    DuplicateRegistration {
        /// The registry that already holds the name.
        kind: RegistryKind,
        /// The rejected name.
        name: String,
    },

    /// An assign definition is unusable.
    #[error("invalid assign '{name}': {reason}")]
    InvalidAssign {
        /// The assign name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// No registered volume covers a host path.
    #[error("host path {} is not inside any volume", path.display())]
    UnmappableHostPath {
        /// The normalized host path.
        path: PathBuf,
    },

    /// An operation was called with an argument it cannot accept.
    #[error("invalid operation {operation}: {reason}")]
    InvalidOperation {
        /// The operation that refused the input.
        operation: &'static str,
        /// Why.
        reason: String,
    },

    /// A host path could not be normalized.
    #[error("invalid host path {}: {reason}", path.display())]
    InvalidHostPath {
        /// The host path.
        path: PathBuf,
        /// Why normalization failed.
        reason: String,
    },

    /// Configuration content or post-load validation failed.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The configuration field or registry entry at fault.
        field: String,
        /// A description of the failure.
        message: String,
    },

    /// A YAML configuration document could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A JSON configuration document could not be parsed.
    #[error("JSON configuration error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(path: &str, reason: impl Into<String>) -> Self {
        Self::MalformedPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_op(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOperation {
            operation,
            reason: reason.into(),
        }
    }

    /// Check if the error reports an unknown prefix or registry name.
    ///
    /// # Examples
    ///
    /// ```
    /// use amipath::Error;
    ///
    /// let err = Error::UnknownPrefix { prefix: "what".to_string() };
    /// assert!(err.is_unknown());
    /// ```
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::UnknownPrefix { .. } | Self::UnknownName { .. })
    }

    /// Check if the error reports a cycle in the assign graph.
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Self::CyclicAssign { .. })
    }

    /// Check if the error reports a multi-target assign on a single-result path.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::AmbiguousResolution { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_path_error() {
        let err = Error::malformed("a:b:c", "prefix contains ':'");
        let display = format!("{err}");
        assert!(display.contains("malformed path"));
        assert!(display.contains("a:b:c"));
    }

    #[test]
    fn test_cyclic_assign_error_shows_chain() {
        let err = Error::CyclicAssign {
            name: "a".to_string(),
            chain: vec!["a".to_string(), "b".to_string()],
        };
        let display = format!("{err}");
        assert!(display.contains("a -> b"));
        assert!(err.is_cyclic());
    }

    #[test]
    fn test_duplicate_registration_error() {
        let err = Error::DuplicateRegistration {
            kind: RegistryKind::Volume,
            name: "Work".to_string(),
        };
        assert_eq!(format!("{err}"), "volume 'Work' is already registered");
    }

    #[test]
    fn test_ambiguous_error() {
        let err = Error::AmbiguousResolution {
            path: "a:bla".to_string(),
            assign: "a".to_string(),
            targets: 2,
        };
        assert!(err.is_ambiguous());
        assert!(format!("{err}").contains("2 targets"));
    }

    #[test]
    fn test_unmappable_host_path_error() {
        let err = Error::UnmappableHostPath {
            path: PathBuf::from("/nowhere"),
        };
        let display = format!("{err}").replace(std::path::MAIN_SEPARATOR, "/");
        assert!(display.contains("/nowhere"));
        assert!(!err.is_unknown());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }
}
