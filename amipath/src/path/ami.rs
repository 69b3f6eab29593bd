//! The guest path value type.
//!
//! An [`AmiPath`] is the parsed form of a string following the grammar
//! `[prefix ":"] segment ("/" segment)* ["/"]`. A path with a prefix is
//! absolute, one without is relative to some current directory, and the
//! empty string is the relative path "here".

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Separator between the prefix and the rest of the path.
pub const PREFIX_SEPARATOR: char = ':';

/// Separator between segments.
pub const SEGMENT_SEPARATOR: char = '/';

/// An immutable guest path.
///
/// The prefix is compared case-insensitively, segments case-sensitively. The
/// trailing separator only records directory intent and takes no part in
/// equality or hashing.
///
/// # Examples
///
/// ```
/// use amipath::AmiPath;
///
/// let p = AmiPath::parse("Work:src/main").unwrap();
/// assert!(p.is_absolute());
/// assert_eq!(p.prefix(), Some("Work"));
/// assert_eq!(p.segments(), ["src", "main"]);
/// assert_eq!(p, AmiPath::parse("work:src/main").unwrap());
/// assert_eq!(p.to_string(), "Work:src/main");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AmiPath {
    prefix: Option<String>,
    segments: Vec<String>,
    trailing_separator: bool,
}

impl AmiPath {
    /// The empty relative path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a guest path string.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPath` if the prefix is empty or contains a second
    /// `:`, or if any segment is empty (leading `/`, doubled `//`).
    ///
    /// # Examples
    ///
    /// ```
    /// use amipath::AmiPath;
    ///
    /// assert!(AmiPath::parse("").unwrap().is_empty());
    /// assert!(AmiPath::parse("c:dir/").unwrap().has_trailing_separator());
    /// assert!(AmiPath::parse(":root").is_err());
    /// assert!(AmiPath::parse("a//b").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let (prefix, body) = match s.split_once(PREFIX_SEPARATOR) {
            Some((prefix, body)) => {
                if prefix.is_empty() {
                    return Err(Error::malformed(s, "empty prefix"));
                }
                if body.contains(PREFIX_SEPARATOR) {
                    return Err(Error::malformed(s, "more than one ':'"));
                }
                (Some(prefix.to_string()), body)
            }
            None => (None, s),
        };

        if body.is_empty() {
            return Ok(Self {
                prefix,
                segments: Vec::new(),
                trailing_separator: false,
            });
        }

        let (body, trailing_separator) = match body.strip_suffix(SEGMENT_SEPARATOR) {
            Some(stripped) => (stripped, true),
            None => (body, false),
        };

        let mut segments = Vec::new();
        for segment in body.split(SEGMENT_SEPARATOR) {
            if segment.is_empty() {
                return Err(Error::malformed(s, "empty path segment"));
            }
            segments.push(segment.to_string());
        }

        Ok(Self {
            prefix,
            segments,
            trailing_separator,
        })
    }

    /// Build an absolute path naming the root of `prefix`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPath` if `prefix` is not a valid name.
    pub fn root(prefix: &str) -> Result<Self> {
        validate_name(prefix)?;
        Ok(Self {
            prefix: Some(prefix.to_string()),
            segments: Vec::new(),
            trailing_separator: false,
        })
    }

    /// The prefix without its `:`, or `None` for relative paths.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The ordered segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether the path was written with a trailing `/`.
    #[must_use]
    pub fn has_trailing_separator(&self) -> bool {
        self.trailing_separator
    }

    /// Whether the path carries a prefix.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.prefix.is_some()
    }

    /// Whether the path has no prefix.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.prefix.is_none()
    }

    /// Whether this is the relative "here" path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefix.is_none() && self.segments.is_empty()
    }

    /// Whether this is a bare name: relative with exactly one segment.
    #[must_use]
    pub fn is_name_only(&self) -> bool {
        self.prefix.is_none() && self.segments.len() == 1
    }

    /// The last segment, if any.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The path with its last segment removed, or `None` without segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use amipath::AmiPath;
    ///
    /// let p = AmiPath::parse("sys:c/dir").unwrap();
    /// assert_eq!(p.parent().unwrap().to_string(), "sys:c");
    /// assert!(AmiPath::parse("sys:").unwrap().parent().is_none());
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(Self {
            prefix: self.prefix.clone(),
            segments,
            trailing_separator: false,
        })
    }

    /// The relative remainder after the prefix.
    #[must_use]
    pub fn postfix(&self) -> Self {
        Self {
            prefix: None,
            segments: self.segments.clone(),
            trailing_separator: self.trailing_separator,
        }
    }

    /// Append a relative path.
    ///
    /// The result keeps this path's prefix, concatenates the segments and
    /// takes the trailing separator of `other`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if `other` is absolute.
    ///
    /// # Examples
    ///
    /// ```
    /// use amipath::AmiPath;
    ///
    /// let base = AmiPath::parse("root:baz").unwrap();
    /// let joined = base.join(&AmiPath::parse("cmd").unwrap()).unwrap();
    /// assert_eq!(joined.to_string(), "root:baz/cmd");
    /// assert!(base.join(&AmiPath::parse("c:").unwrap()).is_err());
    /// ```
    pub fn join(&self, other: &Self) -> Result<Self> {
        if other.is_absolute() {
            return Err(Error::invalid_op(
                "join",
                format!("cannot append absolute path '{other}'"),
            ));
        }
        Ok(self.append_segments(other))
    }

    /// Substitute this path's prefix with `target`, keeping the remainder.
    ///
    /// `a:bla` rebased onto `c:foo` yields `c:foo/bla`.
    #[must_use]
    pub fn rebase(&self, target: &Self) -> Self {
        target.append_segments(self)
    }

    fn append_segments(&self, other: &Self) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + other.segments.len());
        segments.extend(self.segments.iter().cloned());
        segments.extend(other.segments.iter().cloned());
        Self {
            prefix: self.prefix.clone(),
            segments,
            trailing_separator: other.trailing_separator,
        }
    }

    /// Lowercased prefix used as registry key.
    pub(crate) fn prefix_key(&self) -> Option<String> {
        self.prefix.as_deref().map(name_key)
    }
}

/// Registry key for a volume or assign name.
pub(crate) fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Check that `name` can be used as a volume or assign prefix.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::malformed(name, "empty name"));
    }
    if name.contains(PREFIX_SEPARATOR) || name.contains(SEGMENT_SEPARATOR) {
        return Err(Error::malformed(name, "name must not contain ':' or '/'"));
    }
    Ok(())
}

impl fmt::Display for AmiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, "{prefix}{PREFIX_SEPARATOR}")?;
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEGMENT_SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }
        if self.trailing_separator && !self.segments.is_empty() {
            write!(f, "{SEGMENT_SEPARATOR}")?;
        }
        Ok(())
    }
}

impl FromStr for AmiPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for AmiPath {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PartialEq for AmiPath {
    fn eq(&self, other: &Self) -> bool {
        self.prefix_key() == other.prefix_key() && self.segments == other.segments
    }
}

impl Eq for AmiPath {}

impl Hash for AmiPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.prefix_key().hash(state);
        self.segments.hash(state);
    }
}

/// Compare against a path string; unparsable strings never compare equal.
impl PartialEq<str> for AmiPath {
    fn eq(&self, other: &str) -> bool {
        Self::parse(other).is_ok_and(|p| *self == p)
    }
}

impl PartialEq<&str> for AmiPath {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> AmiPath {
        AmiPath::parse(s).unwrap()
    }

    #[test]
    fn test_parse_absolute() {
        let path = p("foo:bar/baz");
        assert_eq!(path.prefix(), Some("foo"));
        assert_eq!(path.segments(), ["bar", "baz"]);
        assert!(!path.has_trailing_separator());
    }

    #[test]
    fn test_parse_prefix_only() {
        let path = p("work:");
        assert!(path.is_absolute());
        assert!(path.segments().is_empty());
        assert_eq!(path.to_string(), "work:");
    }

    #[test]
    fn test_parse_empty_is_here() {
        let path = p("");
        assert!(path.is_empty());
        assert!(path.is_relative());
        assert_eq!(path, AmiPath::new());
    }

    #[test]
    fn test_parse_trailing_separator() {
        let path = p("foo:bar/");
        assert!(path.has_trailing_separator());
        assert_eq!(path.segments(), ["bar"]);
        assert_eq!(path.to_string(), "foo:bar/");
    }

    #[test]
    fn test_parse_rejects_bad_grammar() {
        assert!(AmiPath::parse(":foo").is_err());
        assert!(AmiPath::parse("a:b:c").is_err());
        assert!(AmiPath::parse("::").is_err());
        assert!(AmiPath::parse("/").is_err());
        assert!(AmiPath::parse("/baz").is_err());
        assert!(AmiPath::parse("a//b").is_err());
        assert!(AmiPath::parse("foo:/").is_err());
    }

    #[test]
    fn test_equality_prefix_case_insensitive() {
        assert_eq!(p("SYS:c"), p("sys:c"));
        assert_ne!(p("sys:C"), p("sys:c"));
        assert_eq!(p("sys:c/"), p("sys:c"));
        assert_eq!(p("Work:"), "work:");
    }

    #[test]
    fn test_hash_matches_equality() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(p("SYS:c"));
        assert!(set.contains(&p("sys:c/")));
    }

    #[test]
    fn test_join_relative() {
        let joined = p("root:baz").join(&p("a/b/")).unwrap();
        assert_eq!(joined.to_string(), "root:baz/a/b/");
        assert_eq!(p("root:").join(&p("")).unwrap(), p("root:"));
        assert!(p("rel").join(&p("x")).unwrap().is_relative());
    }

    #[test]
    fn test_join_rejects_absolute() {
        let err = p("root:").join(&p("sys:")).unwrap_err();
        assert!(matches!(err, Error::InvalidOperation { .. }));
    }

    #[test]
    fn test_rebase_substitutes_prefix() {
        assert_eq!(p("a:bla").rebase(&p("c:foo")), p("c:foo/bla"));
        assert_eq!(p("a:").rebase(&p("b:")), p("b:"));
    }

    #[test]
    fn test_name_only_and_filename() {
        assert!(p("cmd").is_name_only());
        assert!(!p("bla/blub").is_name_only());
        assert!(!p("c:cmd").is_name_only());
        assert_eq!(p("bla/blub").filename(), Some("blub"));
        assert_eq!(p("c:").filename(), None);
    }

    #[test]
    fn test_root_constructor() {
        assert_eq!(AmiPath::root("sys").unwrap(), p("sys:"));
        assert!(AmiPath::root("").is_err());
        assert!(AmiPath::root("a/b").is_err());
    }
}
