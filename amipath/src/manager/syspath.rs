//! Mapping between guest paths and host filesystem paths.

use std::path::{Path, PathBuf};

use super::{PathManager, ESCAPE_MARKER};
use crate::error::{Error, Result};
use crate::path::{host, AmiPath, AmiPathEnv, PREFIX_SEPARATOR, SEGMENT_SEPARATOR};

impl PathManager {
    /// Map a guest path to the host path it denotes.
    ///
    /// The path is first reduced with [`volpath`](Self::volpath), then its
    /// segments are appended to the volume's host base directory.
    ///
    /// # Errors
    ///
    /// Inherits every failure of `volpath`, and returns `MalformedPath` for a
    /// `.` or `..` segment, which could leave the volume.
    pub fn to_sys_path(
        &self,
        path: &AmiPath,
        env: Option<&AmiPathEnv>,
        strict: bool,
    ) -> Result<Option<PathBuf>> {
        let Some(vol_path) = self.volpath(path, env, strict)? else {
            return Ok(None);
        };
        let Some(volume) = vol_path.prefix() else {
            return Err(Error::invalid_op(
                "to_sys_path",
                format!("'{vol_path}' did not resolve to a volume"),
            ));
        };
        let mut sys_path = self.volumes.get_sys_path(volume)?.to_path_buf();
        for segment in vol_path.segments() {
            if segment == "." || segment == ".." {
                return Err(Error::malformed(
                    &vol_path.to_string(),
                    format!("segment '{segment}' has no host mapping"),
                ));
            }
            sys_path.push(segment);
        }
        log::debug!("to_sys_path {path} -> {}", sys_path.display());
        Ok(Some(sys_path))
    }

    /// Map a host path back to a volume path.
    ///
    /// Relative host paths are taken against the process working directory.
    /// When volumes are nested, the one with the longest base directory wins.
    /// Returns `None` if no volume covers the path, unless `strict`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHostPath` if the path cannot be normalized. In strict
    /// mode also returns `UnmappableHostPath` when no volume covers the path
    /// and `MalformedPath` when a host component cannot be a guest segment;
    /// without `strict` both of those yield `None`.
    pub fn from_sys_path(&self, sys_path: impl AsRef<Path>, strict: bool) -> Result<Option<AmiPath>> {
        let normalized = host::normalize(sys_path.as_ref())?;

        let best = self
            .volumes
            .iter()
            .filter_map(|(name, base)| {
                host::relative_components(base, &normalized)
                    .map(|rest| (name, base.components().count(), rest))
            })
            .max_by_key(|(_, depth, _)| *depth);

        match best {
            Some((name, _, rest)) => {
                let separator = SEGMENT_SEPARATOR.to_string();
                let text = format!("{name}{PREFIX_SEPARATOR}{}", rest.join(separator.as_str()));
                match AmiPath::parse(&text) {
                    Ok(ami) => {
                        log::debug!("from_sys_path {} -> {ami}", normalized.display());
                        Ok(Some(ami))
                    }
                    Err(e) if strict => Err(e),
                    Err(e) => {
                        log::debug!("from_sys_path {}: {e}", normalized.display());
                        Ok(None)
                    }
                }
            }
            None if strict => Err(Error::UnmappableHostPath { path: normalized }),
            None => {
                log::debug!("from_sys_path {}: no volume", normalized.display());
                Ok(None)
            }
        }
    }

    /// Parse a configuration-style path string.
    ///
    /// A string starting with `::` holds a raw host path which is mapped
    /// back through [`from_sys_path`](Self::from_sys_path); anything else
    /// is parsed as a guest path and returned without resolution.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` for a bare `::`, `MalformedPath` for an
    /// unparsable guest path, and the failures of `from_sys_path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use amipath::{AmiPath, PathManager};
    ///
    /// let pm = PathManager::new();
    /// assert_eq!(
    ///     pm.resolve_esc_sys_path("bla:", false).unwrap(),
    ///     Some(AmiPath::parse("bla:").unwrap())
    /// );
    /// assert!(pm.resolve_esc_sys_path("::", false).is_err());
    /// ```
    pub fn resolve_esc_sys_path(&self, s: &str, strict: bool) -> Result<Option<AmiPath>> {
        match s.strip_prefix(ESCAPE_MARKER) {
            Some("") => Err(Error::invalid_op(
                "resolve_esc_sys_path",
                "empty host path after escape marker",
            )),
            Some(sys_path) => self.from_sys_path(sys_path, strict),
            None => AmiPath::parse(s).map(Some),
        }
    }
}
