//! Common test utilities for integration tests.
//!
//! The standard fixture mirrors a small guest installation:
//!
//! - volumes `root:`, `sys:` and `work:` on directories under a temp dir
//! - assigns `a: -> b:, c:foo`, `b: -> root:bla`, `c: -> sys:c`, `d: -> a:`
//! - default environment with cwd `root:baz` and command path `a:, c:`

use std::path::{Path, PathBuf};

use amipath::{AmiPath, PathManager};
use tempfile::TempDir;

/// Parse a guest path, panicking on bad input.
#[allow(dead_code)]
pub fn p(s: &str) -> AmiPath {
    AmiPath::parse(s).unwrap_or_else(|e| panic!("bad test path '{s}': {e}"))
}

/// Parse a list of guest paths.
#[allow(dead_code)]
pub fn paths(list: &[&str]) -> Vec<AmiPath> {
    list.iter().map(|s| p(s)).collect()
}

/// A populated path manager whose volume directories live in a temp dir.
///
/// The directory is removed when the fixture is dropped.
pub struct Fixture {
    /// The manager under test.
    pub pm: PathManager,
    dir: TempDir,
}

#[allow(dead_code)]
impl Fixture {
    /// Volumes only, directories created.
    pub fn volumes_only() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut pm = PathManager::new();
        for name in ["root", "sys", "work"] {
            let vol_dir = dir.path().join(name);
            std::fs::create_dir_all(&vol_dir).expect("create volume dir");
            pm.add_volume(name, &vol_dir).expect("add volume");
        }
        Self { pm, dir }
    }

    /// The standard fixture.
    pub fn standard() -> Self {
        let mut fixture = Self::volumes_only();
        let pm = &mut fixture.pm;
        pm.add_assign("a", paths(&["b:", "c:foo"])).expect("add a");
        pm.add_assign("b", paths(&["root:bla"])).expect("add b");
        pm.add_assign("c", paths(&["sys:c"])).expect("add c");
        pm.add_assign("d", paths(&["a:"])).expect("add d");
        pm.get_default_env_mut().set_cwd(p("root:baz"));
        pm.get_default_env_mut().set_cmd_paths(paths(&["a:", "c:"]));
        fixture
    }

    /// The temp directory holding the volume directories.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// The host directory of a fixture volume.
    pub fn volume_dir(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
