//! Property-based tests for guest paths and resolution.

use super::{AmiPath, AmiPathEnv};
use crate::manager::PathManager;
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-]{1,12}"
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}"
}

fn relative_strategy() -> impl Strategy<Value = AmiPath> {
    (prop::collection::vec(segment_strategy(), 0..6), any::<bool>()).prop_map(|(segments, trailing)| {
        let mut text = segments.join("/");
        if trailing && !text.is_empty() {
            text.push('/');
        }
        AmiPath::parse(&text).unwrap()
    })
}

fn absolute_strategy() -> impl Strategy<Value = AmiPath> {
    (name_strategy(), relative_strategy())
        .prop_map(|(prefix, rel)| AmiPath::root(&prefix).unwrap().join(&rel).unwrap())
}

/// A manager with one volume and a chain of assigns `m0:` .. `mN:`, each
/// pointing at `width` targets on the next level.
fn layered_manager(depth: usize, width: usize) -> PathManager {
    let mut pm = PathManager::new();
    pm.add_volume("vol", "/tmp/vol").unwrap();
    for level in (0..depth).rev() {
        let next = if level + 1 == depth {
            "vol".to_string()
        } else {
            format!("m{}", level + 1)
        };
        let targets = (0..width)
            .map(|i| AmiPath::parse(&format!("{next}:b{i}")).unwrap())
            .collect();
        pm.add_assign(&format!("m{level}"), targets).unwrap();
    }
    pm
}

/// Apply single-hop assign resolution to every path until nothing changes.
fn single_hop_fixed_point(pm: &PathManager, path: &AmiPath) -> Vec<AmiPath> {
    let mut current = vec![path.clone()];
    loop {
        let next: Vec<AmiPath> = current
            .iter()
            .flat_map(|p| pm.resolve_assigns(p, false).unwrap().into_vec())
            .collect();
        if next == current {
            return current;
        }
        current = next;
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Display output parses back to an equal path
    #[test]
    fn display_parse_roundtrip(path in absolute_strategy()) {
        let reparsed = AmiPath::parse(&path.to_string()).unwrap();
        prop_assert_eq!(&reparsed, &path);
        prop_assert_eq!(reparsed.has_trailing_separator(), path.has_trailing_separator());
    }

    // Prefix comparison ignores case
    #[test]
    fn prefix_case_is_ignored(path in absolute_strategy()) {
        let upper = AmiPath::parse(&path.to_string().to_uppercase()).unwrap();
        prop_assert_eq!(upper.prefix_key(), path.prefix_key());
    }

    // A relative path is made absolute by joining onto the cwd
    #[test]
    fn abspath_of_relative_joins_cwd(
        cwd_rel in relative_strategy(),
        rel in relative_strategy(),
    ) {
        let mut pm = PathManager::new();
        pm.add_volume("root", "/tmp/root").unwrap();
        let cwd = AmiPath::root("root").unwrap().join(&cwd_rel).unwrap();
        let env = AmiPathEnv::new(cwd.clone(), Vec::new());

        let abs = pm.abspath(&rel, Some(&env)).unwrap();
        prop_assert_eq!(abs, cwd.join(&rel).unwrap());
    }

    // Absolute paths pass through abspath untouched, known prefix or not
    #[test]
    fn abspath_of_absolute_is_identity(path in absolute_strategy()) {
        let pm = PathManager::new();
        prop_assert_eq!(pm.abspath(&path, None).unwrap(), path);
    }

    // Relative paths are always valid
    #[test]
    fn relative_paths_are_valid(rel in relative_strategy()) {
        let pm = PathManager::new();
        prop_assert!(pm.is_valid(&rel));
    }

    // Expansion yields the product of the branch counts, all volume-rooted
    #[test]
    fn volpaths_count_is_branch_product(depth in 1usize..4, width in 1usize..4, rel in relative_strategy()) {
        let pm = layered_manager(depth, width);
        let path = AmiPath::root("m0").unwrap().join(&rel).unwrap();

        let paths = pm.volpaths(&path, None, true).unwrap();
        prop_assert_eq!(paths.len(), width.pow(u32::try_from(depth).unwrap()));
        for p in &paths {
            prop_assert_eq!(p.prefix(), Some("vol"));
            prop_assert!(p.segments().ends_with(rel.segments()));
        }
    }

    // Single-target chains resolve the same way through volpath and volpaths
    #[test]
    fn single_chain_volpath_matches_volpaths(depth in 1usize..5, rel in relative_strategy()) {
        let pm = layered_manager(depth, 1);
        let path = AmiPath::root("m0").unwrap().join(&rel).unwrap();

        let single = pm.volpath(&path, None, true).unwrap().unwrap();
        let all = pm.volpaths(&path, None, true).unwrap();
        prop_assert_eq!(all, vec![single]);
    }

    // Repeated single-hop substitution converges to the full expansion
    #[test]
    fn single_hop_fixed_point_matches_volpaths(
        depth in 1usize..4,
        width in 1usize..4,
        rel in relative_strategy(),
    ) {
        let pm = layered_manager(depth, width);
        let path = AmiPath::root("m0").unwrap().join(&rel).unwrap();

        let expanded = single_hop_fixed_point(&pm, &path);
        prop_assert_eq!(expanded, pm.volpaths(&path, None, true).unwrap());
    }
}
