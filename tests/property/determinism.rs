//! Property-based tests for tree digest determinism

use dirprint::tree::canonical::{aggregate, canonicalize, sort_entries};
use dirprint::{hash_tree, DigestAlgorithm, PathDigestEntry, PathDigestMap};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Relative paths of one to three components
fn relative_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z0-9_]{1,8}", 1..=3).prop_map(|parts| parts.join("/"))
}

/// A file set whose paths never collide with each other's directories
fn file_set() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    prop::collection::btree_map(relative_path(), prop::collection::vec(any::<u8>(), 0..64), 0..12)
        .prop_map(|files| {
            files
                .into_iter()
                .enumerate()
                .map(|(i, (path, content))| (format!("{}.f{}", path, i), content))
                .collect()
        })
}

fn materialize(root: &Path, files: &BTreeMap<String, Vec<u8>>, reverse: bool) {
    let mut ordered: Vec<_> = files.iter().collect();
    if reverse {
        ordered.reverse();
    }
    for (path, content) in ordered {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
}

fn entries_for(files: &BTreeMap<String, Vec<u8>>) -> Vec<PathDigestEntry> {
    files
        .iter()
        .map(|(path, content)| PathDigestEntry::new(path.clone(), DigestAlgorithm::Md5.digest_bytes(content)))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any permutation of the same entries sorts and aggregates identically
    #[test]
    fn test_aggregate_independent_of_input_order(
        files in file_set(),
        seed in any::<u64>(),
    ) {
        let mut forward = entries_for(&files);
        let mut shuffled = forward.clone();
        // deterministic rotation plus reversal as the permutation
        if !shuffled.is_empty() {
            let len = shuffled.len();
            shuffled.rotate_left((seed as usize) % len);
        }
        shuffled.reverse();

        sort_entries(&mut forward);
        sort_entries(&mut shuffled);
        prop_assert_eq!(&forward, &shuffled);
        prop_assert_eq!(
            aggregate(DigestAlgorithm::Md5, &forward),
            aggregate(DigestAlgorithm::Md5, &shuffled)
        );
    }

    /// Canonicalization does not depend on the root prefix
    #[test]
    fn test_canonicalize_independent_of_root(files in file_set()) {
        let project = |root: &Path| -> PathDigestMap {
            files
                .iter()
                .map(|(path, content)| (root.join(path), DigestAlgorithm::Md5.digest_bytes(content)))
                .collect()
        };

        let a = PathBuf::from("/first/root");
        let b = PathBuf::from("/somewhere/else/entirely");
        let entries_a = canonicalize(&a, project(&a)).unwrap();
        let entries_b = canonicalize(&b, project(&b)).unwrap();
        prop_assert_eq!(entries_a, entries_b);
    }

    /// Materialized trees hash the same regardless of creation order
    #[test]
    fn test_tree_digest_independent_of_creation_order(files in file_set()) {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        materialize(a.path(), &files, false);
        materialize(b.path(), &files, true);

        prop_assert_eq!(hash_tree(a.path()).unwrap(), hash_tree(b.path()).unwrap());
    }

    /// Changing the content of any single file changes the tree digest
    #[test]
    fn test_content_change_changes_digest(
        files in file_set().prop_filter("non-empty", |f| !f.is_empty()),
        index in any::<prop::sample::Index>(),
        extra in any::<u8>(),
    ) {
        let before = aggregate(DigestAlgorithm::Md5, &{
            let mut entries = entries_for(&files);
            sort_entries(&mut entries);
            entries
        });

        let mut changed = files.clone();
        let key = changed.keys().nth(index.index(changed.len())).unwrap().clone();
        changed.get_mut(&key).unwrap().push(extra);

        let mut entries = entries_for(&changed);
        sort_entries(&mut entries);
        prop_assert_ne!(before, aggregate(DigestAlgorithm::Md5, &entries));
    }
}
