//! Pinned digests for fixed trees
//!
//! These values must never change: stored fingerprints from earlier runs
//! are compared against fresh ones.

use super::test_utils::{build_fixture_tree, write_file};
use dirprint::{hash_tree, DigestAlgorithm, TreeHasher, TreeHasherConfig};
use tempfile::TempDir;

#[test]
fn test_single_file_tree() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "test.txt", "hello\n");

    // md5("b1946ac92492d2347c6235b4d2611184 /test.txt")
    assert_eq!(
        hash_tree(temp_dir.path()).unwrap().as_str(),
        "9510b108746fa700312c3cf057b318b8"
    );
}

#[test]
fn test_single_nested_file_tree() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "sub/test.txt", "hello\n");

    assert_eq!(
        hash_tree(temp_dir.path()).unwrap().as_str(),
        "03fbb7f675fb3ef4ee569e58ce77eaee"
    );
}

#[test]
fn test_fixture_tree_md5() {
    let temp_dir = TempDir::new().unwrap();
    build_fixture_tree(temp_dir.path());

    let tree = TreeHasher::new(temp_dir.path().to_path_buf()).build().unwrap();
    let records: Vec<_> = tree.entries.iter().map(|e| e.record()).collect();
    assert_eq!(
        records,
        vec![
            "9f9f90dbe3e5ee1218c86b8839db1995 /assets/Data/alpha.txt",
            "b59121341ab26766729b7f1d7f7e0c2f /assets/logo.bin",
            "b1946ac92492d2347c6235b4d2611184 /test.txt",
            "2db8f255a13ae1e49099d9dad57b4a37 /Zeta.txt",
        ]
    );
    assert_eq!(tree.digest.as_str(), "79b1c35d534e66b67bc7805f0eeb7a85");
}

#[test]
fn test_fixture_tree_sha256() {
    let temp_dir = TempDir::new().unwrap();
    build_fixture_tree(temp_dir.path());

    let digest = TreeHasher::new(temp_dir.path().to_path_buf())
        .with_config(TreeHasherConfig {
            algorithm: DigestAlgorithm::Sha256,
            ..TreeHasherConfig::default()
        })
        .compute_digest()
        .unwrap();
    assert_eq!(
        digest.as_str(),
        "6d1c428789562b8437ea07d4f2a39ad804b7adafd5676c415362d18b77c0818a"
    );
}
