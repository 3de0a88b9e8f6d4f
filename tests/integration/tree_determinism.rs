//! Integration tests for tree digest determinism

use super::test_utils::{build_fixture_tree, write_file};
use dirprint::{hash_tree, DigestAlgorithm, TreeHasher, TreeHasherConfig};
use std::fs;
use tempfile::TempDir;

/// Test that the same filesystem produces the same digest
#[test]
fn test_same_tree_same_digest() {
    let temp_dir = TempDir::new().unwrap();
    build_fixture_tree(temp_dir.path());

    let first = hash_tree(temp_dir.path()).unwrap();
    let second = hash_tree(temp_dir.path()).unwrap();
    assert_eq!(first, second);
}

/// Test that a copy of the tree at another location hashes the same
#[test]
fn test_relocated_tree_same_digest() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    build_fixture_tree(a.path());
    build_fixture_tree(&b.path().join("deeper").join("copy"));

    assert_eq!(
        hash_tree(a.path()).unwrap(),
        hash_tree(&b.path().join("deeper").join("copy")).unwrap()
    );
}

/// Test that renaming the root directory itself does not change the digest
#[test]
fn test_renamed_root_same_digest() {
    let temp_dir = TempDir::new().unwrap();
    let before = temp_dir.path().join("before");
    let after = temp_dir.path().join("after");
    build_fixture_tree(&before);
    let digest_before = hash_tree(&before).unwrap();

    fs::rename(&before, &after).unwrap();
    assert_eq!(digest_before, hash_tree(&after).unwrap());
}

/// Test that creation order does not affect the digest
#[test]
fn test_creation_order_independent() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();

    let files = [
        ("m.txt", "m"),
        ("A.txt", "a"),
        ("z/inner.txt", "inner"),
        ("b.txt", "b"),
        ("z/Another.txt", "another"),
    ];
    for (path, content) in files.iter() {
        write_file(a.path(), path, content);
    }
    for (path, content) in files.iter().rev() {
        write_file(b.path(), path, content);
    }

    assert_eq!(hash_tree(a.path()).unwrap(), hash_tree(b.path()).unwrap());
}

/// Test that file content changes produce different digests
#[test]
fn test_file_content_change_different_digest() {
    let temp_dir = TempDir::new().unwrap();
    build_fixture_tree(temp_dir.path());
    let before = hash_tree(temp_dir.path()).unwrap();

    write_file(temp_dir.path(), "assets/Data/alpha.txt", "alpha!\n");
    assert_ne!(before, hash_tree(temp_dir.path()).unwrap());
}

/// Test that adding or removing a file changes the digest
#[test]
fn test_file_set_change_different_digest() {
    let temp_dir = TempDir::new().unwrap();
    build_fixture_tree(temp_dir.path());
    let before = hash_tree(temp_dir.path()).unwrap();

    write_file(temp_dir.path(), "extra.txt", "");
    let with_extra = hash_tree(temp_dir.path()).unwrap();
    assert_ne!(before, with_extra);

    fs::remove_file(temp_dir.path().join("extra.txt")).unwrap();
    assert_eq!(before, hash_tree(temp_dir.path()).unwrap());
}

/// Test that moving a file keeps its content but changes the digest
#[test]
fn test_moving_file_different_digest() {
    let temp_dir = TempDir::new().unwrap();
    build_fixture_tree(temp_dir.path());
    let before = hash_tree(temp_dir.path()).unwrap();

    fs::create_dir(temp_dir.path().join("moved")).unwrap();
    fs::rename(
        temp_dir.path().join("test.txt"),
        temp_dir.path().join("moved").join("test.txt"),
    )
    .unwrap();
    assert_ne!(before, hash_tree(temp_dir.path()).unwrap());
}

/// Test that swapping contents between two files changes the digest
#[test]
fn test_swapped_contents_different_digest() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    write_file(a.path(), "one.txt", "first");
    write_file(a.path(), "two.txt", "second");
    write_file(b.path(), "one.txt", "second");
    write_file(b.path(), "two.txt", "first");

    assert_ne!(hash_tree(a.path()).unwrap(), hash_tree(b.path()).unwrap());
}

/// Test that thread count does not affect the digest
#[test]
fn test_thread_count_independent() {
    let temp_dir = TempDir::new().unwrap();
    for i in 0..64 {
        write_file(
            temp_dir.path(),
            &format!("d{}/f{}.txt", i % 7, i),
            format!("content {}", i),
        );
    }

    let digests: Vec<_> = [1, 2, 8, 0]
        .into_iter()
        .map(|threads| {
            TreeHasher::new(temp_dir.path().to_path_buf())
                .with_config(TreeHasherConfig {
                    threads,
                    ..TreeHasherConfig::default()
                })
                .compute_digest()
                .unwrap()
        })
        .collect();

    assert!(digests.windows(2).all(|w| w[0] == w[1]));
}

/// Test that the algorithm choice changes the digest and its length
#[test]
fn test_algorithm_selects_digest() {
    let temp_dir = TempDir::new().unwrap();
    build_fixture_tree(temp_dir.path());

    let build = |algorithm| {
        TreeHasher::new(temp_dir.path().to_path_buf())
            .with_config(TreeHasherConfig {
                algorithm,
                ..TreeHasherConfig::default()
            })
            .build()
            .unwrap()
    };

    let md5 = build(DigestAlgorithm::Md5);
    let sha = build(DigestAlgorithm::Sha256);
    let blake = build(DigestAlgorithm::Blake3);
    assert_eq!(md5.digest.as_str().len(), 32);
    assert_eq!(sha.digest.as_str().len(), 64);
    assert_eq!(blake.digest.as_str().len(), 64);
    assert_ne!(sha.digest, blake.digest);
    assert_eq!(md5.digest, hash_tree(temp_dir.path()).unwrap());
}
