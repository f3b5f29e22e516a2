//! Scan-then-delete scenarios over real files.

use std::fs;

use dupescan::actions::{delete_member, DeleteError};
use dupescan::duplicates::{aggregate, DuplicateFinder};
use tempfile::TempDir;

/// Three copies of one payload, two of another.
fn build_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in ["a1.bin", "a2.bin", "a3.bin"] {
        fs::write(dir.path().join(name), vec![b'A'; 400]).unwrap();
    }
    for name in ["b1.bin", "b2.bin"] {
        fs::write(dir.path().join(name), vec![b'B'; 150]).unwrap();
    }
    dir
}

#[test]
fn deleting_one_copy_updates_result_and_disk() {
    let dir = build_tree();
    let (mut result, _) = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();
    assert_eq!(result.groups.len(), 2);

    // The triple group is the one with 400-byte members.
    let triple = result.groups.iter().position(|g| g.size == 400).unwrap();
    let victim = result.groups[triple].files[2].path.clone();

    let outcome = delete_member(&mut result, triple, 2).unwrap();

    assert!(!outcome.group_removed);
    assert!(!victim.exists());
    assert_eq!(result.groups[triple].files.len(), 2);

    let stats = aggregate(&result);
    assert_eq!(stats.duplicate_groups, 2);
    assert_eq!(stats.duplicate_files, 2);
    assert_eq!(stats.wasted_bytes, 400 + 150);
}

#[test]
fn deleting_from_a_pair_dissolves_the_group() {
    let dir = build_tree();
    let (mut result, _) = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    let pair = result.groups.iter().position(|g| g.size == 150).unwrap();
    delete_member(&mut result, pair, 0).unwrap();

    assert_eq!(result.groups.len(), 1);
    assert!(result.groups.iter().all(|g| g.size == 400));

    // Aggregation after dissolution no longer counts the dissolved group.
    let stats = aggregate(&result);
    assert_eq!(stats.duplicate_groups, 1);
    assert_eq!(stats.wasted_bytes, 800);
}

#[test]
fn draining_a_group_one_by_one() {
    let dir = build_tree();
    let (mut result, _) = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    let triple = result.groups.iter().position(|g| g.size == 400).unwrap();
    let digest = result.groups[triple].digest;

    // First deletion leaves a pair, second dissolves it.
    assert!(!delete_member(&mut result, triple, 0).unwrap().group_removed);
    let triple = result
        .groups
        .iter()
        .position(|g| g.digest == digest)
        .unwrap();
    assert!(delete_member(&mut result, triple, 0).unwrap().group_removed);

    assert!(result.groups.iter().all(|g| g.digest != digest));
    // Exactly one copy of payload A survives on disk.
    let survivors = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with('a'))
        .count();
    assert_eq!(survivors, 1);
}

#[test]
fn bogus_indices_leave_everything_alone() {
    let dir = build_tree();
    let (mut result, _) = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();
    let before = result.clone();

    assert!(matches!(
        delete_member(&mut result, 99, 0),
        Err(DeleteError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        delete_member(&mut result, 0, 99),
        Err(DeleteError::IndexOutOfRange { .. })
    ));

    assert_eq!(result, before);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 5);
}

#[test]
fn storage_failure_surfaces_and_preserves_state() {
    let dir = build_tree();
    let (mut result, _) = DuplicateFinder::with_defaults().scan(dir.path()).unwrap();

    // Pull the rug out: delete a member externally, then ask the manager.
    let pair = result.groups.iter().position(|g| g.size == 150).unwrap();
    let target = result.groups[pair].files[1].path.clone();
    fs::remove_file(&target).unwrap();

    let before = result.clone();
    let err = delete_member(&mut result, pair, 1).unwrap_err();

    assert!(matches!(err, DeleteError::NotFound(_)));
    assert_eq!(result, before);
}
