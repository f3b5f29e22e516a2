//! End-to-end pipeline tests against real directory trees.

use std::fs;

use dupescan::duplicates::{aggregate, DuplicateFinder, FinderConfig};
use dupescan::output::{JsonOutput, PagedReport, TextReport};
use dupescan::scanner::{FileCategory, ScanConfig};
use tempfile::TempDir;

fn finder_with(scan: ScanConfig) -> DuplicateFinder {
    DuplicateFinder::new(FinderConfig::default().with_scan_config(scan))
}

/// A tree with duplicates across categories and sizes:
///
/// ```text
/// root/
///   photos/sunset.jpg     1000 bytes of X
///   backup/sunset.jpg     1000 bytes of X
///   docs/notes.txt        300 bytes of N
///   docs/notes_copy.txt   300 bytes of N
///   docs/other.txt        300 bytes of O   (same size, different bytes)
///   music/track.mp3       2000 bytes of M  (unique)
/// ```
fn build_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    for sub in ["photos", "backup", "docs", "music"] {
        fs::create_dir(dir.path().join(sub)).unwrap();
    }

    let x = vec![b'X'; 1000];
    fs::write(dir.path().join("photos/sunset.jpg"), &x).unwrap();
    fs::write(dir.path().join("backup/sunset.jpg"), &x).unwrap();

    fs::write(dir.path().join("docs/notes.txt"), vec![b'N'; 300]).unwrap();
    fs::write(dir.path().join("docs/notes_copy.txt"), vec![b'N'; 300]).unwrap();
    fs::write(dir.path().join("docs/other.txt"), vec![b'O'; 300]).unwrap();

    fs::write(dir.path().join("music/track.mp3"), vec![b'M'; 2000]).unwrap();

    dir
}

#[test]
fn full_scan_groups_by_content_not_size() {
    let dir = build_tree();
    let (result, summary) = finder_with(ScanConfig::default())
        .scan(dir.path())
        .unwrap();

    // Two content-equal pairs; other.txt shares a size but not bytes.
    assert_eq!(result.groups.len(), 2);
    assert_eq!(result.total_files_considered, 6);
    assert_eq!(summary.candidates, 6);

    for group in &result.groups {
        assert!(group.files.len() >= 2);
        assert!(group.files.iter().all(|f| f.size == group.size));
    }

    let stats = aggregate(&result);
    assert_eq!(stats.duplicate_groups, 2);
    assert_eq!(stats.duplicate_files, 2);
    assert_eq!(stats.wasted_bytes, 1000 + 300);
}

#[test]
fn category_filter_narrows_the_scan() {
    let dir = build_tree();

    let (result, _) = finder_with(ScanConfig {
        categories: vec![FileCategory::Images],
        ..Default::default()
    })
    .scan(dir.path())
    .unwrap();

    assert_eq!(result.total_files_considered, 2);
    assert_eq!(result.groups.len(), 1);
    assert!(result.groups[0].files.iter().all(|f| f.name == "sunset.jpg"));

    let (result, _) = finder_with(ScanConfig {
        categories: vec![FileCategory::Documents],
        ..Default::default()
    })
    .scan(dir.path())
    .unwrap();

    assert_eq!(result.total_files_considered, 3);
    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.groups[0].size, 300);
}

#[test]
fn min_size_excludes_small_duplicates() {
    let dir = build_tree();

    let (result, _) = finder_with(ScanConfig {
        min_size: 500,
        ..Default::default()
    })
    .scan(dir.path())
    .unwrap();

    // The 300-byte txt pair falls below the threshold.
    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.groups[0].size, 1000);
}

#[test]
fn rescan_supersedes_rather_than_merges() {
    let dir = build_tree();
    let finder = finder_with(ScanConfig::default());

    let (first, _) = finder.scan(dir.path()).unwrap();
    assert_eq!(first.groups.len(), 2);

    // Remove one copy so one pair disappears, then scan again.
    fs::remove_file(dir.path().join("backup/sunset.jpg")).unwrap();
    let (second, _) = finder.scan(dir.path()).unwrap();

    assert_eq!(second.groups.len(), 1);
    assert_eq!(second.total_files_considered, 5);
    // The first result is untouched by the rescan.
    assert_eq!(first.groups.len(), 2);
    assert_eq!(first.total_files_considered, 6);
}

#[test]
fn repeated_scans_are_identical() {
    let dir = build_tree();
    let finder = finder_with(ScanConfig::default());

    let (first, _) = finder.scan(dir.path()).unwrap();
    let (second, _) = finder.scan(dir.path()).unwrap();
    let (third, _) = finder.scan(dir.path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn exports_reflect_a_real_scan() {
    let dir = build_tree();
    let (result, _) = finder_with(ScanConfig::default())
        .scan(dir.path())
        .unwrap();

    let text = TextReport::new(&result).render();
    assert!(text.contains("Total Groups: 2"));
    assert!(text.contains("Total Files: 4"));
    assert!(text.contains("sunset.jpg"));

    let paged = PagedReport::new(&result).with_lines_per_page(5);
    assert!(paged.pages().len() >= 2);

    let json = JsonOutput::new(&result).to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["stats"]["duplicate_groups"], 2);
    assert_eq!(value["stats"]["wasted_bytes"], 1300);
}

#[test]
fn empty_directory_scans_clean() {
    let dir = TempDir::new().unwrap();
    let (result, summary) = finder_with(ScanConfig::default())
        .scan(dir.path())
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(result.total_files_considered, 0);
    assert_eq!(summary.files_skipped(), 0);
}

#[test]
fn ignore_patterns_exclude_whole_subtrees() {
    let dir = build_tree();

    let (result, _) = finder_with(ScanConfig {
        ignore_patterns: vec!["backup/".to_string()],
        ..Default::default()
    })
    .scan(dir.path())
    .unwrap();

    // Without the backup copy the jpg pair is gone.
    assert_eq!(result.groups.len(), 1);
    assert_eq!(result.groups[0].size, 300);
}
