use std::fs;
use tempfile::tempdir;

use doc_flattener_core::analysis::{analyze, DirectoryStats};
use doc_flattener_core::model::DirectoryPath;
use doc_flattener_core::scanner::TreeScanner;

/// Layout:
///   root/
///     top.bin          (100 bytes)
///     a/
///       one.bin        (10 bytes)
///       two.bin        (20 bytes)
///       b/
///         three.bin    (5 bytes)
///     empty/
fn create_test_tree(root: &std::path::Path) {
    fs::create_dir_all(root.join("a/b")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::write(root.join("top.bin"), vec![0u8; 100]).unwrap();
    fs::write(root.join("a/one.bin"), vec![0u8; 10]).unwrap();
    fs::write(root.join("a/two.bin"), vec![0u8; 20]).unwrap();
    fs::write(root.join("a/b/three.bin"), vec![0u8; 5]).unwrap();
}

#[test]
fn test_counts_and_cumulative_sizes() {
    let tmp = tempdir().unwrap();
    create_test_tree(tmp.path());

    let report = analyze(tmp.path(), &TreeScanner::new()).unwrap();

    let paths: Vec<String> = report.directories.iter().map(|(p, _)| p.to_string()).collect();
    assert_eq!(paths, vec![".", "a", "a/b", "empty"]);

    assert_eq!(
        report.root_stats().unwrap(),
        &DirectoryStats {
            subfolders: 2,
            files: 1,
            direct_bytes: 100,
            total_files: 4,
            total_bytes: 135,
        }
    );
    assert_eq!(
        report.get(&DirectoryPath::parse("a")).unwrap(),
        &DirectoryStats {
            subfolders: 1,
            files: 2,
            direct_bytes: 30,
            total_files: 3,
            total_bytes: 35,
        }
    );
    assert_eq!(
        report.get(&DirectoryPath::parse("empty")).unwrap(),
        &DirectoryStats::default()
    );
    assert!(report.skipped.is_empty());
}

#[test]
fn test_ignored_directories_are_left_out() {
    let tmp = tempdir().unwrap();
    create_test_tree(tmp.path());

    let scanner = TreeScanner::new().with_ignore_patterns(&["b".to_string()]);
    let report = analyze(tmp.path(), &scanner).unwrap();

    assert!(report.get(&DirectoryPath::parse("a/b")).is_none());
    let a = report.get(&DirectoryPath::parse("a")).unwrap();
    assert_eq!(a.subfolders, 0);
    assert_eq!(a.total_bytes, 30);
    assert_eq!(report.root_stats().unwrap().total_bytes, 130);
}

#[test]
fn test_missing_root_is_an_error() {
    let tmp = tempdir().unwrap();
    assert!(analyze(&tmp.path().join("absent"), &TreeScanner::new()).is_err());
}
