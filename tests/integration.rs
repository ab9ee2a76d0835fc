//! Integration tests for the folderkit CLI


use assert_cmd::Command;
use harness::{lines, run_folderkit, sample_tree};
use predicates::prelude::*;

fn folderkit() -> Command {
    let mut cmd = Command::cargo_bin("folderkit").expect("binary should build");
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

// ============================================================================
// scan
// ============================================================================

#[test]
fn test_scan_shallow_lists_direct_children() {
    let tree = sample_tree();
    let (stdout, _stderr, success) = run_folderkit(tree.path(), &["scan", "--names", "--sort", "name"]);
    assert!(success);
    assert_eq!(lines(&stdout), vec!["a.txt", "b.md", "sub"]);
}

#[test]
fn test_scan_recursive_files_only() {
    let tree = sample_tree();
    let (stdout, _stderr, success) =
        run_folderkit(tree.path(), &["scan", "-r", "--files", "--names", "--sort", "name"]);
    assert!(success);
    assert_eq!(lines(&stdout), vec!["a.txt", "b.md", "c.txt", "d.rs"]);
}

#[test]
fn test_scan_dirs_only() {
    let tree = sample_tree();
    let (stdout, _stderr, success) =
        run_folderkit(tree.path(), &["scan", "-r", "--dirs", "--names", "--sort", "name"]);
    assert!(success);
    assert_eq!(lines(&stdout), vec!["deep", "sub"]);
}

#[test]
fn test_scan_extension_filter_accepts_bare_and_dotted() {
    let tree = sample_tree();
    let (stdout, _stderr, success) = run_folderkit(
        tree.path(),
        &["scan", "-r", "-e", "txt", "-e", ".RS", "--names", "--sort", "name"],
    );
    assert!(success);
    // Directories are exempt from extension filtering
    assert_eq!(lines(&stdout), vec!["a.txt", "c.txt", "d.rs", "deep", "sub"]);
}

#[test]
fn test_scan_keyword_is_case_insensitive() {
    let tree = sample_tree();
    tree.add_file("Report_FINAL.txt", "x");
    let (stdout, _stderr, success) =
        run_folderkit(tree.path(), &["scan", "-k", "final", "--names"]);
    assert!(success);
    assert_eq!(lines(&stdout), vec!["Report_FINAL.txt"]);
}

#[test]
fn test_scan_sort_by_size_reversed() {
    let tree = sample_tree();
    let (stdout, _stderr, success) = run_folderkit(
        tree.path(),
        &["scan", "-r", "--files", "--sort", "size", "--reverse", "--names"],
    );
    assert!(success);
    assert_eq!(lines(&stdout), vec!["a.txt", "c.txt", "b.md", "d.rs"]);
}

#[test]
fn test_scan_prints_full_paths_by_default() {
    let tree = sample_tree();
    let root = tree.path().to_string_lossy().to_string();
    folderkit()
        .args(["scan", &root, "--files"])
        .assert()
        .success()
        .stdout(predicate::str::contains(tree.path().join("a.txt").to_string_lossy().as_ref()));
}

#[test]
fn test_scan_json() {
    let tree = sample_tree();
    let output = folderkit()
        .current_dir(tree.path())
        .args(["scan", "--json", "--sort", "path"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.get("path").is_some()));
    let dirs = entries.iter().filter(|e| e["is_dir"] == true).count();
    assert_eq!(dirs, 1);
}

#[test]
fn test_scan_lazy_json_lines() {
    let tree = sample_tree();
    let output = folderkit()
        .current_dir(tree.path())
        .args(["scan", "-r", "--lazy", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let parsed: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(parsed.len(), 6);
}

#[test]
fn test_scan_lazy_json_names() {
    let tree = sample_tree();
    let output = folderkit()
        .current_dir(tree.path())
        .args(["scan", "--lazy", "--json", "--names", "--files"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let mut names: Vec<String> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["a.txt", "b.md"]);
}

#[test]
fn test_scan_lazy_conflicts_with_sort() {
    let tree = sample_tree();
    folderkit()
        .current_dir(tree.path())
        .args(["scan", "--lazy", "--sort", "name"])
        .assert()
        .failure();
}

#[test]
fn test_scan_files_conflicts_with_dirs() {
    let tree = sample_tree();
    folderkit()
        .current_dir(tree.path())
        .args(["scan", "--files", "--dirs"])
        .assert()
        .failure();
}

#[test]
fn test_scan_missing_root_fails() {
    let tree = sample_tree();
    folderkit()
        .current_dir(tree.path())
        .args(["scan", "does-not-exist"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("folderkit: cannot access 'does-not-exist'"));
}

#[test]
fn test_scan_file_root_fails() {
    let tree = sample_tree();
    folderkit()
        .current_dir(tree.path())
        .args(["scan", "a.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

// ============================================================================
// find
// ============================================================================

#[test]
fn test_find_recursive_by_default() {
    let tree = sample_tree();
    let (stdout, _stderr, success) = run_folderkit(tree.path(), &["find", "*.txt"]);
    assert!(success);
    let found = lines(&stdout);
    assert_eq!(found.len(), 2);
    assert!(found[0].ends_with("a.txt"));
    assert!(found[1].ends_with("c.txt"));
}

#[test]
fn test_find_shallow() {
    let tree = sample_tree();
    let (stdout, _stderr, success) = run_folderkit(tree.path(), &["find", "*.TXT", ".", "--shallow"]);
    assert!(success);
    let found = lines(&stdout);
    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("a.txt"));
}

#[test]
fn test_find_matches_directories_too() {
    let tree = sample_tree();
    let (stdout, _stderr, success) = run_folderkit(tree.path(), &["find", "de*"]);
    assert!(success);
    let found = lines(&stdout);
    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("deep"));
}

#[test]
fn test_find_no_match_is_empty_success() {
    let tree = sample_tree();
    folderkit()
        .current_dir(tree.path())
        .args(["find", "*.zip"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_find_unclosed_bracket_is_literal() {
    let tree = sample_tree();
    tree.add_file("notes[", "x");
    let (stdout, stderr, success) = run_folderkit(tree.path(), &["find", "notes["]);
    assert!(success, "stderr: {}", stderr);
    let found = lines(&stdout);
    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("notes["));
}

#[test]
fn test_find_ignores_case_beyond_ascii() {
    let tree = sample_tree();
    tree.add_file("sub/äpfel.txt", "x");
    let (stdout, _stderr, success) = run_folderkit(tree.path(), &["find", "ÄPFEL*"]);
    assert!(success);
    let found = lines(&stdout);
    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("äpfel.txt"));
}

#[test]
fn test_find_json() {
    let tree = sample_tree();
    let output = folderkit()
        .current_dir(tree.path())
        .args(["find", "*.rs", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let found: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("d.rs"));
}

// ============================================================================
// count / size
// ============================================================================

#[test]
fn test_count_report() {
    let tree = sample_tree();
    let (stdout, _stderr, success) = run_folderkit(tree.path(), &["count"]);
    assert!(success);
    assert!(stdout.contains("Files:        4"), "got: {}", stdout);
    assert!(stdout.contains("Directories:  2"), "got: {}", stdout);
    assert!(stdout.contains("Total:        6"), "got: {}", stdout);
    assert!(stdout.contains("20 bytes"), "got: {}", stdout);
}

#[test]
fn test_count_shallow_json() {
    let tree = sample_tree();
    let output = folderkit()
        .current_dir(tree.path())
        .args(["count", "--shallow", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let count: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(count["files"], 2);
    assert_eq!(count["dirs"], 1);
    assert_eq!(count["total_size_bytes"], 13);
}

#[test]
fn test_size_plain_and_json() {
    let tree = sample_tree();
    folderkit()
        .current_dir(tree.path())
        .arg("size")
        .assert()
        .success()
        .stdout("20\n");

    let output = folderkit()
        .current_dir(tree.path())
        .args(["size", "--json"])
        .output()
        .unwrap();
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["total_size_bytes"], 20);
}

#[test]
fn test_size_human() {
    let tree = sample_tree();
    tree.add_sized("big.bin", 2048);
    folderkit()
        .current_dir(tree.path())
        .args(["size", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("K"));
}

// ============================================================================
// where
// ============================================================================

#[test]
fn test_where_temp_uses_environment() {
    let tree = sample_tree();
    let temp = tree.path().to_string_lossy().to_string();
    folderkit()
        .args(["where", "temp"])
        .env("TEMP", &temp)
        .assert()
        .success()
        .stdout(format!("{}\n", temp));
}

#[test]
fn test_where_rejects_unknown_folder() {
    folderkit()
        .args(["where", "music"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_help_lists_commands() {
    folderkit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("find"))
        .stdout(predicate::str::contains("where"));
}
