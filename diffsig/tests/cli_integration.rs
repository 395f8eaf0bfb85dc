//! Integration tests for the diffsig CLI

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn run_diffsig(args: &[&str]) -> (String, String, bool) {
    let mut cmd_args = vec!["run", "-p", "diffsig", "--"];
    cmd_args.extend(args);

    let output = Command::new("cargo")
        .args(&cmd_args)
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

const SAMPLE_PATCH: &str = "\
--- a/src/config.rs
+++ b/src/config.rs
@@ -1,2 +1,2 @@
 pub const NAME: &str = \"app\";
-pub const LIMIT: u32 = 10;
+pub const LIMIT: u32 = 20;
";

fn write_sample_patch(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("sample.patch");
    fs::write(&path, SAMPLE_PATCH).expect("Failed to write patch fixture");
    path
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_diffsig(&["--help"]);

    assert!(success);
    assert!(stdout.contains("diffsig"));
    assert!(stdout.contains("--ignore"));
    assert!(stdout.contains("--no-default-ignores"));
    assert!(stdout.contains("--by-file"));
    assert!(stdout.contains("--output"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_diffsig(&["--version"]);

    assert!(success);
    assert!(stdout.contains("diffsig"));
}

#[test]
fn test_text_report() {
    let dir = tempfile::tempdir().unwrap();
    let patch = write_sample_patch(&dir);

    let (stdout, _, success) = run_diffsig(&[patch.to_str().unwrap()]);

    assert!(success);
    assert!(stdout.contains("including moved lines: +1 / -1"));
    assert!(stdout.contains("excluding moved lines: +1 / -1"));
    assert!(stdout.contains("significant lines: 2"));
}

#[test]
fn test_by_file_breakdown() {
    let dir = tempfile::tempdir().unwrap();
    let patch = write_sample_patch(&dir);

    let (stdout, _, success) = run_diffsig(&[patch.to_str().unwrap(), "--by-file"]);

    assert!(success);
    assert!(stdout.contains("src/config.rs => src/config.rs: 2 lines"));
}

#[test]
fn test_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let patch = write_sample_patch(&dir);

    let (stdout, _, success) = run_diffsig(&[patch.to_str().unwrap(), "--output", "json"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["significant_lines"], 2);
    assert_eq!(parsed["files"].as_array().map(|f| f.len()), Some(1));
    assert_eq!(parsed["files"][0]["new_path"], "src/config.rs");
    assert_eq!(parsed["significant"]["added"], 1);
    assert_eq!(parsed["significant"]["deleted"], 1);
}

#[test]
fn test_ignore_flag_drops_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let patch = write_sample_patch(&dir);

    let (stdout, _, success) =
        run_diffsig(&[patch.to_str().unwrap(), "--ignore", "src/config"]);

    assert!(success);
    assert!(stdout.contains("significant lines: 0"));
}

#[test]
fn test_missing_patch_file_fails() {
    let (_, stderr, success) = run_diffsig(&["/nonexistent/changes.patch"]);

    assert!(!success);
    assert!(stderr.contains("failed to read patch file"));
}
