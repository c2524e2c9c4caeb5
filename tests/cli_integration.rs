/*!
 * Integration tests for the paper-export binary
 */

use std::process::Command;

use tempfile::tempdir;

fn paper_export() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_paper-export"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_missing_token_aborts_before_network() {
    let temp_dir = tempdir().unwrap();
    let output_dir = temp_dir.path().join("out");

    let output = paper_export()
        .env_remove("DROPBOX_ACCESS_TOKEN")
        .arg("--output-dir")
        .arg(&output_dir)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DROPBOX_ACCESS_TOKEN is not set"));

    // Nothing was listed, exported or written
    assert!(String::from_utf8_lossy(&output.stdout).is_empty());
    assert!(!output_dir.exists());
}

#[test]
fn test_fatal_error_shown_with_logging_off() {
    let temp_dir = tempdir().unwrap();

    for filter in ["off", "paper_export=off"] {
        let output = paper_export()
            .env("RUST_LOG", filter)
            .env_remove("DROPBOX_ACCESS_TOKEN")
            .arg("--output-dir")
            .arg(temp_dir.path().join("out"))
            .output()
            .unwrap();

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("Error: DROPBOX_ACCESS_TOKEN is not set"),
            "RUST_LOG={} hid the error: {:?}",
            filter,
            stderr
        );
    }
}

#[test]
fn test_blank_token_is_missing() {
    let temp_dir = tempdir().unwrap();

    let output = paper_export()
        .env("DROPBOX_ACCESS_TOKEN", "  ")
        .arg("--output-dir")
        .arg(temp_dir.path().join("out"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("DROPBOX_ACCESS_TOKEN is not set"));
}

#[test]
fn test_invalid_source_folder_rejected() {
    let output = paper_export()
        .env("DROPBOX_ACCESS_TOKEN", "sl.unused")
        .args(["--source-folder", "relative/folder"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Configuration error"));
}

#[test]
fn test_help_lists_flags() {
    let output = paper_export().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--debug"));
    assert!(stdout.contains("--source-folder"));
    assert!(stdout.contains("--output-dir"));
    assert!(stdout.contains("--format"));
}

#[test]
fn test_generate_completions() {
    let output = paper_export().args(["--generate", "bash"]).output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("paper-export"));
}
