//! Integration tests for toolstow-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use toolstow_core::formats::TarCompression;
use toolstow_core::test_utils::ELF_STUB;
use toolstow_core::test_utils::TarTestBuilder;
use toolstow_core::test_utils::ZipTestBuilder;
use toolstow_core::test_utils::compress;
use toolstow_core::test_utils::write_artifact;

fn toolstow_cmd() -> Command {
    cargo_bin_cmd!("toolstow")
}

fn install_cmd(artifact: &Path, root: &Path, name: &str, version: &str) -> Command {
    let mut cmd = toolstow_cmd();
    cmd.arg("install")
        .arg(artifact)
        .arg("--name")
        .arg(name)
        .arg("--version")
        .arg(version)
        .arg("--root")
        .arg(root);
    cmd
}

fn tool_dir(root: &Path, name: &str, version: &str) -> PathBuf {
    root.join("tools").join(name).join(version)
}

fn sample_zip(temp: &TempDir) -> PathBuf {
    let data = ZipTestBuilder::new()
        .directory("bin/")
        .file_with_mode("bin/foo", ELF_STUB, 0o644)
        .file("README", b"readme")
        .build();
    write_artifact(temp.path(), "foo.zip", &data)
}

#[test]
fn test_version_flag() {
    toolstow_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("toolstow"));
}

#[test]
fn test_help_flag() {
    toolstow_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line utility"));
}

#[test]
fn test_install_help() {
    toolstow_cmd()
        .arg("install")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Install a downloaded artifact"))
        .stdout(predicate::str::contains("--install-path"));
}

#[test]
fn test_install_requires_name_and_version() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let artifact = sample_zip(&temp);

    toolstow_cmd()
        .arg("install")
        .arg(&artifact)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--name"));
}

#[test]
fn test_install_zip_creates_layout() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let artifact = sample_zip(&temp);
    let root = temp.path().join("root");

    install_cmd(&artifact, &root, "foo", "1.0.0")
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed into"));

    let dir = tool_dir(&root, "foo", "1.0.0");
    assert!(dir.join("bin/foo").is_file());
    assert!(dir.join("README").is_file());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(dir.join("bin/foo"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);

        let latest = root.join("tools/foo/latest");
        assert!(latest.symlink_metadata().unwrap().file_type().is_symlink());
    }
}

#[test]
fn test_install_tar_gz_with_install_path() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let tar = TarTestBuilder::new()
        .directory("bin/")
        .file("bin/bar", ELF_STUB)
        .build();
    let artifact = write_artifact(
        temp.path(),
        "bar.tar.gz",
        &compress(&tar, TarCompression::Gzip),
    );
    let custom = temp.path().join("custom");

    install_cmd(&artifact, &temp.path().join("root"), "bar", "2.0")
        .arg("--install-path")
        .arg(&custom)
        .assert()
        .success();

    assert!(custom.join("bin/bar").is_file());
    assert!(!tool_dir(&temp.path().join("root"), "bar", "2.0").exists());
}

#[test]
fn test_install_binary_with_executable_name() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let artifact = write_artifact(temp.path(), "download", ELF_STUB);
    let root = temp.path().join("root");

    install_cmd(&artifact, &root, "baz", "0.3")
        .arg("--executable-name")
        .arg("baz")
        .assert()
        .success();

    assert!(tool_dir(&root, "baz", "0.3").join("bin/baz").is_file());
}

#[test]
fn test_install_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let artifact = sample_zip(&temp);
    let root = temp.path().join("root");

    let output = install_cmd(&artifact, &root, "foo", "1.0.0")
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "install");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["format"], "zip");
    assert_eq!(json["data"]["members_extracted"], 3);
}

#[test]
fn test_install_quiet_prints_nothing() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let artifact = sample_zip(&temp);

    install_cmd(&artifact, &temp.path().join("root"), "foo", "1.0.0")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_install_rejects_traversal() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let tar = TarTestBuilder::new()
        .file("bin/ok", b"fine")
        .raw_file("../evil", b"payload")
        .build();
    let artifact = write_artifact(temp.path(), "evil.tar", &tar);
    let root = temp.path().join("root");

    install_cmd(&artifact, &root, "evil", "1.0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Security violation"))
        .stderr(predicate::str::contains("HINT"));

    assert!(!temp.path().join("root/tools/evil/evil").exists());
    assert!(!tool_dir(&root, "evil", "1.0").join("bin/ok").exists());
}

#[test]
fn test_install_rejects_symlink_escape() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let tar = TarTestBuilder::new().symlink("passwd", "/etc/passwd").build();
    let artifact = write_artifact(
        temp.path(),
        "link.tar.gz",
        &compress(&tar, TarCompression::Gzip),
    );

    install_cmd(&artifact, &temp.path().join("root"), "link", "1.0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("/etc/passwd"));
}

#[test]
fn test_install_missing_artifact() {
    let temp = TempDir::new().expect("failed to create temp dir");

    install_cmd(
        &temp.path().join("missing.zip"),
        &temp.path().join("root"),
        "foo",
        "1.0",
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("Artifact not found"));

    assert!(!temp.path().join("root").exists());
}

#[test]
fn test_install_unsupported_format() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let artifact = write_artifact(temp.path(), "notes.txt", b"plain text");

    install_cmd(&artifact, &temp.path().join("root"), "notes", "1.0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn test_detect_formats() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let zip = sample_zip(&temp);
    let binary = write_artifact(temp.path(), "tool", ELF_STUB);
    let text = write_artifact(temp.path(), "notes.md", b"# notes");

    toolstow_cmd()
        .arg("detect")
        .arg(&zip)
        .assert()
        .success()
        .stdout(predicate::str::contains("zip archive"));

    toolstow_cmd()
        .arg("detect")
        .arg(&binary)
        .assert()
        .success()
        .stdout(predicate::str::contains("single executable"));

    toolstow_cmd()
        .arg("detect")
        .arg(&text)
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown"));
}

#[test]
fn test_detect_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let artifact = write_artifact(temp.path(), "tool.tar.xz", b"not checked");

    let output = toolstow_cmd()
        .arg("detect")
        .arg(&artifact)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "detect");
    assert_eq!(json["data"]["format"], "tar");
}

#[test]
fn test_detect_missing_artifact() {
    toolstow_cmd()
        .arg("detect")
        .arg("/nonexistent/artifact.zip")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Artifact not found"));
}

#[test]
fn test_resolve_default_layout() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let root = temp.path().join("root");
    let expected = tool_dir(&root, "foo", "1.2.3");

    toolstow_cmd()
        .arg("resolve")
        .arg("--name")
        .arg("foo")
        .arg("--version")
        .arg("1.2.3")
        .arg("--root")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));

    assert!(!root.exists());
}

#[test]
fn test_resolve_install_path_override() {
    toolstow_cmd()
        .arg("resolve")
        .arg("--name")
        .arg("foo")
        .arg("--version")
        .arg("1.2.3")
        .arg("--install-path")
        .arg("/opt/foo")
        .assert()
        .success()
        .stdout(predicate::str::contains("/opt/foo"));
}
