//! CLI integration tests for pmshim.
//!
//! These tests run the real binary against temporary install directories.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the pmshim binary command, isolated from the user's configuration.
fn pmshim(tmp: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pmshim").unwrap();
    cmd.env("PMSHIM_CONFIG", tmp.join("no-config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn touch_all(dir: &Path, names: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    for name in names {
        fs::write(dir.join(name), "#!/bin/sh\n").unwrap();
    }
}

// ============================================================================
// pmshim disable --install-directory
// ============================================================================

#[test]
fn test_disable_all_defaults() {
    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    touch_all(&bin, &["npm", "npx", "pnpm", "pnpx", "yarn", "yarnpkg"]);

    pmshim(tmp.path())
        .arg("disable")
        .arg("--install-directory")
        .arg(&bin)
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed"))
        .stderr(predicate::str::contains("Finished"));

    assert!(bin.join("npm").exists());
    assert!(bin.join("npx").exists());
    for name in ["pnpm", "pnpx", "yarn", "yarnpkg"] {
        assert!(!bin.join(name).exists(), "{name} should be removed");
    }
}

#[test]
fn test_disable_single_manager() {
    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    touch_all(&bin, &["pnpm", "pnpx", "yarn", "yarnpkg"]);

    pmshim(tmp.path())
        .arg("disable")
        .arg("--install-directory")
        .arg(&bin)
        .arg("yarn")
        .assert()
        .success();

    assert!(!bin.join("yarn").exists());
    assert!(!bin.join("yarnpkg").exists());
    assert!(bin.join("pnpm").exists());
    assert!(bin.join("pnpx").exists());
}

#[test]
fn test_disable_is_idempotent() {
    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    touch_all(&bin, &["yarn"]);

    for _ in 0..2 {
        pmshim(tmp.path())
            .arg("disable")
            .arg("--install-directory")
            .arg(&bin)
            .assert()
            .success();
    }

    assert!(!bin.join("yarn").exists());
}

#[test]
fn test_disable_missing_directory_is_a_no_op() {
    let tmp = temp_dir();

    pmshim(tmp.path())
        .arg("disable")
        .arg("--install-directory")
        .arg(tmp.path().join("nowhere"))
        .assert()
        .success();
}

#[test]
fn test_disable_invalid_name_fails_before_removal() {
    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    touch_all(&bin, &["yarn", "pnpm"]);

    pmshim(tmp.path())
        .arg("disable")
        .arg("--install-directory")
        .arg(&bin)
        .args(["yarn", "bun"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid package manager name 'bun'"))
        .stderr(predicate::str::contains("npm, pnpm, yarn"));

    assert!(bin.join("yarn").exists());
    assert!(bin.join("pnpm").exists());
}

#[test]
fn test_disable_reports_failures() {
    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    touch_all(&bin, &["pnpm"]);
    fs::create_dir_all(bin.join("pnpx")).unwrap();

    pmshim(tmp.path())
        .arg("disable")
        .arg("--install-directory")
        .arg(&bin)
        .arg("pnpm")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to remove 1 shim file(s)"))
        .stderr(predicate::str::contains("`pnpx` shim"))
        .stderr(predicate::str::contains("Removed"));

    assert!(!bin.join("pnpm").exists());
}

#[test]
fn test_disable_reports_failures_as_json() {
    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    touch_all(&bin, &["pnpm"]);
    fs::create_dir_all(bin.join("pnpx")).unwrap();

    let pnpx = serde_json::to_string(&bin.join("pnpx")).unwrap();

    pmshim(tmp.path())
        .args(["--message-format", "json", "disable", "pnpm"])
        .arg("--install-directory")
        .arg(&bin)
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""reason":"shim-failed""#))
        .stdout(predicate::str::contains(format!(r#""path":{}"#, pnpx)))
        .stdout(predicate::str::contains(r#""action":"removed""#))
        .stdout(predicate::str::contains(r#""reason":"error""#));

    assert!(!bin.join("pnpm").exists());
}

#[test]
fn test_disable_json_output() {
    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    touch_all(&bin, &["yarn"]);

    pmshim(tmp.path())
        .args(["--message-format", "json", "disable", "yarn"])
        .arg("--install-directory")
        .arg(&bin)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""reason":"shim""#))
        .stdout(predicate::str::contains(r#""action":"removed""#))
        .stdout(predicate::str::contains(r#""reason":"disable-finished""#))
        .stdout(predicate::str::contains(r#""removed":1"#));
}

// ============================================================================
// pmshim disable (directory from PATH)
// ============================================================================

#[cfg(unix)]
#[test]
fn test_disable_finds_directory_on_path() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = temp_dir();
    let bin = tmp.path().join("bin");
    touch_all(&bin, &["pmshim", "yarn", "pnpm"]);
    fs::set_permissions(bin.join("pmshim"), fs::Permissions::from_mode(0o755)).unwrap();

    pmshim(tmp.path())
        .env("PATH", &bin)
        .arg("disable")
        .assert()
        .success();

    assert!(bin.join("pmshim").exists());
    assert!(!bin.join("yarn").exists());
    assert!(!bin.join("pnpm").exists());
}

#[test]
fn test_disable_fails_when_not_on_path() {
    let tmp = temp_dir();
    let empty = tmp.path().join("empty");
    fs::create_dir_all(&empty).unwrap();

    pmshim(tmp.path())
        .env("PATH", &empty)
        .arg("disable")
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find `pmshim` on PATH"))
        .stderr(predicate::str::contains("--install-directory"));
}

// ============================================================================
// Yarn Switch protection
// ============================================================================

#[cfg(unix)]
#[test]
fn test_disable_keeps_yarn_switch_link() {
    let tmp = temp_dir();
    let install = tmp.path().join("opt").join("yarn-switch").join("current");
    touch_all(&install, &["yarn"]);
    let bin = tmp.path().join("bin");
    fs::create_dir_all(&bin).unwrap();
    std::os::unix::fs::symlink(install.join("yarn"), bin.join("yarn")).unwrap();

    pmshim(tmp.path())
        .arg("disable")
        .arg("--install-directory")
        .arg(&bin)
        .arg("yarn")
        .assert()
        .success()
        .stderr(predicate::str::contains("points to a Yarn Switch install - skipping"))
        .stderr(predicate::str::contains("Skipped"))
        .stderr(predicate::str::contains("(Yarn Switch install at "))
        .stderr(predicate::str::contains("1 skipped"));

    assert!(fs::symlink_metadata(bin.join("yarn")).is_ok());
    assert!(install.join("yarn").exists());
}

// ============================================================================
// pmshim completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = temp_dir();

    pmshim(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pmshim"));
}
