//! CLI integration tests for preqs.
//!
//! These tests drive the binary end to end. Runs that need a Python
//! environment use a fake `site-packages` directory and, on Unix, a fake
//! interpreter that prints a canned probe result.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the preqs binary command, isolated from the user's config.
fn preqs(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("preqs").unwrap();
    cmd.env("HOME", home).env_remove("PREQS_PYTHON");
    cmd
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// A site-packages directory holding the given distributions.
fn site_packages(root: &Path, dists: &[(&str, &str)]) -> PathBuf {
    let dir = root.join("site-packages");
    for (name, version) in dists {
        write(
            &dir,
            &format!("{}-{}.dist-info/METADATA", name, version),
            &format!("Metadata-Version: 2.1\nName: {}\nVersion: {}\n\n", name, version),
        );
    }
    dir
}

/// A shell script standing in for `python3`: whatever it is asked to run,
/// it prints a probe result naming `site` as its only search path.
#[cfg(unix)]
fn fake_python(root: &Path, site: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let json = format!(
        r#"{{"version": "3.12.1", "stdlib": ["json", "os", "sys"], "path": ["{}"]}}"#,
        site.display()
    );
    let script = write(
        root,
        "bin/python3",
        &format!("#!/bin/sh\ncat <<'EOF'\n{}\nEOF\n", json),
    );
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

// ============================================================================
// generate
// ============================================================================

#[test]
fn test_existing_manifest_without_replace() {
    let tmp = temp_dir();
    let project = tmp.path().join("proj");
    write(&project, "main.py", "import requests\n");
    let manifest = write(&project, "requirements.txt", "requests==1.0.0\n");

    preqs(tmp.path())
        .arg(&project)
        .assert()
        .code(10)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(manifest).unwrap(), "requests==1.0.0\n");
}

#[test]
fn test_no_modules_found() {
    let tmp = temp_dir();
    let project = tmp.path().join("proj");
    write(&project, "README.md", "# nothing here\n");
    write(&project, "tests/test_main.py", "import pytest\n");

    preqs(tmp.path())
        .arg(&project)
        .assert()
        .code(20)
        .stderr(predicate::str::contains("no Python modules found"));
}

#[test]
fn test_no_imports_found() {
    let tmp = temp_dir();
    let project = tmp.path().join("proj");
    write(&project, "main.py", "print('hello')\n");

    preqs(tmp.path())
        .arg(&project)
        .assert()
        .code(30)
        .stderr(predicate::str::contains("no imports found"));

    assert!(!project.join("requirements.txt").exists());
}

#[test]
fn test_ignore_dirs_flag() {
    let tmp = temp_dir();
    let project = tmp.path().join("proj");
    write(&project, "vendor/lib.py", "import requests\n");

    preqs(tmp.path())
        .arg(&project)
        .args(["--ignore-dirs", "vendor"])
        .assert()
        .code(20);
}

#[test]
fn test_parent_dir_in_path_rejected() {
    let tmp = temp_dir();

    preqs(tmp.path())
        .arg("../somewhere")
        .current_dir(tmp.path())
        .assert()
        .code(100)
        .stderr(predicate::str::contains("invalid path"));
}

#[test]
fn test_syntax_error_aborts() {
    let tmp = temp_dir();
    let project = tmp.path().join("proj");
    write(&project, "broken.py", "def broken(:\n    pass\n");

    preqs(tmp.path())
        .arg(&project)
        .assert()
        .code(255)
        .stderr(predicate::str::contains("broken.py"))
        .stderr(predicate::str::contains("processing aborted"));

    assert!(!project.join("requirements.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_generate_writes_manifest() {
    let tmp = temp_dir();
    let project = tmp.path().join("proj");
    write(
        &project,
        "main.py",
        "import os\nimport requests\nimport mypkg.sub\nimport numpy\n",
    );
    write(&project, "mypkg/__init__.py", "");
    write(&project, "mypkg/sub.py", "import json\n");
    let site = site_packages(tmp.path(), &[("requests", "2.31.0")]);
    let python = fake_python(tmp.path(), &site);

    preqs(tmp.path())
        .arg(&project)
        .arg("--python")
        .arg(&python)
        .assert()
        .success()
        .stderr(predicate::str::contains("has been written"));

    let written = fs::read_to_string(project.join("requirements.txt")).unwrap();
    assert!(written.starts_with("requests==2.31.0\n\n# Generated by: preqs v"));
    assert!(!written.contains("numpy"));
    assert!(!written.contains("mypkg"));
}

#[cfg(unix)]
#[test]
fn test_print_mode() {
    let tmp = temp_dir();
    let project = tmp.path().join("proj");
    write(&project, "main.py", "import requests\nimport numpy\n");
    let site = site_packages(tmp.path(), &[("requests", "2.31.0")]);
    let python = fake_python(tmp.path(), &site);

    preqs(tmp.path())
        .arg(&project)
        .arg("--print")
        .env("PREQS_PYTHON", &python)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "The following requirements were captured:",
        ))
        .stdout(predicate::str::contains("Unknown or not installed"))
        .stdout(predicate::str::contains("2.31.0"));

    assert!(!project.join("requirements.txt").exists());
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_missing_file() {
    let tmp = temp_dir();
    let project = tmp.path().join("proj");
    fs::create_dir_all(&project).unwrap();

    preqs(tmp.path())
        .arg(&project)
        .arg("--check")
        .assert()
        .code(201)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_check_not_a_requirements_file() {
    let tmp = temp_dir();
    let other = write(tmp.path(), "proj/deps.txt", "six==1.17.0\n");

    preqs(tmp.path())
        .arg(&other)
        .arg("--check")
        .assert()
        .code(202)
        .stderr(predicate::str::contains("requirements.txt"));
}

#[test]
fn test_check_against_configured_site_packages() {
    let tmp = temp_dir();
    let project = tmp.path().join("proj");
    site_packages(&project, &[("six", "1.17.0"), ("requests", "2.32.3")]);
    write(&project, ".preqs.toml", "[python]\nsite_packages = [\"site-packages\"]\n");
    write(
        &project,
        "requirements.txt",
        "six==1.17.0\nrequests==2.31.0\nnumpy==1.26.4\n\n# Generated by: preqs v0.1.0\n",
    );

    preqs(tmp.path())
        .arg(&project)
        .arg("--check")
        .arg("--python")
        .arg("/no/such/python")
        .assert()
        .success()
        .stdout(predicate::str::contains("Requirement"))
        .stdout(predicate::str::is_match(r"six\s+1\.17\.0\s+1\.17\.0\s+Same").unwrap())
        .stdout(predicate::str::is_match(r"requests\s+2\.31\.0\s+2\.32\.3\s+Newer").unwrap())
        .stdout(predicate::str::is_match(r"numpy\s+1\.26\.4\s+n/a\s+Not installed").unwrap());
}

// ============================================================================
// misc
// ============================================================================

#[test]
fn test_version() {
    let tmp = temp_dir();

    preqs(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("preqs"));
}
