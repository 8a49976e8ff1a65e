//! End-to-end tests for `plugbridge build` and `plugbridge init`.
//!
//! Build tests use registry-only manifests so the pip resolver is never
//! invoked and the suite stays offline.

use std::fs::{self, File};
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_config(dir: &Path) {
    fs::write(
        dir.join("plugbridge.toml"),
        r#"version = 2

[package]
name = "demo"
version = "0.1.0"

[paths]
source_root = "src"
installed_root = "installed"
dist_dir = "dist"
"#,
    )
    .unwrap();
}

fn plugbridge(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("plugbridge").expect("binary under test");
    cmd.current_dir(dir);
    cmd
}

fn entry_names(archive_path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(File::open(archive_path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    names
}

#[test]
fn build_produces_the_versioned_archive() {
    let project = TempDir::new().unwrap();
    write_config(project.path());
    fs::create_dir_all(project.path().join("src").join("ui")).unwrap();
    fs::write(project.path().join("src").join("plugin.py"), "entry\n").unwrap();
    fs::write(project.path().join("src").join("ui").join("panel.py"), "p\n").unwrap();
    fs::write(
        project.path().join("src").join("requirements.txt"),
        "requests==2.31.0\n",
    )
    .unwrap();

    plugbridge(project.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Built demo 0.1.0"))
        .stdout(predicate::str::contains("1 registry-installed, 0 vendored"));

    let archive = project.path().join("dist").join("demo-0.1.0.zip");
    assert!(archive.exists());
    assert_eq!(
        entry_names(&archive),
        vec![
            "demo-0.1.0/plugin.py",
            "demo-0.1.0/requirements.txt",
            "demo-0.1.0/requirements_registry.txt",
            "demo-0.1.0/requirements_vcs.txt",
            "demo-0.1.0/ui/panel.py",
        ]
    );
}

#[test]
fn rebuilding_replaces_the_archive() {
    let project = TempDir::new().unwrap();
    write_config(project.path());
    fs::create_dir_all(project.path().join("src")).unwrap();
    fs::write(project.path().join("src").join("plugin.py"), "v1\n").unwrap();
    fs::write(project.path().join("src").join("extra.py"), "tmp\n").unwrap();

    plugbridge(project.path()).arg("build").assert().success();
    fs::remove_file(project.path().join("src").join("extra.py")).unwrap();
    plugbridge(project.path()).arg("build").assert().success();

    let archive = project.path().join("dist").join("demo-0.1.0.zip");
    assert_eq!(
        entry_names(&archive),
        vec![
            "demo-0.1.0/plugin.py",
            "demo-0.1.0/requirements_registry.txt",
            "demo-0.1.0/requirements_vcs.txt",
        ],
        "entries from the first build must not survive"
    );
}

#[test]
fn build_without_package_identity_exits_nonzero() {
    let project = TempDir::new().unwrap();
    fs::create_dir_all(project.path().join("src")).unwrap();
    fs::write(
        project.path().join("plugbridge.toml"),
        "version = 2\n\n[paths]\nsource_root = \"src\"\ndist_dir = \"dist\"\n",
    )
    .unwrap();

    plugbridge(project.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("package.name"));
    assert!(!project.path().join("dist").exists());
}

#[test]
fn init_scaffolds_and_refuses_to_overwrite() {
    let project = TempDir::new().unwrap();

    plugbridge(project.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote plugbridge.toml"));
    let scaffolded = fs::read_to_string(project.path().join("plugbridge.toml")).unwrap();
    assert!(scaffolded.contains("version = 2"));
    assert!(scaffolded.contains("[package]"));

    // Second run leaves the file alone.
    fs::write(project.path().join("plugbridge.toml"), "version = 2\n").unwrap();
    plugbridge(project.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(
        fs::read_to_string(project.path().join("plugbridge.toml")).unwrap(),
        "version = 2\n"
    );
}
