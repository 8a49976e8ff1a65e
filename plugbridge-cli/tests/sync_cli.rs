//! End-to-end tests for `plugbridge sync` against the compiled binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_config(dir: &Path) {
    fs::write(
        dir.join("plugbridge.toml"),
        r#"version = 2

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

#[test]
fn sync_applies_plan_and_reports_counts() {
    let project = TempDir::new().unwrap();
    write_config(project.path());
    fs::create_dir_all(project.path().join("src")).unwrap();
    fs::create_dir_all(project.path().join("installed")).unwrap();
    fs::write(project.path().join("src").join("a.py"), "x = 1\n").unwrap();
    fs::write(project.path().join("installed").join("a.py"), "x = 2\n").unwrap();
    fs::write(project.path().join("installed").join("orphan.py"), "old\n").unwrap();

    plugbridge(project.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 file(s) to copy:"))
        .stdout(predicate::str::contains("1 file(s) to delete:"))
        .stdout(predicate::str::contains("0 added, 1 copied, 1 deleted."));

    assert_eq!(
        fs::read_to_string(project.path().join("installed").join("a.py")).unwrap(),
        "x = 1\n"
    );
    assert!(!project.path().join("installed").join("orphan.py").exists());
}

#[test]
fn second_sync_has_nothing_to_do() {
    let project = TempDir::new().unwrap();
    write_config(project.path());
    fs::create_dir_all(project.path().join("src")).unwrap();
    fs::write(project.path().join("src").join("a.py"), "x\n").unwrap();

    plugbridge(project.path()).arg("sync").assert().success();
    plugbridge(project.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to sync."));
}

#[test]
fn dry_run_reports_but_writes_nothing() {
    let project = TempDir::new().unwrap();
    write_config(project.path());
    fs::create_dir_all(project.path().join("src")).unwrap();
    fs::write(project.path().join("src").join("a.py"), "x\n").unwrap();

    plugbridge(project.path())
        .arg("sync")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run] 1 file(s) to add:"))
        .stdout(predicate::str::contains("a.py"));

    assert!(
        !project.path().join("installed").exists(),
        "dry-run must not create files"
    );
}

#[test]
fn json_dry_run_emits_the_plan() {
    let project = TempDir::new().unwrap();
    write_config(project.path());
    fs::create_dir_all(project.path().join("src")).unwrap();
    fs::write(project.path().join("src").join("a.py"), "x\n").unwrap();

    let output = plugbridge(project.path())
        .arg("sync")
        .arg("--dry-run")
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(plan["add"].as_array().unwrap().len(), 1);
    assert_eq!(plan["add"][0]["relative"], "a.py");
    assert!(plan["copy"].as_array().unwrap().is_empty());
    assert!(plan["delete"].as_array().unwrap().is_empty());
}

#[test]
fn missing_config_exits_nonzero() {
    let project = TempDir::new().unwrap();
    plugbridge(project.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("plugbridge.toml"));
}

#[test]
fn unset_required_path_exits_nonzero() {
    let project = TempDir::new().unwrap();
    fs::create_dir_all(project.path().join("src")).unwrap();
    fs::write(
        project.path().join("plugbridge.toml"),
        "version = 2\n\n[paths]\nsource_root = \"src\"\n",
    )
    .unwrap();

    plugbridge(project.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("paths.installed_root"));
}

#[test]
fn diff_shows_pending_overwrite() {
    let project = TempDir::new().unwrap();
    write_config(project.path());
    fs::create_dir_all(project.path().join("src")).unwrap();
    fs::create_dir_all(project.path().join("installed")).unwrap();
    fs::write(project.path().join("src").join("a.py"), "x = 1\n").unwrap();
    fs::write(project.path().join("installed").join("a.py"), "x = 2\n").unwrap();

    plugbridge(project.path())
        .arg("diff")
        .assert()
        .success()
        .stdout(predicate::str::contains("--- a/a.py"))
        .stdout(predicate::str::contains("+++ b/a.py"))
        .stdout(predicate::str::contains("+x = 1"));
}
