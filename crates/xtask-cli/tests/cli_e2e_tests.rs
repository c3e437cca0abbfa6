//! End-to-end tests that run the compiled `x` binary against fixture copies.

use assert_cmd::Command;
use predicates::prelude::*;
use xtask_test_utils::project::TestProject;

fn x() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("x"));
    cmd.env_remove("XTASK_ROOT").env_remove("RUST_LOG");
    cmd
}

fn x_in(project: &TestProject) -> Command {
    let mut cmd = x();
    cmd.arg("--root").arg(project.root());
    cmd
}

#[test]
fn test_help_lists_commands() {
    x().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add-arrow-version"))
        .stdout(predicate::str::contains("check-cargo-toml"))
        .stdout(predicate::str::contains("update-workflows"));
}

#[test]
fn test_missing_command_is_a_usage_error() {
    x().assert().code(2);
}

#[test]
fn test_unknown_flag_is_a_usage_error() {
    x().args(["check", "--everything"]).assert().code(2);
}

#[test]
fn test_check_cargo_toml_reports_first_violation() {
    // The fixture only defines two arrow versions; the compiled list has more.
    let project = TestProject::from_fixture("marrow");

    x_in(&project)
        .arg("check-cargo-toml")
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "Missing feature definition for arrow-51",
        ));
}

#[test]
fn test_update_workflows_writes_both_files() {
    let project = TestProject::from_fixture("marrow");

    x_in(&project).arg("update-workflows").assert().success();

    project.assert_file_contains(".github/workflows/test.yml", "name: Test");
    project.assert_file_contains(
        ".github/workflows/test.yml",
        "cargo check -p marrow --features arrow-37",
    );
    project.assert_file_contains(".github/workflows/release.yml", "cargo publish");
}

#[test]
fn test_add_arrow_version_dry_run_prints_diff() {
    let project = TestProject::from_fixture("marrow");
    let before = project.read("marrow/Cargo.toml");

    x_in(&project)
        .args(["add-arrow-version", "54", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- a/marrow/Cargo.toml"))
        .stdout(predicate::str::contains("+arrow-54 = ["))
        .stdout(predicate::str::contains("files would change"));

    assert_eq!(project.read("marrow/Cargo.toml"), before);
}

#[test]
fn test_add_arrow_version_rejects_invalid_version() {
    let project = TestProject::from_fixture("marrow");

    x_in(&project)
        .args(["add-arrow-version", "5 4", "--dry-run"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid version"));
}

#[test]
fn test_add_arrow_version_refuses_dirty_tree() {
    let project = TestProject::from_fixture("marrow");
    project.init_git();
    project.write("marrow/src/lib.rs", "// local edit\n");

    x_in(&project)
        .args(["add-arrow-version", "54"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("stage or commit"));

    project.assert_file_contains("marrow/src/lib.rs", "// local edit");
}

#[test]
fn test_add_arrow_version_outside_git_fails() {
    let project = TestProject::from_fixture("marrow");

    x_in(&project)
        .args(["add-arrow-version", "54"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_root_must_be_a_directory() {
    let project = TestProject::from_fixture("marrow");

    x().arg("--root")
        .arg(project.path("README.md"))
        .arg("format")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));
}
