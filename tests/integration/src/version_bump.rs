//! Version bumps across a real git repository.
//!
//! Each test copies the marrow fixture, commits it, and drives the tasks
//! with a recording runner so no cargo process is spawned.

use pretty_assertions::assert_eq;
use xtask_core::{ProjectConfig, RecordingRunner, Settings, Tasks};
use xtask_fs::NormalizedPath;
use xtask_git::{GitWorkingTree, WorkingTree};
use xtask_manifest::{CargoManifest, VersionList, validate};
use xtask_markers::DEFAULT_TAG;
use xtask_test_utils::git::commit_all;
use xtask_test_utils::project::TestProject;

const VERSION_LIST: &str = "crates/xtask-core/src/config.rs";

fn committed_fixture() -> TestProject {
    let project = TestProject::from_fixture("marrow");
    project.write(
        VERSION_LIST,
        &format!(
            "pub const ARROW_VERSIONS: &[&str] = &[\n    // {DEFAULT_TAG}:insert:     \"{{version}}\",\n    \"53\",\n    \"52\",\n];\n"
        ),
    );
    project.init_git();
    project
}

fn tasks(project: &TestProject) -> Tasks<RecordingRunner> {
    let root = NormalizedPath::canonicalize(project.root()).unwrap();
    let settings = Settings::load(&root).unwrap();
    let config = ProjectConfig::new(
        root,
        settings,
        VersionList::new("arrow", ["53", "52"]),
        VersionList::new("arrow2", ["0-17", "0-16"]),
    );
    Tasks::new(config, RecordingRunner::new())
}

fn open_tree(project: &TestProject) -> GitWorkingTree {
    GitWorkingTree::open(&NormalizedPath::canonicalize(project.root()).unwrap()).unwrap()
}

#[test]
fn test_bump_leaves_a_conforming_manifest() {
    let project = committed_fixture();
    let mut tasks = tasks(&project);

    let report = tasks.add_arrow_version("54", &open_tree(&project)).unwrap();
    assert_eq!(report.files.len(), 6);

    let manifest = CargoManifest::load(&tasks.config().manifest_path()).unwrap();
    validate(&manifest, &tasks.config().convention()).unwrap();
    assert_eq!(
        manifest.docs_rs_features().unwrap(),
        &["serde".to_string(), "arrow2-0-17".into(), "arrow-54".into()][..]
    );
    assert!(manifest.dependencies.contains_key("arrow-schema-54"));
}

#[test]
fn test_bump_extends_the_compiled_version_list() {
    let project = committed_fixture();
    let mut tasks = tasks(&project);

    tasks.add_arrow_version("54", &open_tree(&project)).unwrap();

    let list = project.read(VERSION_LIST);
    let versions: Vec<&str> = list
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('"'))
        .collect();
    assert_eq!(versions, vec!["\"54\",", "\"53\",", "\"52\","]);
}

#[test]
fn test_uncommitted_bump_blocks_the_next_one() {
    let project = committed_fixture();
    let mut tasks = tasks(&project);

    tasks.add_arrow_version("54", &open_tree(&project)).unwrap();
    let tree = open_tree(&project);
    assert!(tree.has_unstaged_changes().unwrap());

    let err = tasks.add_arrow_version("55", &tree).unwrap_err();
    assert_eq!(err.exit_code(), 3);
    assert!(!project.read("marrow/Cargo.toml").contains("arrow-55"));

    commit_all(project.root(), "Add arrow 54");
    tasks.add_arrow_version("55", &open_tree(&project)).unwrap();

    let manifest = CargoManifest::load(&tasks.config().manifest_path()).unwrap();
    validate(&manifest, &tasks.config().convention()).unwrap();
    assert_eq!(
        tasks.config().arrow.versions(),
        &["55".to_string(), "54".into(), "53".into(), "52".into()][..]
    );
}

#[test]
fn test_untracked_files_do_not_block_a_bump() {
    let project = committed_fixture();
    project.write("notes.txt", "scratch\n");
    let mut tasks = tasks(&project);

    tasks.add_arrow_version("54", &open_tree(&project)).unwrap();
    project.assert_file_contains("marrow/src/lib.rs", "\"54\"");
}

#[test]
fn test_preview_matches_the_applied_bump() {
    let project = committed_fixture();
    let mut tasks = tasks(&project);

    let preview = tasks.preview_arrow_version("54").unwrap();
    let applied = tasks.add_arrow_version("54", &open_tree(&project)).unwrap();

    assert_eq!(preview.files, applied.files);
    assert_eq!(preview.diffs.len(), applied.files.len());
}
