//! CI workflow documents.
//!
//! Only the parts of the workflow schema the generated files use are modeled.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ProjectConfig;

/// A workflow file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub name: String,
    pub on: Triggers,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    pub jobs: BTreeMap<String, Job>,
}

/// Events that start a workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Triggers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_dispatch: Option<ManualTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<ReleaseTrigger>,
}

/// Manual dispatch without inputs, serialized as an empty mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualTrigger {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PullRequestTrigger {
    pub branches: Vec<String>,
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseTrigger {
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "runs-on")]
    pub runs_on: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<String>,
    #[serde(
        default,
        rename = "working-directory",
        skip_serializing_if = "Option::is_none"
    )]
    pub working_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
}

impl Step {
    /// A step using a published action.
    pub fn uses(action: &str) -> Self {
        Self {
            uses: Some(action.to_string()),
            ..Self::default()
        }
    }

    /// A named shell step.
    pub fn run(name: &str, run: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            run: Some(run.to_string()),
            ..Self::default()
        }
    }

    /// Run the step in `dir` instead of the repository root.
    pub fn in_dir(mut self, dir: &str) -> Self {
        self.working_directory = Some(dir.to_string());
        self
    }
}

const RUNNER: &str = "ubuntu-latest";
const CHECKOUT: &str = "actions/checkout@v4";

fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn prelude() -> Vec<Step> {
    vec![
        Step::uses(CHECKOUT),
        Step::run("rustc", "rustc --version"),
        Step::run("cargo", "cargo --version"),
    ]
}

/// Format, check, per-feature check, build and test steps.
pub fn check_steps(config: &ProjectConfig) -> Vec<Step> {
    let package = &config.settings.package;

    let mut steps = vec![
        Step::run("Check format", "cargo fmt --check"),
        Step::run("Check", "cargo check"),
    ];
    steps.extend(config.all_features().iter().map(|feature| {
        Step::run(
            &format!("Check {feature}"),
            &format!("cargo check -p {package} --features {feature}"),
        )
    }));
    steps.extend([
        Step::run("Check", "cargo check --all-features"),
        Step::run("Build", "cargo build --all-features"),
        Step::run("Test", "cargo test --all-features"),
    ]);
    steps
}

/// The workflow run for pull requests and on demand.
pub fn test_workflow(config: &ProjectConfig) -> Workflow {
    let mut steps = prelude();
    steps.extend(check_steps(config));

    Workflow {
        name: "Test".to_string(),
        on: Triggers {
            workflow_dispatch: Some(ManualTrigger {}),
            pull_request: Some(PullRequestTrigger {
                branches: strings(&["main", "develop-*"]),
                types: strings(&[
                    "opened",
                    "edited",
                    "reopened",
                    "ready_for_review",
                    "synchronize",
                ]),
            }),
            release: None,
        },
        env: env(&[("CARGO_TERM_COLOR", "always")]),
        jobs: BTreeMap::from([(
            "test".to_string(),
            Job {
                runs_on: RUNNER.to_string(),
                env: BTreeMap::new(),
                steps,
            },
        )]),
    }
}

/// The workflow run when a release is published: checks, then publish.
pub fn release_workflow(config: &ProjectConfig) -> Workflow {
    let mut steps = prelude();
    steps.extend(check_steps(config));
    steps.push(Step::run("Publish to crates.io", "cargo publish").in_dir(&config.settings.package));

    Workflow {
        name: "Release".to_string(),
        on: Triggers {
            release: Some(ReleaseTrigger {
                types: strings(&["published"]),
            }),
            ..Triggers::default()
        },
        env: env(&[("CARGO_TERM_COLOR", "always")]),
        jobs: BTreeMap::from([(
            "release".to_string(),
            Job {
                runs_on: RUNNER.to_string(),
                env: env(&[(
                    "CARGO_REGISTRY_TOKEN",
                    "${{ secrets.CARGO_REGISTRY_TOKEN }}",
                )]),
                steps,
            },
        )]),
    }
}
