//! External command execution.
//!
//! Tasks describe commands as [`CommandSpec`] values and hand them to a
//! [`CommandRunner`]. [`SystemRunner`] spawns real processes with inherited
//! stdio; [`RecordingRunner`] only records what would have been run.

use std::cell::RefCell;
use std::fmt;
use std::process::Command;

use xtask_fs::NormalizedPath;

use crate::{Error, Result};

/// A command line with its environment additions and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub current_dir: Option<NormalizedPath>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            current_dir: None,
        }
    }

    pub fn cargo() -> Self {
        Self::new("cargo")
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable on top of the inherited environment.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn current_dir(mut self, dir: NormalizedPath) -> Self {
        self.current_dir = Some(dir);
        self
    }

    /// The program and its arguments, shell-quoted.
    pub fn command_line(&self) -> String {
        shell_words::join(std::iter::once(&self.program).chain(&self.args))
    }
}

impl fmt::Display for CommandSpec {
    /// Renders as a shell line, environment assignments first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{}={} ", key, shell_words::quote(value))?;
        }
        f.write_str(&self.command_line())
    }
}

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands synchronously.
pub trait CommandRunner {
    /// Run `command` to completion.
    ///
    /// A nonzero exit is reported in the output, not as an error. Errors are
    /// reserved for commands that could not be started.
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput>;
}

/// Spawns real processes, inheriting stdin, stdout and stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .envs(command.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir.to_native());
        }

        let status = cmd.status().map_err(|source| Error::Spawn {
            program: command.program.clone(),
            source,
        })?;

        Ok(CommandOutput {
            code: status.code(),
        })
    }
}

/// Records commands instead of running them.
///
/// Every command succeeds unless its rendered line contains a pattern
/// registered with [`RecordingRunner::failing_on`].
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: RefCell<Vec<CommandSpec>>,
    failures: Vec<(String, Option<i32>)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make commands whose line contains `pattern` exit with `code`.
    ///
    /// `None` simulates termination by a signal.
    pub fn failing_on(mut self, pattern: impl Into<String>, code: Option<i32>) -> Self {
        self.failures.push((pattern.into(), code));
        self
    }

    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands.borrow().clone()
    }

    /// Recorded commands rendered as shell lines.
    pub fn lines(&self) -> Vec<String> {
        self.commands.borrow().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        self.commands.borrow_mut().push(command.clone());

        let line = command.to_string();
        let failure = self
            .failures
            .iter()
            .find(|(pattern, _)| line.contains(pattern.as_str()));
        Ok(match failure {
            Some((_, code)) => CommandOutput { code: *code },
            None => CommandOutput::success(),
        })
    }
}
