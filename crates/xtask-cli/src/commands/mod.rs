//! Command implementations for xtask-cli

pub mod version;

use xtask_core::{ProjectConfig, SystemRunner, Tasks};
use xtask_fs::NormalizedPath;

use crate::cli::Commands;
use crate::error::Result;

pub use version::run_add_arrow_version;

/// Load the project at `root` and run `command` against it.
pub fn execute(root: NormalizedPath, command: Commands) -> Result<()> {
    let config = ProjectConfig::load(root)?;
    let mut tasks = Tasks::new(config, SystemRunner);

    match command {
        Commands::Precommit { backtrace } => tasks.precommit(backtrace)?,
        Commands::UpdateWorkflows => {
            tasks.update_workflows()?;
        }
        Commands::Format => tasks.format()?,
        Commands::Check { all } => tasks.check(all)?,
        Commands::Test {
            test_name,
            backtrace,
            full,
        } => tasks.test(test_name.as_deref(), backtrace, full)?,
        Commands::Doc { private, open } => tasks.doc(private, open)?,
        Commands::CheckCargoToml => tasks.check_cargo_toml()?,
        Commands::AddArrowVersion { version, dry_run } => {
            run_add_arrow_version(&mut tasks, &version, dry_run)?
        }
    }
    Ok(())
}
