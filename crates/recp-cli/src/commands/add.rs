//! `recp add`: install a recipe file.

use tracing::instrument;

use crate::{
    cli::AddArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn execute(args: AddArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let installed = super::recipe_service(&config).add(&args.file)?;

    output.success(&format!("Recipe installed at {}", installed.display()))?;
    Ok(())
}
