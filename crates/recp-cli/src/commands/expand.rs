//! `recp expand`: turn a recipe into shell commands.

use tracing::{debug, instrument};

use recp_adapters::{LocalFileEnumerator, SystemClock};
use recp_core::application::ExpansionService;

use crate::{
    cli::{ExpandArgs, ExpandFormat, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Expand the named recipe and print one command per line.
#[instrument(skip_all, fields(recipe = %args.recipe))]
pub fn execute(args: ExpandArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let recipe = super::recipe_service(&config).get(&args.recipe)?;

    let mode = args
        .mode
        .map(Into::into)
        .unwrap_or(config.expansion.dir_files_mode);
    debug!(%mode, steps = recipe.steps.len(), "Expanding recipe");

    let service = ExpansionService::new(Box::new(LocalFileEnumerator::new()), Box::new(SystemClock))
        .with_dir_files_mode(mode);
    let commands = service.expand_recipe(&recipe, &args.set)?;

    match resolve_format(args.format, output.format()) {
        ExpandFormat::Json => output.json(&commands)?,
        ExpandFormat::Plain => {
            for command in &commands {
                output.emit(command)?;
            }
        }
    }

    Ok(())
}

/// `--format` wins; otherwise JSON only when the global output format is JSON.
fn resolve_format(requested: Option<ExpandFormat>, global: OutputFormat) -> ExpandFormat {
    requested.unwrap_or(match global {
        OutputFormat::Json => ExpandFormat::Json,
        _ => ExpandFormat::Plain,
    })
}
