//! `recp init`: create a default configuration file and recipes folder.

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Write the effective configuration (defaults plus `RECP_*` overrides) to
/// the active config path.
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    output.info("Initialising configuration...")?;

    let config_path = AppConfig::resolve_path(global.config.as_ref());

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    config.save(&config_path)?;

    let recipes_dir = &config.recipes.dir;
    std::fs::create_dir_all(recipes_dir)
        .with_cli_context(|| format!("Failed to create recipes folder '{}'", recipes_dir.display()))?;

    output.success(&format!("Configuration created at {}", config_path.display()))?;
    output.info(&format!("Recipes folder: {}", recipes_dir.display()))?;

    Ok(())
}
