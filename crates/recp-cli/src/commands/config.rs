//! `recp config`: read and write configuration values.

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `get` and `list` show the effective values (file + environment); `set`
/// edits only the file.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let path = AppConfig::resolve_path(global.config.as_ref());

    match cmd {
        ConfigCommands::Get { key } => {
            output.emit(&config.get(&key)?)?;
        }

        ConfigCommands::Set { key, value } => {
            let mut file_config = AppConfig::load_file(&path)?;
            file_config.set(&key, &value)?;
            file_config.save(&path)?;
            output.success(&format!("Set {key} = {value}"))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised = toml::to_string_pretty(&config).map_err(|e| CliError::Config {
                message: format!("Failed to serialise config: {e}"),
                source: Some(Box::new(e)),
            })?;
            output.emit(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            output.emit(&path.display().to_string())?;
        }
    }

    Ok(())
}
