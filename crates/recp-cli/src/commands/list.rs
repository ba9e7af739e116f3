//! Implementation of the `recp list` command.

use serde::Serialize;

use recp_core::domain::RecipeSummary;

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// JSON shape of one installed recipe.
#[derive(Debug, Serialize)]
struct RecipeRow {
    name: String,
    description: Option<String>,
    path: String,
}

impl From<RecipeSummary> for RecipeRow {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            name: summary.name,
            description: summary.description,
            path: summary.path.display().to_string(),
        }
    }
}

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let recipes = super::recipe_service(&config).list()?;

    match args.format {
        ListFormat::Table => {
            if recipes.is_empty() {
                output.info(&format!(
                    "No recipes installed in {}",
                    config.recipes.dir.display()
                ))?;
                return Ok(());
            }
            let width = recipes.iter().map(|r| r.name.len()).max().unwrap_or(0);
            output.header("Installed Recipes:")?;
            for recipe in &recipes {
                output.emit(&format!(
                    "  {:<width$}  {}",
                    recipe.name,
                    recipe.description.as_deref().unwrap_or("-"),
                ))?;
            }
        }

        ListFormat::List => {
            for recipe in &recipes {
                output.emit(&recipe.name)?;
            }
        }

        ListFormat::Json => {
            let rows: Vec<RecipeRow> = recipes.into_iter().map(RecipeRow::from).collect();
            output.json(&rows)?;
        }
    }

    Ok(())
}
