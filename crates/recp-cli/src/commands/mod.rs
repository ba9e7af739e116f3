//! Command handlers. One module per subcommand.

pub mod add;
pub mod completions;
pub mod config;
pub mod expand;
pub mod init;
pub mod list;
pub mod transformations;

use recp_adapters::DirectoryRecipeStore;
use recp_core::application::RecipeService;

use crate::config::AppConfig;

/// Recipe service over the configured recipes folder.
pub(crate) fn recipe_service(config: &AppConfig) -> RecipeService {
    RecipeService::new(Box::new(DirectoryRecipeStore::new(&config.recipes.dir)))
}
