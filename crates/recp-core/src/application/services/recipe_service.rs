//! Recipe Service - recipe management operations.
//!
//! Separated from ExpansionService: listing and installing recipes never
//! touches the transformation pipeline.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
    application::ports::RecipeStore,
    domain::{Recipe, RecipeSummary},
    error::RecpResult,
};

/// Service for recipe operations.
pub struct RecipeService {
    store: Box<dyn RecipeStore>,
}

impl RecipeService {
    pub fn new(store: Box<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// List installed recipes.
    pub fn list(&self) -> RecpResult<Vec<RecipeSummary>> {
        self.store.list()
    }

    /// Load a recipe by name or path, validated.
    pub fn get(&self, name: &str) -> RecpResult<Recipe> {
        let recipe = self.store.get(name)?;
        recipe.validate()?;
        Ok(recipe)
    }

    /// Install a recipe file.
    pub fn add(&self, source: &Path) -> RecpResult<PathBuf> {
        let installed = self.store.add(source)?;
        info!(path = %installed.display(), "Recipe installed");
        Ok(installed)
    }
}
