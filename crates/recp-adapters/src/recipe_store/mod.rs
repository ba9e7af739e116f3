//! Recipe storage adapters.

mod directory;

pub use directory::{DirectoryRecipeStore, RECIPE_EXTENSION};
