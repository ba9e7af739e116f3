//! Driven (output) ports - implemented by infrastructure.
//!
//! The `recp-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::domain::{FileQuery, FileSet, Recipe, RecipeSummary};
use crate::error::RecpResult;

/// Port for file enumeration.
///
/// Implemented by:
/// - `recp_adapters::enumerator::LocalFileEnumerator` (production)
/// - `recp_adapters::enumerator::MemoryFileEnumerator` (testing)
///
/// ## Contract
///
/// - Every directory in the query is checked before any listing;
///   a missing one fails with `ApplicationError::DirectoryNotFound`
/// - Names starting with `.` are skipped, and hidden directories are not entered
/// - Only regular files are returned
/// - Results are ordered by `query.sort`
/// - Duplicates from overlapping extension filters are kept
#[cfg_attr(test, mockall::automock)]
pub trait FileEnumerator: Send + Sync {
    fn enumerate(&self, query: &FileQuery) -> RecpResult<FileSet>;
}

/// Port for reading the local wall clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Port for recipe storage and retrieval.
///
/// Implemented by:
/// - `recp_adapters::recipe_store::DirectoryRecipeStore`
pub trait RecipeStore: Send + Sync {
    /// List installed recipes, sorted by name.
    fn list(&self) -> RecpResult<Vec<RecipeSummary>>;

    /// Load a recipe by installed name or by path.
    fn get(&self, name: &str) -> RecpResult<Recipe>;

    /// Install the recipe file at `source`. Returns the installed path.
    fn add(&self, source: &Path) -> RecpResult<PathBuf>;
}
