//! Recipes stored as `.yaml` files in one folder.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};

use recp_core::{
    application::{
        ApplicationError,
        ports::{FileEnumerator, RecipeStore},
    },
    domain::{DomainError, FileQuery, Recipe, RecipeSummary},
    error::{Context, RecpResult},
};

use crate::{enumerator::LocalFileEnumerator, recipe_loader::RecipeLoader};

/// Extension of installable recipe files.
pub const RECIPE_EXTENSION: &str = ".yaml";

/// Folder-backed recipe store.
///
/// `<dir>/<name>.yaml` is the recipe called `name`. Listing does not descend
/// into subfolders.
#[derive(Debug, Clone)]
pub struct DirectoryRecipeStore {
    dir: PathBuf,
    enumerator: LocalFileEnumerator,
}

impl DirectoryRecipeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            enumerator: LocalFileEnumerator::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Installed location of the recipe called `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}{RECIPE_EXTENSION}"))
    }

    /// An existing file path wins over an installed name.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let direct = Path::new(name);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }
        let installed = self.path_for(name);
        installed.is_file().then_some(installed)
    }
}

impl RecipeStore for DirectoryRecipeStore {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn list(&self) -> RecpResult<Vec<RecipeSummary>> {
        if !self.dir.is_dir() {
            debug!("Recipes folder does not exist yet");
            return Ok(Vec::new());
        }

        let query = FileQuery::new(&self.dir)
            .extensions([RECIPE_EXTENSION])
            .recursive(false);
        let files = self.enumerator.enumerate(&query)?;

        let mut summaries = Vec::with_capacity(files.len());
        for path in files.iter() {
            match RecipeLoader::load_file(path) {
                Ok(recipe) => summaries.push(RecipeSummary {
                    name: recipe.name,
                    description: recipe.description,
                    path: path.to_path_buf(),
                }),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping invalid recipe");
                }
            }
        }

        Ok(summaries)
    }

    #[instrument(skip(self))]
    fn get(&self, name: &str) -> RecpResult<Recipe> {
        let path = self
            .resolve(name)
            .ok_or_else(|| ApplicationError::RecipeNotFound {
                name: name.to_string(),
            })?;
        debug!(path = %path.display(), "Resolved recipe");
        Ok(RecipeLoader::load_file(&path)?)
    }

    #[instrument(skip_all, fields(source = %source.display()))]
    fn add(&self, source: &Path) -> RecpResult<PathBuf> {
        if !source.is_file() {
            return Err(ApplicationError::RecipeNotFound {
                name: source.display().to_string(),
            }
            .into());
        }

        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !file_name.ends_with(RECIPE_EXTENSION) {
            return Err(DomainError::InvalidRecipe {
                name: file_name,
                reason: format!("only {RECIPE_EXTENSION} files can be added as recipes"),
            }
            .into());
        }

        // Refuse to install something that would not load.
        RecipeLoader::load_file(source)?;

        fs::create_dir_all(&self.dir).fs_context(&self.dir, "create recipes folder")?;
        let target = self.dir.join(&file_name);
        fs::copy(source, &target).fs_context(&target, "copy recipe")?;

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ECHO: &str = "description: Say hello\nsteps:\n  - command: echo hello\n";

    fn store_with(recipes: &[(&str, &str)]) -> (TempDir, DirectoryRecipeStore) {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("recipes");
        fs::create_dir_all(&dir).unwrap();
        for (file, body) in recipes {
            fs::write(dir.join(file), body).unwrap();
        }
        (temp, DirectoryRecipeStore::new(dir))
    }

    #[test]
    fn lists_yaml_recipes_by_name() {
        let (_temp, store) = store_with(&[
            ("zeta.yaml", ECHO),
            ("alpha.yaml", ECHO),
            ("notes.txt", "not a recipe"),
        ]);
        let names: Vec<_> = store.list().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn listing_skips_broken_recipes() {
        let (_temp, store) = store_with(&[("good.yaml", ECHO), ("bad.yaml", "steps: 12\n")]);
        let list = store.list().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].description.as_deref(), Some("Say hello"));
    }

    #[test]
    fn missing_folder_lists_nothing() {
        let temp = TempDir::new().unwrap();
        let store = DirectoryRecipeStore::new(temp.path().join("absent"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn get_by_name_and_by_path() {
        let (temp, store) = store_with(&[("hello.yaml", ECHO)]);
        assert_eq!(store.get("hello").unwrap().name, "hello");

        let outside = temp.path().join("other.yaml");
        fs::write(&outside, ECHO).unwrap();
        assert_eq!(store.get(outside.to_str().unwrap()).unwrap().name, "other");
    }

    #[test]
    fn get_unknown_name() {
        let (_temp, store) = store_with(&[]);
        let err = store.get("ghost").unwrap_err();
        assert!(matches!(
            err,
            recp_core::error::RecpError::Application(ApplicationError::RecipeNotFound { .. })
        ));
    }

    #[test]
    fn add_copies_yaml_file() {
        let (temp, store) = store_with(&[]);
        let source = temp.path().join("new.yaml");
        fs::write(&source, ECHO).unwrap();

        let installed = store.add(&source).unwrap();
        assert_eq!(installed, store.path_for("new"));
        assert!(installed.is_file());
        assert_eq!(store.get("new").unwrap().steps.len(), 1);
    }

    #[test]
    fn add_rejects_other_extensions() {
        let (temp, store) = store_with(&[]);
        let source = temp.path().join("recipe.yml");
        fs::write(&source, ECHO).unwrap();

        let err = store.add(&source).unwrap_err();
        assert!(err.to_string().contains(".yaml"));
    }

    #[test]
    fn add_missing_source() {
        let (temp, store) = store_with(&[]);
        assert!(store.add(&temp.path().join("nope.yaml")).is_err());
    }
}
