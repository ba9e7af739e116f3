//! Recipes: named lists of command templates and the transformations that
//! expand them.

use std::path::PathBuf;

use crate::domain::error::DomainError;
use crate::domain::transformation::TransformationSpec;

/// One command template plus its ordered transformation sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeStep {
    pub command: String,
    pub run: Vec<TransformationSpec>,
}

impl RecipeStep {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            run: Vec::new(),
        }
    }

    pub fn then(mut self, spec: TransformationSpec) -> Self {
        self.run.push(spec);
        self
    }
}

/// A loaded recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: String,
    pub description: Option<String>,
    /// Variables overlaid on the process environment while expanding.
    pub env: Vec<(String, String)>,
    pub steps: Vec<RecipeStep>,
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            env: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn step(mut self, step: RecipeStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.steps.is_empty() {
            return Err(self.invalid("recipe has no steps"));
        }

        for (i, step) in self.steps.iter().enumerate() {
            if step.command.trim().is_empty() {
                return Err(self.invalid(format!("step {} has an empty command", i + 1)));
            }
            if let Some(spec) = step.run.iter().find(|s| s.name.trim().is_empty()) {
                return Err(self.invalid(format!(
                    "step {} has a transformation without a name ({spec:?})",
                    i + 1
                )));
            }
        }

        if let Some((key, _)) = self.env.iter().find(|(k, _)| k.is_empty() || k.contains('=')) {
            return Err(self.invalid(format!("invalid environment variable name '{key}'")));
        }

        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> DomainError {
        DomainError::InvalidRecipe {
            name: self.name.clone(),
            reason: reason.into(),
        }
    }
}

/// Listing entry for an installed recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSummary {
    pub name: String,
    pub description: Option<String>,
    pub path: PathBuf,
}
