//! YAML recipe loader.
//!
//! Parses recipe files into domain [`Recipe`] values.
//!
//! # `recipe.yaml` format
//!
//! ```yaml
//! description: Convert every wav file     # optional
//! env:                                    # optional, applied while expanding
//!   OUT: ./converted
//! steps:
//!   - command: "ffmpeg -i {file} $OUT/{date}.mp3"
//!     run:
//!       - dir_files: { token: "{file}", dir: ./audio, ext: .wav }
//!       - date: { token: "{date}", format: "%Y%m%d" }
//!   - command: "echo done"               # no run list: emitted as is
//! ```
//!
//! Each `run` entry is a single-key mapping from transformation name to its
//! parameters. A bare string is a transformation without parameters.
//! Parameter order is kept as written.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::{debug, instrument};

use recp_core::domain::{
    DomainError, ParamValue, Params, Recipe, RecipeStep, TransformationSpec,
};

// ── Document types ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecipeDocument {
    description: Option<String>,
    #[serde(default)]
    env: Mapping,
    steps: Vec<StepDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StepDocument {
    command: String,
    #[serde(default)]
    run: Vec<Value>,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Reads recipe files.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeLoader;

impl RecipeLoader {
    /// Load a recipe from disk. The recipe is named after the file stem.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load_file(path: &Path) -> Result<Recipe, DomainError> {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let raw = fs::read_to_string(path).map_err(|e| DomainError::InvalidRecipe {
            name: name.clone(),
            reason: format!("failed to read '{}': {e}", path.display()),
        })?;

        let recipe = Self::parse_str(&name, &raw)?;
        debug!(steps = recipe.steps.len(), "Loaded recipe");
        Ok(recipe)
    }

    /// Parse recipe text.
    pub fn parse_str(name: &str, text: &str) -> Result<Recipe, DomainError> {
        let invalid = |reason: String| DomainError::InvalidRecipe {
            name: name.to_string(),
            reason,
        };

        let doc: RecipeDocument =
            serde_yaml::from_str(text).map_err(|e| invalid(format!("malformed YAML: {e}")))?;

        let mut recipe = Recipe::new(name);
        recipe.description = doc.description;

        for (key, value) in &doc.env {
            let key = scalar_text(key).ok_or_else(|| invalid("env keys must be strings".into()))?;
            let value = scalar_text(value)
                .ok_or_else(|| invalid(format!("env value for '{key}' must be a scalar")))?;
            recipe.env.push((key, value));
        }

        for (index, step) in doc.steps.into_iter().enumerate() {
            let mut parsed = RecipeStep::new(step.command);
            for entry in &step.run {
                let spec = parse_run_entry(entry)
                    .map_err(|reason| invalid(format!("step {}: {reason}", index + 1)))?;
                parsed.run.push(spec);
            }
            recipe.steps.push(parsed);
        }

        recipe.validate()?;
        Ok(recipe)
    }
}

fn parse_run_entry(entry: &Value) -> Result<TransformationSpec, String> {
    match entry {
        Value::String(name) => Ok(TransformationSpec::new(name.as_str())),
        Value::Mapping(map) if map.len() == 1 => {
            let Some((name, params)) = map.iter().next() else {
                return Err("empty run entry".into());
            };
            let name = name
                .as_str()
                .ok_or_else(|| "transformation names must be strings".to_string())?;
            let params = match params {
                Value::Null => Params::new(),
                Value::Mapping(params) => to_params(params)?,
                other => {
                    return Err(format!(
                        "parameters of '{name}' must be a mapping, found {}",
                        kind(other)
                    ));
                }
            };
            Ok(TransformationSpec::new(name).with_params(params))
        }
        Value::Mapping(map) => Err(format!(
            "each run entry needs exactly one transformation, found {}",
            map.len()
        )),
        other => Err(format!(
            "run entries must be a name or a mapping, found {}",
            kind(other)
        )),
    }
}

fn to_params(map: &Mapping) -> Result<Params, String> {
    map.iter()
        .map(|(key, value)| {
            let key = scalar_text(key).ok_or_else(|| "parameter names must be scalars".to_string())?;
            Ok((key, to_param_value(value)?))
        })
        .collect()
}

fn to_param_value(value: &Value) -> Result<ParamValue, String> {
    Ok(match value {
        Value::Null => ParamValue::Null,
        Value::Bool(b) => ParamValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => ParamValue::Integer(i),
            None => ParamValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => ParamValue::String(s.clone()),
        Value::Sequence(items) => ParamValue::List(
            items
                .iter()
                .map(to_param_value)
                .collect::<Result<_, _>>()?,
        ),
        Value::Mapping(map) => ParamValue::Map(to_params(map)?),
        Value::Tagged(tagged) => to_param_value(&tagged.value)?,
    })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CONVERT: &str = r#"
description: Convert every wav file
env:
  OUT: ./converted
  LEVEL: 3
steps:
  - command: "ffmpeg -i {file} $OUT/{date}.mp3"
    run:
      - dir_files: { token: "{file}", dir: ./audio, ext: [.wav, .aif], recursive: false }
      - date: { token: "{date}", format: "%Y%m%d" }
  - command: echo done
"#;

    #[test]
    fn parses_full_recipe() {
        let recipe = RecipeLoader::parse_str("convert", CONVERT).unwrap();

        assert_eq!(recipe.name, "convert");
        assert_eq!(recipe.description.as_deref(), Some("Convert every wav file"));
        assert_eq!(
            recipe.env,
            vec![
                ("OUT".to_string(), "./converted".to_string()),
                ("LEVEL".to_string(), "3".to_string())
            ]
        );
        assert_eq!(recipe.steps.len(), 2);

        let run = &recipe.steps[0].run;
        assert_eq!(run[0].name, "dir_files");
        assert_eq!(
            run[0].params.keys().collect::<Vec<_>>(),
            vec!["token", "dir", "ext", "recursive"]
        );
        assert_eq!(run[0].params.get("recursive"), Some(&ParamValue::Bool(false)));
        assert_eq!(run[1].name, "date");
        assert!(recipe.steps[1].run.is_empty());
    }

    #[test]
    fn bare_name_means_no_parameters() {
        let recipe = RecipeLoader::parse_str(
            "bare",
            "steps:\n  - command: x\n    run:\n      - replace\n      - repeat: { n: 2 }\n",
        )
        .unwrap();
        let run = &recipe.steps[0].run;
        assert_eq!(run[0].name, "replace");
        assert!(run[0].params.is_empty());
        assert_eq!(run[1].params.get("n"), Some(&ParamValue::Integer(2)));
    }

    #[test]
    fn replace_pairs_keep_their_order() {
        let recipe = RecipeLoader::parse_str(
            "ordered",
            "steps:\n  - command: x\n    run:\n      - replace: { z: '1', a: '2', m: '3' }\n",
        )
        .unwrap();
        let keys: Vec<_> = recipe.steps[0].run[0].params.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn rejects_multi_key_run_entry() {
        let err = RecipeLoader::parse_str(
            "multi",
            "steps:\n  - command: x\n    run:\n      - { date: { token: a }, repeat: { n: 1 } }\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("exactly one transformation"));
    }

    #[test]
    fn rejects_unknown_top_level_field() {
        let err = RecipeLoader::parse_str("typo", "stepz: []\n").unwrap_err();
        assert!(matches!(err, DomainError::InvalidRecipe { ref name, .. } if name == "typo"));
    }

    #[test]
    fn rejects_recipe_without_steps() {
        assert!(RecipeLoader::parse_str("empty", "steps: []\n").is_err());
    }

    #[test]
    fn loads_from_file_named_after_stem() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("convert.yaml");
        fs::write(&path, CONVERT).unwrap();

        let recipe = RecipeLoader::load_file(&path).unwrap();
        assert_eq!(recipe.name, "convert");
    }

    #[test]
    fn missing_file_is_invalid_recipe() {
        let temp = TempDir::new().unwrap();
        let err = RecipeLoader::load_file(&temp.path().join("gone.yaml")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidRecipe { .. }));
    }
}
