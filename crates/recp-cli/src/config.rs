//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only receives the values it needs
//! (the recipes folder and the default `dir_files` mode).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `RECP_<SECTION>__<KEY>`, e.g. `RECP_RECIPES__DIR`
//! 3. Config file (`--config`, or the platform default path)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use recp_core::domain::ExpansionMode;

use crate::error::{CliError, CliResult};

/// Keys accepted by `recp config get|set`.
pub const CONFIG_KEYS: &[&str] = &[
    "recipes.dir",
    "output.no_color",
    "output.format",
    "expansion.dir_files_mode",
];

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Recipe storage.
    pub recipes: RecipesConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Pipeline behaviour.
    pub expansion: ExpansionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipesConfig {
    pub dir: PathBuf,
}

impl Default for RecipesConfig {
    fn default() -> Self {
        Self {
            dir: AppConfig::default_recipes_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// auto | human | plain | json
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    pub dir_files_mode: ExpansionMode,
}

impl AppConfig {
    /// Load configuration: defaults, then the TOML file, then `RECP_*`
    /// environment variables.
    ///
    /// With `must_exist`, a file passed with `--config` has to be present.
    /// The default file is always optional.
    pub fn load(config_file: Option<&PathBuf>, must_exist: bool) -> anyhow::Result<Self> {
        let path = Self::resolve_path(config_file);

        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(must_exist && config_file.is_some()),
            )
            .add_source(
                config::Environment::with_prefix("RECP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Read only the file layer (no environment), for `config set`.
    pub fn load_file(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| CliError::Io {
            message: format!("Failed to read config '{}'", path.display()),
            source: e,
        })?;
        toml::from_str(&raw).map_err(|e| CliError::Config {
            message: format!("Failed to parse '{}': {e}", path.display()),
            source: Some(Box::new(e)),
        })
    }

    /// Write this configuration as TOML, creating parent folders.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        let toml = toml::to_string_pretty(self).map_err(|e| CliError::Config {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CliError::Io {
                message: format!("Failed to create config directory '{}'", parent.display()),
                source: e,
            })?;
        }

        std::fs::write(path, toml).map_err(|e| CliError::Io {
            message: format!("Failed to write config to '{}'", path.display()),
            source: e,
        })
    }

    /// Current value of a dotted key.
    pub fn get(&self, key: &str) -> CliResult<String> {
        match key {
            "recipes.dir" => Ok(self.recipes.dir.display().to_string()),
            "output.no_color" => Ok(self.output.no_color.to_string()),
            "output.format" => Ok(self.output.format.clone()),
            "expansion.dir_files_mode" => Ok(self.expansion.dir_files_mode.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Validate and set a dotted key.
    pub fn set(&mut self, key: &str, value: &str) -> CliResult<()> {
        match key {
            "recipes.dir" => {
                let dir = PathBuf::from(value);
                if !dir.is_dir() {
                    return Err(CliError::InvalidInput {
                        message: format!("Invalid folder '{value}'"),
                        source: None,
                    });
                }
                self.recipes.dir = dir;
            }
            "output.no_color" => {
                self.output.no_color = value.parse::<bool>().map_err(|e| CliError::InvalidInput {
                    message: format!("output.no_color must be true or false, found '{value}'"),
                    source: Some(Box::new(e)),
                })?;
            }
            "output.format" => {
                let format = value.to_ascii_lowercase();
                if !["auto", "human", "plain", "json"].contains(&format.as_str()) {
                    return Err(CliError::InvalidInput {
                        message: format!(
                            "output.format must be auto, human, plain or json, found '{value}'"
                        ),
                        source: None,
                    });
                }
                self.output.format = format;
            }
            "expansion.dir_files_mode" => {
                self.expansion.dir_files_mode = value.parse::<ExpansionMode>().map_err(|e| CliError::InvalidInput {
                    message: format!("Invalid dir_files mode '{value}'"),
                    source: Some(Box::new(e)),
                })?;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// The file `load` reads: `--config` if given, else the default path.
    pub fn resolve_path(config_file: Option<&PathBuf>) -> PathBuf {
        config_file.cloned().unwrap_or_else(Self::config_path)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.recp.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".recp.toml"))
    }

    /// Default recipes folder under the platform data directory.
    pub fn default_recipes_dir() -> PathBuf {
        project_dirs()
            .map(|d| d.data_dir().join("recipes"))
            .unwrap_or_else(|| PathBuf::from(".recp").join("recipes"))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "recp", "recp")
}

fn unknown_key(key: &str) -> CliError {
    CliError::Config {
        message: format!(
            "Unknown config key: '{key}' (known keys: {})",
            CONFIG_KEYS.join(", ")
        ),
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_mode_is_overwrite() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.expansion.dir_files_mode, ExpansionMode::Overwrite);
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn default_recipes_dir_ends_with_recipes() {
        assert!(AppConfig::default_recipes_dir().ends_with("recipes"));
    }

    #[test]
    fn load_reads_toml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[recipes]\ndir = \"/srv/recipes\"\n\n[output]\nno_color = true\nformat = \"plain\"\n\n[expansion]\ndir_files_mode = \"accumulate\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path), true).unwrap();
        assert_eq!(cfg.recipes.dir, PathBuf::from("/srv/recipes"));
        assert!(cfg.output.no_color);
        assert_eq!(cfg.expansion.dir_files_mode, ExpansionMode::Accumulate);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[expansion]\ndir_files_mode = \"accumulate\"\n").unwrap();

        let cfg = AppConfig::load(Some(&path), true).unwrap();
        assert_eq!(cfg.output.format, "auto");
        assert_eq!(cfg.recipes.dir, AppConfig::default_recipes_dir());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.toml");
        assert!(AppConfig::load(Some(&missing), true).is_err());
        assert_eq!(
            AppConfig::load(Some(&missing), false).unwrap().output.format,
            "auto"
        );
    }

    #[test]
    fn save_then_load_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut cfg = AppConfig::default();
        cfg.set("recipes.dir", &temp.path().display().to_string()).unwrap();
        cfg.set("expansion.dir_files_mode", "accumulate").unwrap();
        cfg.save(&path).unwrap();

        assert_eq!(AppConfig::load_file(&path).unwrap(), cfg);
    }

    #[test]
    fn set_rejects_missing_folder() {
        let mut cfg = AppConfig::default();
        let err = cfg.set("recipes.dir", "/definitely/not/here").unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut cfg = AppConfig::default();
        assert!(cfg.set("output.no_color", "maybe").is_err());
        assert!(cfg.set("output.format", "xml").is_err());
        assert!(cfg.set("expansion.dir_files_mode", "merge").is_err());
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("expansion.dir_files_mode").unwrap(), "overwrite");
        assert_eq!(cfg.get("output.no_color").unwrap(), "false");
        assert!(matches!(
            cfg.get("does.not.exist"),
            Err(CliError::Config { .. })
        ));
    }

    #[test]
    fn load_file_accepts_partial_and_empty_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        std::fs::write(&path, "").unwrap();
        assert_eq!(AppConfig::load_file(&path).unwrap(), AppConfig::default());

        std::fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();
        let cfg = AppConfig::load_file(&path).unwrap();
        assert_eq!(cfg.output.format, "json");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
