//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use recp_core::domain::ExpansionMode;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "recp",
    bin_name = "recp",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Expand command recipes into shell command lists",
    long_about = "recp turns recipe files (command templates plus a list of \
                  transformations) into the concrete shell commands they describe.",
    after_help = "EXAMPLES:\n\
        \x20 recp expand convert-wav\n\
        \x20 recp expand ./recipes/backup.yaml --set '{host}=nas.local'\n\
        \x20 recp expand convert-wav --format json | jq -r '.[]'\n\
        \x20 recp add ./convert-wav.yaml\n\
        \x20 recp completions bash > /usr/share/bash-completion/completions/recp",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Expand a recipe and print the resulting commands.
    #[command(
        visible_alias = "x",
        about = "Expand a recipe into commands",
        after_help = "EXAMPLES:\n\
            \x20 recp expand convert-wav\n\
            \x20 recp expand ./my-recipe.yaml --set '{out}=/tmp/out'\n\
            \x20 recp expand convert-wav --mode accumulate"
    )]
    Expand(ExpandArgs),

    /// List installed recipes.
    #[command(
        visible_alias = "ls",
        about = "List installed recipes",
        after_help = "EXAMPLES:\n\
            \x20 recp list\n\
            \x20 recp list --format json"
    )]
    List(ListArgs),

    /// Install a recipe file into the recipes folder.
    #[command(
        about = "Install a recipe",
        after_help = "EXAMPLES:\n\
            \x20 recp add ./convert-wav.yaml"
    )]
    Add(AddArgs),

    /// Describe the available transformations.
    #[command(
        visible_alias = "t",
        about = "List available transformations",
        after_help = "EXAMPLES:\n\
            \x20 recp transformations\n\
            \x20 recp transformations --format json"
    )]
    Transformations(TransformationsArgs),

    /// Initialise a recp configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 recp init\n\
            \x20 recp init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 recp completions bash > ~/.local/share/bash-completion/completions/recp\n\
            \x20 recp completions zsh  > ~/.zfunc/_recp\n\
            \x20 recp completions fish > ~/.config/fish/completions/recp.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the recp configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 recp config get recipes.dir\n\
            \x20 recp config set recipes.dir ~/recipes\n\
            \x20 recp config set expansion.dir_files_mode accumulate\n\
            \x20 recp config list"
    )]
    Config(ConfigCommands),
}

// ── expand ────────────────────────────────────────────────────────────────────

/// Arguments for `recp expand`.
#[derive(Debug, Args)]
pub struct ExpandArgs {
    /// Installed recipe name, or path to a recipe file.
    #[arg(value_name = "RECIPE", help = "Recipe name or path")]
    pub recipe: String,

    /// Literal substitutions applied after every step.
    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        value_parser = parse_variable,
        help = "Replace KEY with VALUE in every command (repeatable)"
    )]
    pub set: Vec<(String, String)>,

    /// Output format.
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        help = "Output format (default: plain, or json with --output-format json)"
    )]
    pub format: Option<ExpandFormat>,

    /// Default dir_files mode for this run.
    #[arg(
        long = "mode",
        value_enum,
        value_name = "MODE",
        help = "dir_files behaviour for multi-command input (overrides config)"
    )]
    pub mode: Option<ModeArg>,
}

/// Output format for the `expand` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExpandFormat {
    /// One command per line.
    Plain,
    /// JSON array of strings.
    Json,
}

/// `dir_files` expansion mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Keep only the last input command's expansion.
    Overwrite,
    /// Concatenate the expansions of every input command.
    Accumulate,
}

impl From<ModeArg> for ExpansionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Overwrite => ExpansionMode::Overwrite,
            ModeArg::Accumulate => ExpansionMode::Accumulate,
        }
    }
}

/// Split `KEY=VALUE` at the first `=`.
fn parse_variable(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("empty key in '{raw}'")),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, found '{raw}'")),
    }
}

// ── list / transformations ────────────────────────────────────────────────────

/// Arguments for `recp list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Arguments for `recp transformations`.
#[derive(Debug, Args)]
pub struct TransformationsArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── add ───────────────────────────────────────────────────────────────────────

/// Arguments for `recp add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Recipe file to install. Must have a `.yaml` extension.
    #[arg(value_name = "FILE", help = "Recipe file (.yaml)")]
    pub file: PathBuf,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `recp init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `recp completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `recp config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `recipes.dir`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
