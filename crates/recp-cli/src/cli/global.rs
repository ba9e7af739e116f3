//! Flags shared by every `recp` subcommand.
//!
//! Flattened into [`super::Cli`] with `global = true`, so they may appear
//! before or after the subcommand name.

use std::path::PathBuf;

use clap::Args;
use clap::builder::FalseyValueParser;

/// Flags accepted by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log level: warnings by default, then info, debug (one line per
    /// transformation step) and trace.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log output on stderr (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Only errors and the expanded commands themselves are printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Hide status messages"
    )]
    pub quiet: bool,

    /// No ANSI styling on stdout or stderr.
    ///
    /// `NO_COLOR` follows <https://no-color.org>: any value other than an
    /// empty or falsey one (`0`, `false`, `no`, `off`) disables colour.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// TOML file to read instead of the platform default.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Overrides `output.format` from the configuration.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format for status and listings"
    )]
    pub output_format: OutputFormat,
}

/// How the CLI renders its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped.
    #[default]
    Auto,
    /// Styled text.
    Human,
    /// Unstyled text.
    Plain,
    /// JSON documents.
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` config value. Unknown values mean `Auto`.
    pub fn from_config(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "human" => Self::Human,
            "plain" => Self::Plain,
            "json" => Self::Json,
            _ => Self::Auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn no_color_with_env(value: &str) -> bool {
        // SAFETY: only this test module touches NO_COLOR, and the previous
        // value is put back before returning.
        let previous = std::env::var_os("NO_COLOR");
        unsafe { std::env::set_var("NO_COLOR", value) };
        let parsed = Cli::try_parse_from(["recp", "transformations"]);
        match previous {
            Some(v) => unsafe { std::env::set_var("NO_COLOR", v) },
            None => unsafe { std::env::remove_var("NO_COLOR") },
        }
        parsed.unwrap().global.no_color
    }

    #[test]
    fn no_color_env_accepts_conventional_values() {
        assert!(no_color_with_env("1"));
        assert!(no_color_with_env("yes"));
        assert!(!no_color_with_env("0"));
        assert!(!no_color_with_env("false"));
    }

    #[test]
    fn no_color_flag() {
        let cli = Cli::parse_from(["recp", "--no-color", "list"]);
        assert!(cli.global.no_color);
    }

    #[test]
    fn output_format_from_config() {
        assert_eq!(OutputFormat::from_config(" JSON "), OutputFormat::Json);
        assert_eq!(OutputFormat::from_config("plain"), OutputFormat::Plain);
        assert_eq!(OutputFormat::from_config("xml"), OutputFormat::Auto);
    }
}
