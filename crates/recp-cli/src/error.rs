//! Errors raised by the `recp` binary and how they reach the terminal.
//!
//! Failures from the expansion pipeline arrive as [`RecpError`] and keep
//! their own suggestions. The CLI adds the cases it owns itself: bad
//! arguments, the TOML config file, stdout/filesystem I/O and JSON output.
//! Each maps to one of the documented process exit codes.

use std::error::Error;
use std::fmt::Write as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use recp_core::error::{ErrorCategory as CoreCategory, RecpError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A flag, `--set KEY=VALUE` pair or `config set` value was rejected.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// The TOML config file is unreadable, malformed or names an unknown key.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    #[error(transparent)]
    Core(#[from] RecpError),

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A listing or expansion could not be encoded as JSON.
    #[error("{message}")]
    Output {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        CliError::Io {
            message: source.to_string(),
            source,
        }
    }
}

/// Where an error sits in the exit-code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitKind {
    /// Bad arguments, parameters or recipe contents. Exit code 2.
    Usage,
    /// A recipe or input folder does not exist. Exit code 3.
    Missing,
    /// Exit code 4.
    Config,
    /// Everything else. Exit code 1.
    Internal,
}

impl CliError {
    pub fn kind(&self) -> ExitKind {
        match self {
            Self::InvalidInput { .. } => ExitKind::Usage,
            Self::Config { .. } => ExitKind::Config,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ExitKind::Usage,
                CoreCategory::NotFound => ExitKind::Missing,
                CoreCategory::Configuration => ExitKind::Config,
                CoreCategory::Internal => ExitKind::Internal,
            },
            Self::Io { .. } | Self::Output { .. } => ExitKind::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            ExitKind::Usage => 2,
            ExitKind::Missing => 3,
            ExitKind::Config => 4,
            ExitKind::Internal => 1,
        }
    }

    /// Hints printed under the message.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(core) => core.suggestions(),
            Self::InvalidInput { .. } => {
                vec!["Run the command with --help to see the accepted values".into()]
            }
            Self::Config { .. } => vec![
                "Run 'recp config path' to see which file is in use".into(),
                "Run 'recp init --force' to write a fresh default config".into(),
            ],
            Self::Io { .. } => vec!["Check that the path exists and is writable".into()],
            Self::Output { .. } => vec![
                "Retry with --output-format plain".into(),
                "Please report this as a recp bug".into(),
            ],
        }
    }

    /// Text for stderr. `styled` adds ANSI colours; `verbose` lists the
    /// cause chain and drops the hint about `--verbose`.
    pub fn render(&self, styled: bool, verbose: bool) -> String {
        let paint = |text: String, style: fn(&str) -> String| {
            if styled { style(&text) } else { text }
        };
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{} {self}",
            paint("error:".into(), |s| s.red().bold().to_string())
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let _ = writeln!(
                    out,
                    "  {}",
                    paint(format!("caused by: {err}"), |s| s.dimmed().to_string())
                );
                cause = err.source();
            }
        }

        for hint in self.suggestions() {
            let _ = writeln!(
                out,
                "  {} {hint}",
                paint("hint:".into(), |s| s.yellow().to_string())
            );
        }

        if !verbose {
            let _ = writeln!(
                out,
                "{}",
                paint("Re-run with --verbose to see the cause chain.".into(), |s| {
                    s.dimmed().to_string()
                })
            );
        }

        out
    }

    pub fn log(&self) {
        let transformation = match self {
            Self::Core(core) => core.failed_transformation(),
            _ => None,
        };
        match self.kind() {
            ExitKind::Usage | ExitKind::Missing => {
                tracing::warn!(code = self.exit_code(), transformation, "{self}")
            }
            ExitKind::Config | ExitKind::Internal => {
                tracing::error!(code = self.exit_code(), transformation, "{self}")
            }
        }
        if let Some(source) = self.source() {
            tracing::debug!(%source, "underlying error");
        }
    }
}

/// Attach a message to io and json failures at the call site.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, message: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, message: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::Io {
            message: message().into(),
            source,
        })
    }
}

impl<T> IntoCli<T> for Result<T, serde_json::Error> {
    fn with_cli_context<F, S>(self, message: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::Output {
            message: message().into(),
            source,
        })
    }
}
