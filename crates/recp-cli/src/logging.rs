//! Diagnostics for `recp` on stderr.
//!
//! Stdout carries nothing but expanded commands and listings, so every log
//! line goes to stderr. The core and adapter crates emit events; only this
//! module installs a subscriber.
//!
//! With no `RUST_LOG`, the level comes from the flags: warnings by default,
//! `-v` for info, `-vv` for the per-step debug lines of an expansion, and
//! `-vvv` for trace. `--quiet` keeps errors only.

use std::io::IsTerminal as _;

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events are shown. Everything else stays at the default `off`.
const RECP_TARGETS: [&str; 3] = ["recp", "recp_core", "recp_adapters"];

/// Install the stderr subscriber for this process.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = level_for(args);
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::new(recp_directive(level)),
    };

    // Module paths only help once step-level events are on.
    let show_targets = level >= LevelFilter::DEBUG;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_target(show_targets)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("recp could not install its log subscriber: {e}"))
}

fn recp_directive(level: LevelFilter) -> String {
    let level = level.to_string().to_ascii_lowercase();
    RECP_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
