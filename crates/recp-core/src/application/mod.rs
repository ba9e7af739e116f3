//! Application layer for recp.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ExpansionService, RecipeService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Env**: Scoped environment overrides for recipe `env:` blocks
//! - **Errors**: Application-specific error types
//!
//! Transformation semantics live in `crate::domain`; this layer only feeds
//! them the clock, the filesystem and the environment.

pub mod env;
pub mod error;
pub mod ports;
pub mod services;

pub use services::{ExpansionService, RecipeService};

pub use ports::{Clock, FileEnumerator, RecipeStore};

pub use env::EnvOverride;
pub use error::ApplicationError;
