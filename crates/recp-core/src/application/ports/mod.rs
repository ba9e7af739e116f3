//! Application ports (traits) for external dependencies.
//!
//! Ports define what the expansion pipeline needs from the outside world.
//! Adapters in `recp-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `FileEnumerator`: Directory listing for `dir_files`
//!   - `Clock`: Current local time for `date`
//!   - `RecipeStore`: Recipe storage/retrieval
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Clock, FileEnumerator, RecipeStore};

#[cfg(test)]
pub use output::MockFileEnumerator;
