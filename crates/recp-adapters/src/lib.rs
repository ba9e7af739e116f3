//! Infrastructure adapters for recp.
//!
//! This crate implements the ports defined in `recp_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod clock;
pub mod enumerator;
pub mod recipe_loader;
pub mod recipe_store;

// Re-export commonly used adapters
pub use clock::{FixedClock, SystemClock};
pub use enumerator::{LocalFileEnumerator, MemoryFileEnumerator};
pub use recipe_loader::RecipeLoader;
pub use recipe_store::DirectoryRecipeStore;
