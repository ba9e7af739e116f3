//! Core domain layer for recp.
//!
//! Pure logic only: command lists, tokens, the five transformations, their
//! registry and the recipe model. Reading the clock, touching the
//! filesystem and the process environment are left to the application
//! layer and its ports.
//!
//! - **No I/O**: enumeration results and timestamps are passed in
//! - **Synchronous**: every transformation runs to completion
//! - **Immutable values**: transformations take a list and return a new one
//!
// Public API - what the world sees
pub mod error;
pub mod file_set;
pub mod params;
pub mod path;
pub mod recipe;
pub mod registry;
pub mod transformation;

// Re-exports for convenience
pub use error::{DomainError, ErrorCategory};
pub use file_set::{ANY_EXTENSION, FileQuery, FileSet, SortKey, SortOrder};
pub use params::{ParamValue, Params};
pub use recipe::{Recipe, RecipeStep, RecipeSummary};
pub use registry::{ParamDef, TRANSFORMATION_REGISTRY, TransformationDef, TransformationRegistry};
pub use transformation::{
    CommandList, DEFAULT_DATE_FORMAT, DateSpec, DirFilesSpec, ExpansionMode, ParentDirSpec,
    RepeatSpec, ReplaceSpec, Transformation, TransformationSpec,
};
