//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "expand a recipe" or "install a recipe".

pub mod expansion_service;
pub mod recipe_service;

pub use expansion_service::ExpansionService;
pub use recipe_service::RecipeService;
