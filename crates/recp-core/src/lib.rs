//! recp Core - command-template expansion engine.
//!
//! This crate provides the domain and application layers for recp, which
//! turns command templates into concrete shell command lists by folding a
//! sequence of transformations over them.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             recp-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (ExpansionService, RecipeService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │   (FileEnumerator, Clock, RecipeStore)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      recp-adapters (Infrastructure)     │
//! │ (LocalFileEnumerator, SystemClock, ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Domain Layer (Pure Logic)      │
//! │  (Transformation, Registry, Recipe)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{DateTime, Local};
//! use recp_core::{
//!     application::{Clock, ExpansionService, FileEnumerator},
//!     domain::{FileQuery, FileSet, TransformationSpec},
//!     error::RecpResult,
//! };
//!
//! struct TwoTakes;
//!
//! impl FileEnumerator for TwoTakes {
//!     fn enumerate(&self, query: &FileQuery) -> RecpResult<FileSet> {
//!         let files = ["take2.wav", "take1.wav"].map(|f| query.dirs[0].join(f));
//!         Ok(FileSet::sorted(Vec::from(files), &query.sort))
//!     }
//! }
//!
//! struct Now;
//!
//! impl Clock for Now {
//!     fn now(&self) -> DateTime<Local> {
//!         Local::now()
//!     }
//! }
//!
//! # fn main() -> RecpResult<()> {
//! let service = ExpansionService::new(Box::new(TwoTakes), Box::new(Now));
//! let commands = service.expand(
//!     vec!["ffmpeg -i {f} {f}.mp3".into()],
//!     &[TransformationSpec::new("dir_files")
//!         .param("token", "{f}")
//!         .param("dir", "audio")
//!         .param("ext", ".wav")],
//! )?;
//!
//! assert_eq!(commands[0], "ffmpeg -i audio/take1.wav audio/take1.wav.mp3");
//! assert_eq!(commands.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ExpansionService, RecipeService,
        ports::{Clock, FileEnumerator, RecipeStore},
    };
    pub use crate::domain::{
        CommandList, ExpansionMode, FileQuery, FileSet, Recipe, RecipeStep, RecipeSummary,
        Transformation, TransformationRegistry, TransformationSpec,
    };
    pub use crate::error::{RecpError, RecpResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
