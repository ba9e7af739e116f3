//! Expansion Service - runs transformation pipelines.
//!
//! This service turns command templates into concrete command lists:
//! 1. Resolve each transformation by name through the registry
//! 2. Expand `~` and `$VAR` in path parameters
//! 3. Apply the transformation, calling ports for the clock and the filesystem
//!
//! Steps run in order and the first failure aborts the pipeline.

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        env::EnvOverride,
        ports::{Clock, FileEnumerator},
    },
    domain::{
        CommandList, DirFilesSpec, ExpansionMode, Recipe, ReplaceSpec, Transformation,
        TransformationRegistry, TransformationSpec,
    },
    error::{RecpError, RecpResult},
};

/// Main expansion service.
pub struct ExpansionService {
    registry: TransformationRegistry,
    enumerator: Box<dyn FileEnumerator>,
    clock: Box<dyn Clock>,
    default_mode: ExpansionMode,
}

impl ExpansionService {
    /// Create a service with the built-in registry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chrono::{DateTime, Local, TimeZone};
    /// use recp_core::application::{Clock, ExpansionService, FileEnumerator};
    /// use recp_core::domain::{FileQuery, FileSet, TransformationSpec};
    /// use recp_core::error::RecpResult;
    ///
    /// struct NoFiles;
    ///
    /// impl FileEnumerator for NoFiles {
    ///     fn enumerate(&self, _query: &FileQuery) -> RecpResult<FileSet> {
    ///         Ok(FileSet::default())
    ///     }
    /// }
    ///
    /// struct NewYear;
    ///
    /// impl Clock for NewYear {
    ///     fn now(&self) -> DateTime<Local> {
    ///         Local.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    ///     }
    /// }
    ///
    /// let service = ExpansionService::new(Box::new(NoFiles), Box::new(NewYear));
    /// let out = service
    ///     .expand(
    ///         vec!["tar czf backup-{d}.tgz .".into()],
    ///         &[TransformationSpec::new("date").param("token", "{d}")],
    ///     )
    ///     .unwrap();
    /// assert_eq!(out, vec!["tar czf backup-2025-01-01.tgz ."]);
    /// ```
    pub fn new(enumerator: Box<dyn FileEnumerator>, clock: Box<dyn Clock>) -> Self {
        Self {
            registry: TransformationRegistry::builtin(),
            enumerator,
            clock,
            default_mode: ExpansionMode::default(),
        }
    }

    pub fn with_registry(mut self, registry: TransformationRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Mode used by `dir_files` steps that do not set `mode` themselves.
    pub fn with_dir_files_mode(mut self, mode: ExpansionMode) -> Self {
        self.default_mode = mode;
        self
    }

    pub fn registry(&self) -> &TransformationRegistry {
        &self.registry
    }

    /// Fold `specs` over `initial`.
    ///
    /// Errors are wrapped in [`ApplicationError::TransformationFailed`]
    /// carrying the 1-based step number and the transformation name.
    #[instrument(skip_all, fields(steps = specs.len(), commands = initial.len()))]
    pub fn expand(
        &self,
        initial: CommandList,
        specs: &[TransformationSpec],
    ) -> RecpResult<CommandList> {
        let mut commands = initial;

        for (index, spec) in specs.iter().enumerate() {
            let step = index + 1;

            let mut transformation = self
                .registry
                .build(spec)
                .map_err(|e| step_failed(step, &spec.name, e.into()))?;
            transformation.expand_paths(|key| std::env::var(key).ok());

            let before = commands.len();
            commands = self
                .apply(&transformation, commands)
                .map_err(|e| step_failed(step, &spec.name, e))?;

            debug!(
                step,
                name = transformation.name(),
                before,
                after = commands.len(),
                "Applied transformation"
            );
        }

        Ok(commands)
    }

    /// Apply one validated transformation.
    pub fn apply(
        &self,
        transformation: &Transformation,
        commands: CommandList,
    ) -> RecpResult<CommandList> {
        match transformation {
            Transformation::Date(spec) => {
                let now = self.clock.now();
                Ok(spec.apply(commands, &now)?)
            }
            Transformation::DirFiles(spec) => self.dir_files(spec, commands),
            Transformation::ParentDir(spec) => Ok(spec.apply(commands)),
            Transformation::Replace(spec) => Ok(spec.apply(commands)),
            Transformation::Repeat(spec) => Ok(spec.apply(commands)?),
        }
    }

    /// Expand every step of a recipe and concatenate the results.
    ///
    /// The recipe's `env` block is in effect for the whole call. Non-empty
    /// `variables` are substituted after each step's own transformations.
    #[instrument(skip_all, fields(recipe = %recipe.name))]
    pub fn expand_recipe(
        &self,
        recipe: &Recipe,
        variables: &[(String, String)],
    ) -> RecpResult<CommandList> {
        recipe.validate()?;

        let _env = EnvOverride::new(recipe.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        let overrides = ReplaceSpec::new(variables.iter().cloned());

        let mut out = CommandList::new();
        for (i, step) in recipe.steps.iter().enumerate() {
            debug!(step = i + 1, command = %step.command, "Expanding recipe step");
            let mut commands = self.expand(vec![step.command.clone()], &step.run)?;
            if !overrides.pairs.is_empty() {
                commands = overrides.apply(commands);
            }
            out.extend(commands);
        }

        info!(commands = out.len(), "Recipe expanded");
        Ok(out)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn dir_files(&self, spec: &DirFilesSpec, commands: CommandList) -> RecpResult<CommandList> {
        let mode = spec.mode.unwrap_or(self.default_mode);
        let query = spec.query();

        let mut out = CommandList::new();
        for (i, command) in commands.iter().enumerate() {
            let files = self.enumerator.enumerate(&query)?;
            let expanded = spec.expand_command(command, files.iter());

            match mode {
                ExpansionMode::Accumulate => out.extend(expanded),
                ExpansionMode::Overwrite => {
                    if i > 0 && !out.is_empty() {
                        warn!(
                            discarded = out.len(),
                            token = %spec.token,
                            "dir_files overwrote the expansion of a previous command; set mode: accumulate to keep it"
                        );
                    }
                    out = expanded;
                }
            }
        }

        Ok(out)
    }
}

fn step_failed(step: usize, name: &str, source: RecpError) -> RecpError {
    ApplicationError::TransformationFailed {
        step,
        name: name.to_string(),
        source: Box::new(source),
    }
    .into()
}
