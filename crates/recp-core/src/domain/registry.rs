//! Transformation registry.
//!
//! Recipes name their transformations with plain strings. This module maps
//! those names onto [`Transformation`] variants through a single static
//! table: each transformation is described exactly once by its
//! [`TransformationDef`], and lookup is an O(n) scan of that table.
//!
//! # Adding a New Transformation
//!
//! 1. Add a variant and its spec type in `transformation.rs`
//! 2. Add one [`TransformationDef`] entry to [`TRANSFORMATION_REGISTRY`]
//! 3. Handle the variant in `ExpansionService::apply`

use crate::domain::error::DomainError;
use crate::domain::params::Params;
use crate::domain::transformation::{
    DateSpec, DirFilesSpec, ParentDirSpec, RepeatSpec, ReplaceSpec, Transformation,
    TransformationSpec,
};

/// One accepted parameter of a transformation.
#[derive(Debug, Clone, Copy)]
pub struct ParamDef {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

const fn required(name: &'static str, description: &'static str) -> ParamDef {
    ParamDef {
        name,
        required: true,
        description,
    }
}

const fn optional(name: &'static str, description: &'static str) -> ParamDef {
    ParamDef {
        name,
        required: false,
        description,
    }
}

/// Everything the registry knows about one transformation.
#[derive(Debug, Clone, Copy)]
pub struct TransformationDef {
    /// Identifier used in recipe files.
    pub name: &'static str,

    pub description: &'static str,

    /// Accepted parameters. Ignored when `open_params` is set.
    pub params: &'static [ParamDef],

    /// The parameter names are caller-defined (`replace`).
    pub open_params: bool,

    /// Build the typed variant from validated parameters.
    pub build: fn(&Params) -> Result<Transformation, DomainError>,
}

impl TransformationDef {
    /// Check parameter names against the definition, then build.
    pub fn instantiate(&self, params: &Params) -> Result<Transformation, DomainError> {
        if !self.open_params {
            if let Some(unknown) = params
                .keys()
                .find(|key| !self.params.iter().any(|p| p.name == *key))
            {
                return Err(DomainError::InvalidParameter {
                    transformation: self.name.to_string(),
                    parameter: unknown.to_string(),
                    reason: format!(
                        "unknown parameter (accepted: {})",
                        self.params
                            .iter()
                            .map(|p| p.name)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                });
            }
        }
        (self.build)(params)
    }
}

/// Single source of truth for the built-in transformations.
pub static TRANSFORMATION_REGISTRY: &[TransformationDef] = &[
    TransformationDef {
        name: DateSpec::NAME,
        description: "Replace a token with the current local date/time",
        params: &[
            required("token", "Text to replace"),
            optional("format", "strftime pattern, default %Y-%m-%d"),
        ],
        open_params: false,
        build: |p| DateSpec::from_params(p).map(Transformation::Date),
    },
    TransformationDef {
        name: DirFilesSpec::NAME,
        description: "Emit one command per file found in a directory",
        params: &[
            required("token", "Text to replace with each file path"),
            required("dir", "Directory or list of directories to search"),
            optional("ext", "Extension or list of extensions, default *"),
            optional("recursive", "Search subdirectories, default true"),
            optional("mode", "overwrite | accumulate, for multi-command input"),
        ],
        open_params: false,
        build: |p| DirFilesSpec::from_params(p).map(Transformation::DirFiles),
    },
    TransformationDef {
        name: ParentDirSpec::NAME,
        description: "Replace a token with the parent directory of a path",
        params: &[
            required("token", "Text to replace"),
            required("path", "Path whose parent is substituted"),
        ],
        open_params: false,
        build: |p| ParentDirSpec::from_params(p).map(Transformation::ParentDir),
    },
    TransformationDef {
        name: ReplaceSpec::NAME,
        description: "Replace literal keys with values, in the order given",
        params: &[optional("pairs", "Mapping of key to value (or list the keys directly)")],
        open_params: true,
        build: |p| ReplaceSpec::from_params(p).map(Transformation::Replace),
    },
    TransformationDef {
        name: RepeatSpec::NAME,
        description: "Repeat the whole command list n times",
        params: &[required("n", "Number of repetitions, zero or more")],
        open_params: false,
        build: |p| RepeatSpec::from_params(p).map(Transformation::Repeat),
    },
];

/// Look up a built-in definition by name.
pub fn find_transformation(name: &str) -> Option<&'static TransformationDef> {
    TRANSFORMATION_REGISTRY.iter().find(|def| def.name == name)
}

/// The built-in name closest to `name`, if any is plausibly a typo of it.
pub fn closest_name(name: &str) -> Option<&'static str> {
    TRANSFORMATION_REGISTRY
        .iter()
        .map(|def| (def.name, edit_distance(name, def.name)))
        .filter(|(_, d)| *d <= 2)
        .min_by_key(|(_, d)| *d)
        .map(|(n, _)| n)
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut row = vec![i + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            row.push((prev[j] + cost).min(prev[j + 1] + 1).min(row[j] + 1));
        }
        prev = row;
    }
    prev[b.len()]
}

/// Name → definition lookup used by the expansion pipeline.
///
/// [`TransformationRegistry::builtin`] wraps the static table. Callers that
/// need aliases or a restricted set can build their own registry with
/// [`TransformationRegistry::with`]; the value itself is never mutated once
/// handed to a service.
#[derive(Debug, Clone)]
pub struct TransformationRegistry {
    defs: Vec<TransformationDef>,
}

impl TransformationRegistry {
    pub fn builtin() -> Self {
        Self {
            defs: TRANSFORMATION_REGISTRY.to_vec(),
        }
    }

    pub fn empty() -> Self {
        Self { defs: Vec::new() }
    }

    /// Add a definition, replacing any existing entry of the same name.
    pub fn with(mut self, def: TransformationDef) -> Self {
        match self.defs.iter_mut().find(|d| d.name == def.name) {
            Some(slot) => *slot = def,
            None => self.defs.push(def),
        }
        self
    }

    /// Fails with [`DomainError::UnknownTransformation`] carrying `name`.
    pub fn lookup(&self, name: &str) -> Result<&TransformationDef, DomainError> {
        self.defs
            .iter()
            .find(|def| def.name == name)
            .ok_or_else(|| DomainError::UnknownTransformation {
                name: name.to_string(),
            })
    }

    /// Resolve and parse a spec in one go.
    pub fn build(&self, spec: &TransformationSpec) -> Result<Transformation, DomainError> {
        self.lookup(&spec.name)?.instantiate(&spec.params)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.defs.iter().map(|def| def.name)
    }

    pub fn definitions(&self) -> &[TransformationDef] {
        &self.defs
    }
}

impl Default for TransformationRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
