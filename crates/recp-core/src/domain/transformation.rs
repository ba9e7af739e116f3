//! The five command-list transformations.
//!
//! Each transformation is a variant of the closed [`Transformation`] type
//! holding its already-validated parameters. Parsing happens once, when the
//! registry builds the variant from a [`TransformationSpec`]; applying never
//! re-validates.
//!
//! Only the pure part of each transformation lives here. Reading the clock
//! and enumerating files are port calls made by the
//! [`ExpansionService`](crate::application::ExpansionService), which hands
//! the results to these functions.

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::file_set::{ANY_EXTENSION, FileQuery};
use crate::domain::params::{ParamValue, Params};
use crate::domain::path;

/// Ordered list of shell command strings.
pub type CommandList = Vec<String>;

/// Default `date` format: `2024-01-31`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

// ── TransformationSpec ───────────────────────────────────────────────────────

/// An unparsed transformation invocation: a name plus ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformationSpec {
    pub name: String,
    pub params: Params,
}

impl TransformationSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Params::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key, value);
        self
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}

impl fmt::Display for TransformationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ── Transformation ───────────────────────────────────────────────────────────

/// A validated, ready-to-apply transformation.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformation {
    Date(DateSpec),
    DirFiles(DirFilesSpec),
    ParentDir(ParentDirSpec),
    Replace(ReplaceSpec),
    Repeat(RepeatSpec),
}

impl Transformation {
    /// Registry name of this transformation.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Date(_) => DateSpec::NAME,
            Self::DirFiles(_) => DirFilesSpec::NAME,
            Self::ParentDir(_) => ParentDirSpec::NAME,
            Self::Replace(_) => ReplaceSpec::NAME,
            Self::Repeat(_) => RepeatSpec::NAME,
        }
    }

    /// Whether the output length may differ from the input length.
    pub const fn changes_cardinality(&self) -> bool {
        matches!(self, Self::DirFiles(_) | Self::Repeat(_))
    }

    /// Expand `~` and environment references in path-valued parameters.
    pub fn expand_paths<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        match self {
            Self::DirFiles(spec) => {
                for dir in &mut spec.dirs {
                    *dir = path::expand_user_and_vars(dir, &lookup);
                }
            }
            Self::ParentDir(spec) => {
                spec.path = path::expand_user_and_vars(&spec.path, &lookup);
            }
            Self::Date(_) | Self::Replace(_) | Self::Repeat(_) => {}
        }
    }
}

/// Replace every occurrence of `token` in every command.
fn substitute_all(commands: CommandList, token: &str, value: &str) -> CommandList {
    commands
        .into_iter()
        .map(|cmd| cmd.replace(token, value))
        .collect()
}

// ── date ─────────────────────────────────────────────────────────────────────

/// `date`: substitute the current date/time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSpec {
    pub token: String,
    pub format: String,
}

impl DateSpec {
    pub const NAME: &'static str = "date";

    pub fn new(token: impl Into<String>, format: impl Into<String>) -> Result<Self, DomainError> {
        let format = format.into();
        validate_date_format(&format)?;
        Ok(Self {
            token: token.into(),
            format,
        })
    }

    pub fn from_params(params: &Params) -> Result<Self, DomainError> {
        let token = params.require_str(Self::NAME, "token")?;
        let format = params
            .optional_str(Self::NAME, "format")?
            .unwrap_or(DEFAULT_DATE_FORMAT);
        Self::new(token, format)
    }

    /// Format `now` once.
    pub fn render<Tz>(&self, now: &DateTime<Tz>) -> Result<String, DomainError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut out = String::new();
        write!(out, "{}", now.format(&self.format))
            .map_err(|_| DomainError::invalid(Self::NAME, "format", "cannot be rendered"))?;
        Ok(out)
    }

    /// Substitute the single timestamp `now` into every command.
    pub fn apply<Tz>(&self, commands: CommandList, now: &DateTime<Tz>) -> Result<CommandList, DomainError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let stamp = self.render(now)?;
        Ok(substitute_all(commands, &self.token, &stamp))
    }
}

fn validate_date_format(format: &str) -> Result<(), DomainError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(DomainError::invalid(
            DateSpec::NAME,
            "format",
            format!("'{format}' is not a valid strftime format"),
        ));
    }
    Ok(())
}

// ── dir_files ────────────────────────────────────────────────────────────────

/// How `dir_files` combines the expansions of several input commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionMode {
    /// Each input command replaces the previous expansion; only the last
    /// command's files survive.
    #[default]
    Overwrite,
    /// Expansions of all input commands are concatenated in input order.
    Accumulate,
}

impl ExpansionMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Accumulate => "accumulate",
        }
    }
}

impl fmt::Display for ExpansionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpansionMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "accumulate" => Ok(Self::Accumulate),
            other => Err(DomainError::invalid(
                DirFilesSpec::NAME,
                "mode",
                format!("expected 'overwrite' or 'accumulate', found '{other}'"),
            )),
        }
    }
}

/// `dir_files`: one command per matching file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirFilesSpec {
    pub token: String,
    pub dirs: Vec<String>,
    pub extensions: Vec<String>,
    pub recursive: bool,
    /// `None` defers to the service-wide default.
    pub mode: Option<ExpansionMode>,
}

impl DirFilesSpec {
    pub const NAME: &'static str = "dir_files";

    pub fn new(token: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            dirs: vec![dir.into()],
            extensions: vec![ANY_EXTENSION.to_string()],
            recursive: true,
            mode: None,
        }
    }

    pub fn from_params(params: &Params) -> Result<Self, DomainError> {
        let token = params.require_str(Self::NAME, "token")?.to_string();

        let dirs = params
            .string_list(Self::NAME, "dir")?
            .ok_or_else(|| DomainError::MissingParameter {
                transformation: Self::NAME.into(),
                parameter: "dir".into(),
            })?;
        if dirs.is_empty() {
            return Err(DomainError::invalid(Self::NAME, "dir", "at least one directory is required"));
        }

        let extensions = params
            .string_list(Self::NAME, "ext")?
            .unwrap_or_else(|| vec![ANY_EXTENSION.to_string()]);
        if extensions.is_empty() {
            return Err(DomainError::invalid(Self::NAME, "ext", "at least one extension is required"));
        }

        let recursive = params.optional_bool(Self::NAME, "recursive")?.unwrap_or(true);
        let mode = params
            .optional_str(Self::NAME, "mode")?
            .map(str::parse::<ExpansionMode>)
            .transpose()?;

        Ok(Self {
            token,
            dirs,
            extensions,
            recursive,
            mode,
        })
    }

    /// The enumeration request for this step.
    pub fn query(&self) -> FileQuery {
        FileQuery::new(PathBuf::new())
            .dirs(self.dirs.iter().map(PathBuf::from))
            .extensions(self.extensions.iter().cloned())
            .recursive(self.recursive)
    }

    /// Expand one command over `files`, in file order.
    pub fn expand_command<'a, I>(&self, command: &str, files: I) -> CommandList
    where
        I: IntoIterator<Item = &'a Path>,
    {
        files
            .into_iter()
            .map(|file| command.replace(&self.token, &file.to_string_lossy()))
            .collect()
    }
}

// ── parent_dir ───────────────────────────────────────────────────────────────

/// `parent_dir`: substitute the parent directory of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentDirSpec {
    pub token: String,
    pub path: String,
}

impl ParentDirSpec {
    pub const NAME: &'static str = "parent_dir";

    pub fn new(token: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            path: path.into(),
        }
    }

    pub fn from_params(params: &Params) -> Result<Self, DomainError> {
        Ok(Self::new(
            params.require_str(Self::NAME, "token")?,
            params.require_str(Self::NAME, "path")?,
        ))
    }

    pub fn parent(&self) -> String {
        path::parent_of(&self.path)
    }

    pub fn apply(&self, commands: CommandList) -> CommandList {
        substitute_all(commands, &self.token, &self.parent())
    }
}

// ── replace ──────────────────────────────────────────────────────────────────

/// `replace`: literal key → value substitutions, applied in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceSpec {
    pub pairs: Vec<(String, String)>,
}

impl ReplaceSpec {
    pub const NAME: &'static str = "replace";

    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Pairs come either from a nested `pairs:` mapping or, when that key is
    /// absent, from the parameters themselves.
    pub fn from_params(params: &Params) -> Result<Self, DomainError> {
        let source = match params.get("pairs") {
            Some(ParamValue::Map(nested)) if params.len() == 1 => nested,
            _ => params,
        };

        let pairs = source
            .iter()
            .map(|(key, value)| {
                if key.is_empty() {
                    return Err(DomainError::invalid(Self::NAME, key, "keys must not be empty"));
                }
                value
                    .to_text()
                    .map(|text| (key.to_string(), text))
                    .ok_or_else(|| {
                        DomainError::invalid(
                            Self::NAME,
                            key,
                            format!("expected a scalar value, found {}", value.kind()),
                        )
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { pairs })
    }

    pub fn apply(&self, commands: CommandList) -> CommandList {
        commands
            .into_iter()
            .map(|cmd| {
                self.pairs
                    .iter()
                    .fold(cmd, |acc, (key, value)| acc.replace(key, value))
            })
            .collect()
    }
}

// ── repeat ───────────────────────────────────────────────────────────────────

/// `repeat`: concatenate the list with itself `count` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatSpec {
    pub count: usize,
}

impl RepeatSpec {
    pub const NAME: &'static str = "repeat";

    pub fn new(n: i64) -> Result<Self, DomainError> {
        let count = usize::try_from(n).map_err(|_| {
            DomainError::invalid(
                Self::NAME,
                "n",
                format!("invalid repetition count {n}: must be zero or positive"),
            )
        })?;
        Ok(Self { count })
    }

    pub fn from_params(params: &Params) -> Result<Self, DomainError> {
        Self::new(params.require_int(Self::NAME, "n")?)
    }

    /// Fails when the repeated list would not fit in memory's address space.
    pub fn apply(&self, commands: CommandList) -> Result<CommandList, DomainError> {
        if commands.is_empty() || self.count == 0 {
            return Ok(CommandList::new());
        }
        let total = commands
            .len()
            .checked_mul(self.count)
            .filter(|&n| n <= isize::MAX as usize / std::mem::size_of::<String>())
            .ok_or_else(|| {
                DomainError::invalid(
                    Self::NAME,
                    "n",
                    format!(
                        "invalid repetition count {}: {} commands would exceed the maximum list size",
                        self.count,
                        commands.len()
                    ),
                )
            })?;

        let mut out = Vec::new();
        out.try_reserve_exact(total).map_err(|_| {
            DomainError::invalid(
                Self::NAME,
                "n",
                format!("invalid repetition count {}: cannot allocate {total} commands", self.count),
            )
        })?;
        for _ in 0..self.count {
            out.extend(commands.iter().cloned());
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn cmds(items: &[&str]) -> CommandList {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn noon() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 31, 12, 30, 5)
            .single()
            .unwrap()
    }

    // ── date ──────────────────────────────────────────────────────────────

    #[test]
    fn date_uses_default_format() {
        let spec = DateSpec::from_params(&Params::new().with("token", "{today}")).unwrap();
        let out = spec.apply(cmds(&["backup-{today}.tar"]), &noon()).unwrap();
        assert_eq!(out, cmds(&["backup-2024-01-31.tar"]));
    }

    #[test]
    fn date_stamps_every_command_identically() {
        let spec = DateSpec::new("@", "%H%M%S").unwrap();
        let out = spec.apply(cmds(&["a @", "b @ @", "c"]), &noon()).unwrap();
        assert_eq!(out, cmds(&["a 123005", "b 123005 123005", "c"]));
    }

    #[test]
    fn date_rejects_malformed_format() {
        let err = DateSpec::new("@", "%Y-%Q-%").unwrap_err();
        assert!(matches!(err, DomainError::InvalidParameter { ref parameter, .. } if parameter == "format"));
    }

    // ── dir_files ─────────────────────────────────────────────────────────

    #[test]
    fn dir_files_params_accept_lists() {
        let params = Params::new()
            .with("token", "{f}")
            .with("dir", vec!["a", "b"])
            .with("ext", vec![".wav", ".flac"])
            .with("recursive", false)
            .with("mode", "accumulate");
        let spec = DirFilesSpec::from_params(&params).unwrap();

        assert_eq!(spec.dirs, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(spec.extensions.len(), 2);
        assert!(!spec.recursive);
        assert_eq!(spec.mode, Some(ExpansionMode::Accumulate));
    }

    #[test]
    fn dir_files_defaults() {
        let spec =
            DirFilesSpec::from_params(&Params::new().with("token", "{f}").with("dir", "in")).unwrap();
        assert_eq!(spec.extensions, vec!["*".to_string()]);
        assert!(spec.recursive);
        assert_eq!(spec.mode, None);
    }

    #[test]
    fn dir_files_requires_dir() {
        let err = DirFilesSpec::from_params(&Params::new().with("token", "{f}")).unwrap_err();
        assert!(matches!(err, DomainError::MissingParameter { ref parameter, .. } if parameter == "dir"));
    }

    #[test]
    fn dir_files_rejects_unknown_mode() {
        let params = Params::new()
            .with("token", "{f}")
            .with("dir", "in")
            .with("mode", "merge");
        assert!(DirFilesSpec::from_params(&params).is_err());
    }

    #[test]
    fn dir_files_expands_one_command_per_file() {
        let spec = DirFilesSpec::new("{f}", "in");
        let files = [PathBuf::from("in/a.txt"), PathBuf::from("in/b.txt")];
        let out = spec.expand_command("cat {f}", files.iter().map(PathBuf::as_path));
        assert_eq!(out, cmds(&["cat in/a.txt", "cat in/b.txt"]));
    }

    // ── parent_dir ────────────────────────────────────────────────────────

    #[test]
    fn parent_dir_ignores_trailing_separator() {
        let with_slash = ParentDirSpec::new("{p}", "/a/b/c/");
        let without = ParentDirSpec::new("{p}", "/a/b/c");
        assert_eq!(with_slash.parent(), "/a/b");
        assert_eq!(with_slash.parent(), without.parent());
        assert_eq!(with_slash.apply(cmds(&["cd {p}"])), cmds(&["cd /a/b"]));
    }

    // ── replace ───────────────────────────────────────────────────────────

    #[test]
    fn replace_applies_every_pair() {
        let spec = ReplaceSpec::new([("A", "1"), ("B", "2")]);
        assert_eq!(spec.apply(cmds(&["A-B"])), cmds(&["1-2"]));
    }

    #[test]
    fn replace_pairs_apply_in_order() {
        // the second pair sees the output of the first
        let spec = ReplaceSpec::new([("x", "y"), ("y", "z")]);
        assert_eq!(spec.apply(cmds(&["x"])), cmds(&["z"]));
    }

    #[test]
    fn replace_without_match_is_noop() {
        let spec = ReplaceSpec::new([("MISSING", "1")]);
        assert_eq!(spec.apply(cmds(&["echo hi"])), cmds(&["echo hi"]));
    }

    #[test]
    fn replace_reads_nested_pairs() {
        let nested = Params::new().with("{a}", "1").with("{b}", 2_i64);
        let mut params = Params::new();
        params.insert("pairs", ParamValue::Map(nested));

        let spec = ReplaceSpec::from_params(&params).unwrap();
        assert_eq!(
            spec.pairs,
            vec![("{a}".to_string(), "1".to_string()), ("{b}".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn replace_rejects_list_values() {
        let params = Params::new().with("K", vec!["a", "b"]);
        assert!(ReplaceSpec::from_params(&params).is_err());
    }

    // ── repeat ────────────────────────────────────────────────────────────

    #[test]
    fn repeat_multiplies_length() {
        let list = cmds(&["a", "b"]);
        assert_eq!(RepeatSpec::new(3).unwrap().apply(list.clone()).unwrap().len(), 6);
        assert_eq!(RepeatSpec::new(1).unwrap().apply(list.clone()).unwrap(), list);
        assert!(RepeatSpec::new(0).unwrap().apply(list).unwrap().is_empty());
    }

    #[test]
    fn repeat_keeps_sequence_order() {
        let out = RepeatSpec::new(2).unwrap().apply(cmds(&["a", "b"])).unwrap();
        assert_eq!(out, cmds(&["a", "b", "a", "b"]));
    }

    #[test]
    fn repeat_huge_count_is_an_error() {
        let err = RepeatSpec::new(i64::MAX)
            .unwrap()
            .apply(cmds(&["a", "b"]))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidParameter { ref parameter, .. } if parameter == "n"));
        assert!(err.to_string().contains("maximum list size"));
    }

    #[test]
    fn repeat_huge_count_of_empty_list_returns_immediately() {
        let out = RepeatSpec::new(i64::MAX).unwrap().apply(CommandList::new()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn repeat_rejects_negative_count() {
        let err = RepeatSpec::new(-1).unwrap_err();
        assert!(err.to_string().contains("invalid repetition count"));
    }

    // ── misc ──────────────────────────────────────────────────────────────

    #[test]
    fn expand_paths_touches_only_path_parameters() {
        let mut t = Transformation::DirFiles(DirFilesSpec::new("{f}", "$IN"));
        t.expand_paths(|k| (k == "IN").then(|| "/data".to_string()));
        match t {
            Transformation::DirFiles(spec) => assert_eq!(spec.dirs, vec!["/data".to_string()]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cardinality_flags() {
        assert!(Transformation::Repeat(RepeatSpec { count: 2 }).changes_cardinality());
        assert!(!Transformation::Replace(ReplaceSpec::default()).changes_cardinality());
    }
}
