//! File enumeration requests and results.
//!
//! The enumeration itself is performed by a [`FileEnumerator`] adapter; this
//! module holds the parts of the contract every adapter must agree on:
//! which names match an extension filter, and how results are ordered.
//!
//! [`FileEnumerator`]: crate::application::ports::FileEnumerator

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Extension filter that matches every file.
pub const ANY_EXTENSION: &str = "*";

/// Key function for custom orderings.
pub type SortKey = Arc<dyn Fn(&Path) -> String + Send + Sync>;

/// Ordering applied to an enumeration result.
#[derive(Clone, Default)]
pub enum SortOrder {
    /// Byte-wise lexicographic order of the full path text.
    #[default]
    Lexicographic,
    /// Order by the caller-supplied key, ties broken lexicographically.
    ByKey(SortKey),
}

impl SortOrder {
    pub fn by_key<F>(key: F) -> Self
    where
        F: Fn(&Path) -> String + Send + Sync + 'static,
    {
        Self::ByKey(Arc::new(key))
    }
}

impl fmt::Debug for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexicographic => f.write_str("Lexicographic"),
            Self::ByKey(_) => f.write_str("ByKey(<fn>)"),
        }
    }
}

/// What to enumerate.
#[derive(Debug, Clone)]
pub struct FileQuery {
    pub dirs: Vec<PathBuf>,
    pub extensions: Vec<String>,
    pub recursive: bool,
    pub sort: SortOrder,
}

impl FileQuery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dirs: vec![dir.into()],
            extensions: vec![ANY_EXTENSION.to_string()],
            recursive: true,
            sort: SortOrder::default(),
        }
    }

    pub fn dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

/// Whether a file name is picked up by one extension filter.
///
/// Filters behave like the shell pattern `*{ext}`: a leading `*` is
/// optional, `*` alone matches everything, and hidden names (leading `.`)
/// never match.
pub fn extension_matches(file_name: &str, extension: &str) -> bool {
    if file_name.starts_with('.') {
        return false;
    }
    file_name.ends_with(extension.trim_start_matches('*'))
}

/// Whether a directory entry below the search root is hidden.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}

/// Sorted result of an enumeration. Contains only regular files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    paths: Vec<PathBuf>,
}

impl FileSet {
    /// Sort `paths` according to `order`.
    pub fn sorted(mut paths: Vec<PathBuf>, order: &SortOrder) -> Self {
        match order {
            SortOrder::Lexicographic => paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str())),
            SortOrder::ByKey(key) => paths.sort_by(|a, b| {
                key(a)
                    .cmp(&key(b))
                    .then_with(|| a.as_os_str().cmp(b.as_os_str()))
            }),
        }
        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn into_vec(self) -> Vec<PathBuf> {
        self.paths
    }
}
