//! In-memory enumerator for testing.

use std::{
    collections::BTreeSet,
    path::{Component, Path, PathBuf},
    sync::{Arc, RwLock},
};

use recp_core::{
    application::{ApplicationError, ports::FileEnumerator},
    domain::{
        FileQuery, FileSet,
        file_set::{extension_matches, is_hidden},
    },
    error::RecpResult,
};

/// In-memory directory tree for testing.
///
/// Adding a file registers all of its ancestors as directories. Paths are
/// compared as given, so use the same form in queries as when populating.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileEnumerator {
    inner: Arc<RwLock<MemoryTree>>,
}

#[derive(Debug, Default)]
struct MemoryTree {
    files: BTreeSet<PathBuf>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryTree {
    fn add_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.directories.insert(ancestor.to_path_buf());
        }
    }
}

impl MemoryFileEnumerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`add_file`](Self::add_file).
    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        self.add_file(path);
        self
    }

    /// Builder form of [`add_dir`](Self::add_dir).
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.add_dir(path);
        self
    }

    pub fn add_file(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        if let Ok(mut inner) = self.inner.write() {
            inner.add_ancestors(&path);
            inner.files.insert(path);
        }
    }

    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        if let Ok(mut inner) = self.inner.write() {
            inner.add_ancestors(&path);
            inner.directories.insert(path);
        }
    }

    /// Remove every file and directory.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
        }
    }
}

impl FileEnumerator for MemoryFileEnumerator {
    fn enumerate(&self, query: &FileQuery) -> RecpResult<FileSet> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if let Some(missing) = query
            .dirs
            .iter()
            .find(|dir| !inner.directories.contains(*dir))
        {
            return Err(ApplicationError::DirectoryNotFound {
                path: missing.clone(),
            }
            .into());
        }

        let mut paths = Vec::new();
        for dir in &query.dirs {
            for file in &inner.files {
                let Ok(relative) = file.strip_prefix(dir) else {
                    continue;
                };
                if !visible_at_depth(relative, query.recursive) {
                    continue;
                }
                let name = relative
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default();
                for ext in &query.extensions {
                    if extension_matches(&name, ext) {
                        paths.push(file.clone());
                    }
                }
            }
        }

        Ok(FileSet::sorted(paths, &query.sort))
    }
}

/// No hidden component, and directly inside the root unless recursive.
fn visible_at_depth(relative: &Path, recursive: bool) -> bool {
    let mut depth = 0;
    for component in relative.components() {
        let Component::Normal(name) = component else {
            return false;
        };
        if is_hidden(&name.to_string_lossy()) {
            return false;
        }
        depth += 1;
    }
    depth >= 1 && (recursive || depth == 1)
}
