//! Local filesystem enumerator using walkdir.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::{DirEntry, WalkDir};

use recp_core::{
    application::{ApplicationError, ports::FileEnumerator},
    domain::{
        FileQuery, FileSet,
        file_set::{extension_matches, is_hidden},
    },
    error::RecpResult,
};

/// Production enumerator reading the real filesystem.
///
/// Matches what a shell glob of `dir/**/*ext` would return: hidden entries
/// are skipped and hidden directories are not entered. Symbolic links are
/// followed; a link cycle is logged and skipped rather than walked forever.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileEnumerator;

impl LocalFileEnumerator {
    pub fn new() -> Self {
        Self
    }

    fn walk(&self, dir: &Path, query: &FileQuery, out: &mut Vec<PathBuf>) {
        let mut walker = WalkDir::new(dir).min_depth(1).follow_links(true);
        if !query.recursive {
            walker = walker.max_depth(1);
        }

        let entries = walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !entry_is_hidden(e));

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy();
            let matching = query
                .extensions
                .iter()
                .filter(|ext| extension_matches(&name, ext))
                .count();
            if matching == 0 {
                continue;
            }

            // A directory named `take.wav` must not be reported.
            if !is_regular_file(entry.path()) {
                debug!(path = %entry.path().display(), "Excluding non-file match");
                continue;
            }

            // One entry per matching filter, so overlapping filters repeat a path.
            for _ in 0..matching {
                out.push(entry.path().to_path_buf());
            }
        }
    }
}

impl FileEnumerator for LocalFileEnumerator {
    #[instrument(skip_all, fields(dirs = query.dirs.len(), recursive = query.recursive))]
    fn enumerate(&self, query: &FileQuery) -> RecpResult<FileSet> {
        if let Some(missing) = query.dirs.iter().find(|dir| !dir.is_dir()) {
            return Err(ApplicationError::DirectoryNotFound {
                path: missing.clone(),
            }
            .into());
        }

        let mut paths = Vec::new();
        for dir in &query.dirs {
            self.walk(dir, query, &mut paths);
        }

        debug!(count = paths.len(), "Enumerated files");
        Ok(FileSet::sorted(paths, &query.sort))
    }
}

fn entry_is_hidden(entry: &DirEntry) -> bool {
    is_hidden(&entry.file_name().to_string_lossy())
}

/// Follows symlinks, as the check happens on the final target.
fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
