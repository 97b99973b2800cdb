use glob::Pattern;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};
use walkdir::{DirEntry, WalkDir};

use super::has_consolidation_extension;
use crate::error::Error;
use crate::model::DirectoryPath;

/// Directories that directly hold at least one PDF, in segment order.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub directories: Vec<DirectoryPath>,
    /// Directories whose contents could not be listed. Their subtrees are absent.
    pub skipped: Vec<ScanSkip>,
}

#[derive(Debug, Clone)]
pub struct ScanSkip {
    pub path: PathBuf,
    pub reason: String,
}

/// Depth-first directory walk. A directory qualifies on its own files only;
/// every subdirectory is visited whether or not its parent qualified.
#[derive(Debug, Default, Clone)]
pub struct TreeScanner {
    excluded: Vec<PathBuf>,
    ignore_patterns: Vec<Pattern>,
}

impl TreeScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalid globs are logged and dropped.
    pub fn with_ignore_patterns(mut self, globs: &[String]) -> Self {
        self.ignore_patterns = globs
            .iter()
            .filter_map(|glob| match Pattern::new(glob) {
                Ok(p) => Some(p),
                Err(e) => {
                    error!("Invalid glob pattern '{}': {}", glob, e);
                    None
                }
            })
            .collect();
        self
    }

    /// Never descend into `dir`. Used to keep the output directory out of the scan.
    pub fn exclude_dir(mut self, dir: &Path) -> Self {
        let dir = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
        self.excluded.push(dir);
        self
    }

    /// Canonicalize `root` and check that it can be listed at all.
    pub fn open_root(root: &Path) -> Result<PathBuf, Error> {
        let unreadable = |source| Error::RootUnreadable {
            path: root.to_path_buf(),
            source,
        };
        let canonical = fs::canonicalize(root).map_err(unreadable)?;
        fs::read_dir(&canonical).map_err(unreadable)?;
        Ok(canonical)
    }

    pub fn scan(&self, root: &Path) -> Result<ScanResult, Error> {
        let root = Self::open_root(root)?;

        let mut found: BTreeSet<DirectoryPath> = BTreeSet::new();
        let mut skipped = Vec::new();

        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_entry(&root, entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.clone());
                    warn!("Skipping unreadable directory {}: {}", path.display(), err);
                    skipped.push(ScanSkip {
                        path,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            if !is_regular_file(&entry)
                || !has_consolidation_extension(&entry.file_name().to_string_lossy())
            {
                continue;
            }

            let parent = entry.path().parent().unwrap_or(&root);
            let relative = parent.strip_prefix(&root).unwrap_or(Path::new(""));
            if found.insert(DirectoryPath::from_relative(relative)) {
                debug!("Found content directory {}", parent.display());
            }
        }

        Ok(ScanResult {
            directories: found.into_iter().collect(),
            skipped,
        })
    }

    /// Whether a directory below `root` is excluded or matches an ignore pattern.
    pub fn is_excluded_dir(&self, root: &Path, dir: &Path) -> bool {
        if self.excluded.iter().any(|excluded| excluded == dir) {
            return true;
        }
        let relative = dir.strip_prefix(root).unwrap_or(dir);
        let name = dir.file_name().map(Path::new);
        self.ignore_patterns.iter().any(|pattern| {
            pattern.matches_path(dir)
                || pattern.matches_path(relative)
                || name.is_some_and(|name| pattern.matches_path(name))
        })
    }

    fn is_excluded_entry(&self, root: &Path, entry: &DirEntry) -> bool {
        entry.depth() > 0 && entry.file_type().is_dir() && self.is_excluded_dir(root, entry.path())
    }
}

/// Regular files, plus symlinks that resolve to one.
fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}
