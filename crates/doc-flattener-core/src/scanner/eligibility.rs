use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::has_consolidation_extension;
use crate::model::{CandidateFile, DirectoryPath, EligibleFileSet};
use crate::DEFAULT_MIN_FILE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// One directory entry with symlinks already resolved.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    /// The entry itself is a symlink; `kind` describes its target.
    pub is_symlink: bool,
    pub size_bytes: u64,
}

#[derive(Debug)]
pub struct EntryError {
    pub path: PathBuf,
    pub error: io::Error,
}

pub type RawEntry = Result<EntryInfo, EntryError>;

/// List the direct children of `dir`. Only the listing itself can fail;
/// a child that cannot be stat'ed comes back as an `Err` item.
pub fn read_entries(dir: &Path) -> io::Result<Vec<RawEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                entries.push(Err(EntryError {
                    path: dir.to_path_buf(),
                    error,
                }));
                continue;
            }
        };

        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
        entries.push(match fs::metadata(&path) {
            Ok(metadata) => Ok(EntryInfo {
                name,
                kind: if metadata.is_file() {
                    EntryKind::File
                } else if metadata.is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::Other
                },
                is_symlink,
                size_bytes: metadata.len(),
                path,
            }),
            Err(error) => Err(EntryError { path, error }),
        });
    }
    Ok(entries)
}

/// Selects the files of one directory that go into its artifact: PDFs of at
/// least `min_file_size` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityFilter {
    min_file_size: u64,
}

impl Default for EligibilityFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_FILE_SIZE)
    }
}

impl EligibilityFilter {
    pub fn new(min_file_size: u64) -> Self {
        Self { min_file_size }
    }

    pub fn min_file_size(&self) -> u64 {
        self.min_file_size
    }

    pub fn is_eligible(&self, entry: &EntryInfo) -> bool {
        entry.kind == EntryKind::File
            && has_consolidation_extension(&entry.name)
            && entry.size_bytes >= self.min_file_size
    }

    pub fn filter(&self, directory: DirectoryPath, entries: Vec<RawEntry>) -> EligibleFileSet {
        let mut files = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(EntryError { path, error }) => {
                    warn!("Skipping {}: cannot read metadata: {}", path.display(), error);
                    continue;
                }
            };

            if self.is_eligible(&entry) {
                files.push(CandidateFile {
                    name: entry.name,
                    path: entry.path,
                    size_bytes: entry.size_bytes,
                });
            } else if entry.kind == EntryKind::File && has_consolidation_extension(&entry.name) {
                debug!(
                    "Skipping noise file {} ({} bytes < {})",
                    entry.path.display(),
                    entry.size_bytes,
                    self.min_file_size
                );
            }
        }
        EligibleFileSet::new(directory, files)
    }
}
