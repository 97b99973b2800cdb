use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Error;
use crate::model::DirectoryPath;
use crate::scanner::{read_entries, EntryError, EntryKind, ScanSkip, TreeScanner};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryStats {
    /// Direct child directories.
    pub subfolders: usize,
    /// Direct child files.
    pub files: usize,
    pub direct_bytes: u64,
    /// Files in this directory and every descendant.
    pub total_files: usize,
    pub total_bytes: u64,
}

/// Read-only structure report of a tree, one row per directory in segment order.
#[derive(Debug, Default)]
pub struct TreeReport {
    pub directories: Vec<(DirectoryPath, DirectoryStats)>,
    pub skipped: Vec<ScanSkip>,
}

impl TreeReport {
    pub fn root_stats(&self) -> Option<&DirectoryStats> {
        self.directories
            .iter()
            .find(|(path, _)| path.is_root())
            .map(|(_, stats)| stats)
    }

    pub fn get(&self, path: &DirectoryPath) -> Option<&DirectoryStats> {
        self.directories
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, stats)| stats)
    }
}

/// Everything one recursive call learned about its subtree.
#[derive(Default)]
struct Subtree {
    directories: BTreeMap<DirectoryPath, DirectoryStats>,
    skipped: Vec<ScanSkip>,
    files: usize,
    bytes: u64,
}

impl Subtree {
    fn absorb(&mut self, child: Subtree) {
        self.directories.extend(child.directories);
        self.skipped.extend(child.skipped);
        self.files += child.files;
        self.bytes += child.bytes;
    }
}

/// Walk `root` and collect per-directory counts and sizes.
///
/// Directories excluded by `scanner` are left out entirely; symlinked
/// directories are not followed. Unreadable directories are reported in
/// `skipped` and contribute nothing.
pub fn analyze(root: &Path, scanner: &TreeScanner) -> Result<TreeReport, Error> {
    let root = TreeScanner::open_root(root)?;
    let subtree = visit(&root, &root, DirectoryPath::root(), scanner);
    debug!(
        "Analyzed {} directories, {} files, {} bytes",
        subtree.directories.len(),
        subtree.files,
        subtree.bytes
    );
    Ok(TreeReport {
        directories: subtree.directories.into_iter().collect(),
        skipped: subtree.skipped,
    })
}

fn visit(root: &Path, dir: &Path, relative: DirectoryPath, scanner: &TreeScanner) -> Subtree {
    let entries = match read_entries(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("Skipping unreadable directory {}: {}", dir.display(), err);
            return Subtree {
                skipped: vec![ScanSkip {
                    path: dir.to_path_buf(),
                    reason: err.to_string(),
                }],
                ..Subtree::default()
            };
        }
    };

    let mut stats = DirectoryStats::default();
    let mut subtree = Subtree::default();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(EntryError { path, error }) => {
                warn!("Cannot read metadata for {}: {}", path.display(), error);
                continue;
            }
        };

        match entry.kind {
            EntryKind::Directory => {
                if entry.is_symlink || scanner.is_excluded_dir(root, &entry.path) {
                    continue;
                }
                stats.subfolders += 1;
                let child = visit(root, &entry.path, relative.child(&entry.name), scanner);
                subtree.absorb(child);
            }
            EntryKind::File => {
                stats.files += 1;
                stats.direct_bytes += entry.size_bytes;
            }
            EntryKind::Other => {}
        }
    }

    stats.total_files = stats.files + subtree.files;
    stats.total_bytes = stats.direct_bytes + subtree.bytes;
    subtree.files = stats.total_files;
    subtree.bytes = stats.total_bytes;
    subtree.directories.insert(relative, stats);
    subtree
}
