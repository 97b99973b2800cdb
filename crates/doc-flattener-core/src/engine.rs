use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::error::Error;
use crate::merge::{self, ImportFailure, MergeOutcome};
use crate::model::{DirectoryPath, OutputArtifact};
use crate::naming::artifact_name;
use crate::progress::{ProgressReporter, SilentReporter};
use crate::scanner::{read_entries, EligibilityFilter, ScanSkip, TreeScanner};

/// Drives scan, filter, merge and naming over one root.
pub struct ConsolidationEngine {
    root: PathBuf,
    output_dir: PathBuf,
    filter: EligibilityFilter,
    ignore_patterns: Vec<String>,
    dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryOutcome {
    Merged {
        artifact: OutputArtifact,
        failures: Vec<ImportFailure>,
    },
    Copied {
        artifact: OutputArtifact,
    },
    /// No file in the directory passed the eligibility filter.
    Skipped,
    /// Dry run: `files` inputs would have been consolidated.
    Planned {
        files: usize,
    },
    Failed {
        reason: String,
    },
}

impl DirectoryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            DirectoryOutcome::Merged { .. } | DirectoryOutcome::Copied { .. }
        )
    }

    pub fn artifact(&self) -> Option<&OutputArtifact> {
        match self {
            DirectoryOutcome::Merged { artifact, .. } | DirectoryOutcome::Copied { artifact } => {
                Some(artifact)
            }
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DirectoryOutcome::Merged { .. } => "merged",
            DirectoryOutcome::Copied { .. } => "copied",
            DirectoryOutcome::Skipped => "skipped",
            DirectoryOutcome::Planned { .. } => "planned",
            DirectoryOutcome::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryReport {
    /// 1-based position in the scan order; also the artifact's name prefix.
    pub index: usize,
    pub source: DirectoryPath,
    pub file_name: String,
    pub eligible_files: usize,
    pub outcome: DirectoryOutcome,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub directories: Vec<DirectoryReport>,
    pub scan_skipped: Vec<ScanSkip>,
    pub scan_duration: Duration,
    pub consolidate_duration: Duration,
}

impl RunSummary {
    pub fn artifact_names(&self) -> Vec<&str> {
        self.directories
            .iter()
            .filter_map(|d| d.outcome.artifact().map(|a| a.file_name.as_str()))
            .collect()
    }

    pub fn failed(&self) -> usize {
        self.directories
            .iter()
            .filter(|d| matches!(d.outcome, DirectoryOutcome::Failed { .. }))
            .count()
    }
}

/// Consolidate `root` into `output_dir` with default settings otherwise.
pub fn run(root: &Path, output_dir: &Path, min_file_size: u64) -> Result<RunSummary, Error> {
    ConsolidationEngine::new(&AppConfig::default())
        .with_root(root)
        .with_output_dir(output_dir)
        .with_min_file_size(min_file_size)
        .run(&SilentReporter)
}

impl ConsolidationEngine {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root_path),
            output_dir: PathBuf::from(&config.output_dir),
            filter: EligibilityFilter::new(config.min_file_size),
            ignore_patterns: config.ignore_patterns.clone(),
            dry_run: false,
        }
    }

    pub fn with_root(mut self, root: &Path) -> Self {
        self.root = root.to_path_buf();
        self
    }

    pub fn with_output_dir(mut self, output_dir: &Path) -> Self {
        self.output_dir = output_dir.to_path_buf();
        self
    }

    pub fn with_min_file_size(mut self, min_file_size: u64) -> Self {
        self.filter = EligibilityFilter::new(min_file_size);
        self
    }

    /// Scan, filter and name without creating or writing anything.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the pipeline:
    /// 1. Check the root and create the output directory (both fatal on failure)
    /// 2. Scan for directories holding PDFs, in segment order
    /// 3. Per directory: filter, merge or copy, record the outcome
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<RunSummary, Error> {
        let root = TreeScanner::open_root(&self.root)?;

        if !self.dry_run {
            fs::create_dir_all(&self.output_dir).map_err(|source| Error::OutputDir {
                path: self.output_dir.clone(),
                source,
            })?;
        }

        info!("Scanning {} for documents...", root.display());
        reporter.on_scan_start();
        let scan_start = Instant::now();
        let scan = TreeScanner::new()
            .with_ignore_patterns(&self.ignore_patterns)
            .exclude_dir(&self.output_dir)
            .scan(&root)?;
        let scan_duration = scan_start.elapsed();
        reporter.on_scan_complete(scan.directories.len(), scan_duration.as_secs_f64());
        debug!(
            "Scan completed in {:.2}s, {} content directories, {} unreadable",
            scan_duration.as_secs_f64(),
            scan.directories.len(),
            scan.skipped.len(),
        );

        reporter.on_consolidate_start(scan.directories.len());
        let consolidate_start = Instant::now();
        let mut summary = RunSummary {
            scan_skipped: scan.skipped,
            scan_duration,
            ..RunSummary::default()
        };

        for (position, directory) in scan.directories.into_iter().enumerate() {
            let index = position + 1;
            reporter.on_directory_start(index, &directory.to_string());
            let report = self.consolidate_directory(&root, index, directory);

            summary.processed += 1;
            if report.outcome.is_success() {
                summary.succeeded += 1;
            }
            reporter.on_directory_complete(&report);
            summary.directories.push(report);
        }

        summary.consolidate_duration = consolidate_start.elapsed();
        reporter.on_consolidate_complete(
            summary.succeeded,
            summary.processed,
            summary.consolidate_duration.as_secs_f64(),
        );
        info!(
            "{} of {} directories consolidated",
            summary.succeeded, summary.processed
        );

        Ok(summary)
    }

    fn consolidate_directory(
        &self,
        root: &Path,
        index: usize,
        directory: DirectoryPath,
    ) -> DirectoryReport {
        let file_name = artifact_name(&directory, index);
        let dir_path = directory.to_path(root);

        let entries = match read_entries(&dir_path) {
            Ok(entries) => entries,
            Err(e) => {
                error!("Cannot list {}: {}", dir_path.display(), e);
                return DirectoryReport {
                    index,
                    source: directory,
                    file_name,
                    eligible_files: 0,
                    outcome: DirectoryOutcome::Failed {
                        reason: format!("cannot list directory: {}", e),
                    },
                };
            }
        };

        let files = self.filter.filter(directory.clone(), entries);
        let eligible_files = files.len();

        let outcome = if files.is_empty() {
            debug!("No eligible files in {}", directory);
            DirectoryOutcome::Skipped
        } else if self.dry_run {
            DirectoryOutcome::Planned {
                files: eligible_files,
            }
        } else {
            let output = self.output_dir.join(&file_name);
            let artifact = |page_count, size_bytes| OutputArtifact {
                file_name: file_name.clone(),
                source_directory: directory.clone(),
                page_count,
                size_bytes,
            };
            match merge::merge(&files, &output) {
                Ok(MergeOutcome::Merged {
                    page_count,
                    size_bytes,
                    failures,
                    ..
                }) => DirectoryOutcome::Merged {
                    artifact: artifact(page_count, size_bytes),
                    failures,
                },
                Ok(MergeOutcome::Copied {
                    page_count,
                    size_bytes,
                }) => DirectoryOutcome::Copied {
                    artifact: artifact(page_count, size_bytes),
                },
                Ok(MergeOutcome::Nothing) => DirectoryOutcome::Skipped,
                Err(e) => {
                    error!("Failed to consolidate {}: {}", directory, e);
                    DirectoryOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            }
        };

        DirectoryReport {
            index,
            source: directory,
            file_name,
            eligible_files,
            outcome,
        }
    }
}
