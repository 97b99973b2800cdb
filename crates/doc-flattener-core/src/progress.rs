use crate::engine::DirectoryReport;

/// Trait for reporting consolidation progress.
///
/// The CLI implements it with indicatif; tests and library callers use
/// [`SilentReporter`]. All methods have default no-op implementations.
pub trait ProgressReporter {
    fn on_scan_start(&self) {}
    fn on_scan_complete(&self, _directories: usize, _duration_secs: f64) {}
    fn on_consolidate_start(&self, _total_directories: usize) {}
    fn on_directory_start(&self, _index: usize, _directory: &str) {}
    fn on_directory_complete(&self, _report: &DirectoryReport) {}
    fn on_consolidate_complete(&self, _succeeded: usize, _processed: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
