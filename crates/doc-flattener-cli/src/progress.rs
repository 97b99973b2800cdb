use colored::*;
use doc_flattener_core::{DirectoryReport, ProgressReporter};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// CLI progress reporter using indicatif progress bars.
///
/// - Scan phase: spinner (directory count unknown upfront)
/// - Consolidate phase: progress bar over the scanned directories
pub struct CliReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        if let Some(old) = self.bar.borrow_mut().replace(pb) {
            old.finish_and_clear();
        }
    }

    fn finish_bar(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            f(pb);
        }
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .progress_chars("━╸─")
        .tick_chars(TICK_CHARS)
}

impl ProgressReporter for CliReporter {
    fn on_scan_start(&self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(style("{spinner:.cyan} {msg}"));
        pb.set_message("Scanning for documents...");
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_scan_complete(&self, directories: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  {} Scan complete: {} folders with documents in {:.2}s",
            "✓".green(),
            directories,
            duration_secs
        );
    }

    fn on_consolidate_start(&self, total_directories: usize) {
        let pb = ProgressBar::new(total_directories as u64);
        pb.set_style(style(
            "  {spinner:.cyan} Consolidating [{bar:30.cyan/dim}] {pos}/{len} {msg}",
        ));
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_directory_start(&self, _index: usize, directory: &str) {
        let directory = directory.to_string();
        self.with_bar(|pb| pb.set_message(directory));
    }

    fn on_directory_complete(&self, _report: &DirectoryReport) {
        self.with_bar(|pb| pb.inc(1));
    }

    fn on_consolidate_complete(&self, succeeded: usize, processed: usize, duration_secs: f64) {
        self.finish_bar();
        let mark = if succeeded == processed {
            "✓".green()
        } else {
            "!".yellow()
        };
        eprintln!(
            "  {} Consolidation complete: {}/{} folders in {:.2}s",
            mark, succeeded, processed, duration_secs
        );
    }
}
