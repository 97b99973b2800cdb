pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod merge;
pub mod model;
pub mod naming;
pub mod progress;
pub mod scanner;

pub use config::AppConfig;
pub use engine::{ConsolidationEngine, DirectoryOutcome, DirectoryReport, RunSummary};
pub use error::Error;
pub use model::{CandidateFile, DirectoryPath, EligibleFileSet, OutputArtifact};
pub use progress::{ProgressReporter, SilentReporter};

/// Extension of the documents this tool consolidates, compared case-insensitively.
pub const CONSOLIDATION_EXTENSION: &str = "pdf";

/// Files smaller than this are treated as export stubs rather than content.
pub const DEFAULT_MIN_FILE_SIZE: u64 = 20 * 1024;

pub const DEFAULT_OUTPUT_DIR: &str = "output";
