pub mod tree_report;

pub use tree_report::{analyze, DirectoryStats, TreeReport};
