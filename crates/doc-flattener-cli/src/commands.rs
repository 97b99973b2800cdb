use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "doc-flattener")]
#[command(about = "Flatten an exported documentation tree into one PDF per folder", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Merge each folder's PDFs into a single document in the output directory
    Consolidate(ConsolidateArgs),
    /// Print subfolder count, file count and cumulative size per folder
    Analyze(AnalyzeArgs),
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Args)]
pub struct ConsolidateArgs {
    /// Root of the exported tree (overrides `root_path`)
    #[arg(long)]
    pub root: Option<PathBuf>,
    /// Directory to write consolidated PDFs to (overrides `output_dir`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Files smaller than this many bytes are ignored (overrides `min_file_size`)
    #[arg(long)]
    pub min_size: Option<u64>,
    /// Show what would be produced without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Root of the tree to analyze (overrides `root_path`)
    #[arg(long)]
    pub root: Option<PathBuf>,
    /// Also write the report to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
