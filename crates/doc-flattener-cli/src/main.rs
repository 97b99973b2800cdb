mod commands;
mod logging;
mod progress;
mod report;

use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{AnalyzeArgs, Cli, Commands, ConsolidateArgs};
use doc_flattener_core::scanner::TreeScanner;
use doc_flattener_core::{AppConfig, ConsolidationEngine};
use dotenv::dotenv;
use progress::CliReporter;
use std::path::PathBuf;
use tracing::{error, info};

fn main() {
    dotenv().ok();

    let guard = logging::init_logger();

    let config = match doc_flattener_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            drop(guard);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    let result = match args.command {
        Some(Commands::Consolidate(args)) => run_consolidate(&config, args),
        Some(Commands::Analyze(args)) => run_analyze(&config, args),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
            Ok(())
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = result {
        error!("Error: {}", err);
        drop(guard);
        process::exit(1);
    }
}

fn run_consolidate(
    config: &AppConfig,
    args: ConsolidateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = ConsolidationEngine::new(config).with_dry_run(args.dry_run);
    if let Some(root) = &args.root {
        engine = engine.with_root(root);
    }
    if let Some(output) = &args.output {
        engine = engine.with_output_dir(output);
    }
    if let Some(min_size) = args.min_size {
        engine = engine.with_min_file_size(min_size);
    }

    let reporter = CliReporter::new();
    let summary = engine.run(&reporter)?;

    println!();
    report::print_summary(&summary);
    info!(
        "Scan: {}, Consolidate: {}",
        format!("{:.2}s", summary.scan_duration.as_secs_f64()).green(),
        format!("{:.2}s", summary.consolidate_duration.as_secs_f64()).green(),
    );
    info!(
        "{} folders processed, {} consolidated, {} failed",
        format!("{}", summary.processed).cyan(),
        format!("{}", summary.succeeded).green(),
        format!("{}", summary.failed()).red(),
    );
    let artifacts = summary.artifact_names();
    if !artifacts.is_empty() {
        info!("Produced: {}", artifacts.join(", "));
    }

    Ok(())
}

fn run_analyze(config: &AppConfig, args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let root = args
        .root
        .unwrap_or_else(|| PathBuf::from(&config.root_path));
    let scanner = TreeScanner::new().with_ignore_patterns(&config.ignore_patterns);

    info!("Analyzing {}...", root.display());
    let tree = doc_flattener_core::analysis::analyze(&root, &scanner)?;
    report::print_tree_report(&tree);

    if let Some(csv_path) = args.csv {
        report::write_tree_csv(&tree, &csv_path)?;
        info!("Report written to {}", csv_path.display());
    }

    Ok(())
}
