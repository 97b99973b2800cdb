use doc_flattener_core::analysis::TreeReport;
use doc_flattener_core::{DirectoryOutcome, RunSummary};
use indicatif::{HumanBytes, HumanCount};
use std::fs::File;
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Folder")]
    source: String,
    #[tabled(rename = "Artifact")]
    artifact: String,
    #[tabled(rename = "Files")]
    files: usize,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Pages")]
    pages: String,
    #[tabled(rename = "Size")]
    size: String,
}

#[derive(Debug, Clone, Tabled)]
struct TreeRow {
    #[tabled(rename = "Folder")]
    directory: String,
    #[tabled(rename = "Subfolders")]
    subfolders: String,
    #[tabled(rename = "Files")]
    files: String,
    #[tabled(rename = "Files (total)")]
    total_files: String,
    #[tabled(rename = "Size (total)")]
    total_size: String,
}

pub fn print_summary(summary: &RunSummary) {
    let rows: Vec<SummaryRow> = summary
        .directories
        .iter()
        .map(|report| {
            let (pages, size) = match report.outcome.artifact() {
                Some(artifact) => (
                    artifact.page_count.to_string(),
                    HumanBytes(artifact.size_bytes).to_string(),
                ),
                None => ("-".to_string(), "-".to_string()),
            };
            let outcome = match &report.outcome {
                DirectoryOutcome::Merged { failures, .. } if !failures.is_empty() => {
                    format!("merged ({} skipped)", failures.len())
                }
                DirectoryOutcome::Failed { reason } => format!("failed: {}", reason),
                other => other.label().to_string(),
            };
            SummaryRow {
                index: report.index,
                source: report.source.to_string(),
                artifact: report.file_name.clone(),
                files: report.eligible_files,
                outcome,
                pages,
                size,
            }
        })
        .collect();

    if !rows.is_empty() {
        println!("{}", Table::new(rows).with(Style::psql()));
    }

    for report in &summary.directories {
        if let DirectoryOutcome::Merged { failures, .. } = &report.outcome {
            for failure in failures {
                println!("  skipped {}: {}", failure.path.display(), failure.reason);
            }
        }
    }
    for skip in &summary.scan_skipped {
        println!("  unreadable {}: {}", skip.path.display(), skip.reason);
    }
}

pub fn print_tree_report(report: &TreeReport) {
    let rows: Vec<TreeRow> = report
        .directories
        .iter()
        .map(|(path, stats)| TreeRow {
            directory: path.to_string(),
            subfolders: HumanCount(stats.subfolders as u64).to_string(),
            files: HumanCount(stats.files as u64).to_string(),
            total_files: HumanCount(stats.total_files as u64).to_string(),
            total_size: HumanBytes(stats.total_bytes).to_string(),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::psql()));

    for skip in &report.skipped {
        println!("  unreadable {}: {}", skip.path.display(), skip.reason);
    }
}

/// Raw numbers, one row per folder, with a header row.
pub fn write_tree_csv(report: &TreeReport, path: &Path) -> csv::Result<()> {
    let file = File::create(path)?;
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "folder",
        "subfolders",
        "files",
        "direct_bytes",
        "total_files",
        "total_bytes",
    ])?;
    for (directory, stats) in &report.directories {
        wtr.write_record([
            directory.to_string(),
            stats.subfolders.to_string(),
            stats.files.to_string(),
            stats.direct_bytes.to_string(),
            stats.total_files.to_string(),
            stats.total_bytes.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
