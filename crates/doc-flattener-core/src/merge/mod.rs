pub mod pdf;

pub use pdf::PdfAssembler;

use lopdf::Document;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::model::{CandidateFile, EligibleFileSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedInput {
    pub path: PathBuf,
    pub page_count: usize,
}

/// Per-file results of importing a directory's inputs, in input order.
#[derive(Debug, Default, Clone)]
pub struct ImportBatch {
    pub imported: Vec<ImportedInput>,
    pub failures: Vec<ImportFailure>,
}

impl ImportBatch {
    pub fn page_count(&self) -> usize {
        self.imported.iter().map(|i| i.page_count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The set was empty; nothing was written.
    Nothing,
    /// A single input was copied byte for byte. `page_count` is 0 when the
    /// input could not be parsed for counting.
    Copied { page_count: usize, size_bytes: u64 },
    Merged {
        page_count: usize,
        size_bytes: u64,
        imported: usize,
        failures: Vec<ImportFailure>,
    },
}

/// Consolidate `files` into `output`.
///
/// The output is written to a temporary file beside it and renamed into
/// place only once complete, so a failed merge leaves nothing behind.
pub fn merge(files: &EligibleFileSet, output: &Path) -> Result<MergeOutcome, Error> {
    match files.files() {
        [] => {
            info!("Nothing to merge in {}", files.directory());
            Ok(MergeOutcome::Nothing)
        }
        [single] => copy_single(single, output),
        many => merge_many(many, output),
    }
}

fn copy_single(file: &CandidateFile, output: &Path) -> Result<MergeOutcome, Error> {
    let size_bytes = write_atomically(output, |tmp| {
        let mut source = File::open(&file.path)?;
        io::copy(&mut source, tmp)?;
        Ok(())
    })?;

    let page_count = match Document::load(&file.path) {
        Ok(document) => document.get_pages().len(),
        Err(e) => {
            debug!("Could not count pages of {}: {}", file.path.display(), e);
            0
        }
    };

    info!("Copied {} -> {}", file.path.display(), output.display());
    Ok(MergeOutcome::Copied {
        page_count,
        size_bytes,
    })
}

fn merge_many(files: &[CandidateFile], output: &Path) -> Result<MergeOutcome, Error> {
    let mut assembler = PdfAssembler::new();
    let batch = import_all(&mut assembler, files);

    if batch.imported.is_empty() {
        return Err(Error::NothingImported(files.len()));
    }

    let (mut document, page_count) = assembler.finish()?;
    let size_bytes = write_atomically(output, |tmp| {
        document.save_to(tmp)?;
        Ok(())
    })?;

    info!(
        "Merged {}/{} files ({} pages) -> {}",
        batch.imported.len(),
        files.len(),
        page_count,
        output.display()
    );
    Ok(MergeOutcome::Merged {
        page_count,
        size_bytes,
        imported: batch.imported.len(),
        failures: batch.failures,
    })
}

/// Import each file in order. A file that fails is recorded and skipped.
pub fn import_all(assembler: &mut PdfAssembler, files: &[CandidateFile]) -> ImportBatch {
    let mut batch = ImportBatch::default();
    for file in files {
        match assembler.import_file(&file.path) {
            Ok(page_count) => {
                debug!("Imported {} ({} pages)", file.path.display(), page_count);
                batch.imported.push(ImportedInput {
                    path: file.path.clone(),
                    page_count,
                });
            }
            Err(e) => {
                warn!("Skipping {}: {}", file.path.display(), e);
                batch.failures.push(ImportFailure {
                    path: file.path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    batch
}

fn write_atomically<F>(output: &Path, write: F) -> Result<u64, Error>
where
    F: FnOnce(&mut NamedTempFile) -> Result<(), Error>,
{
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    write(&mut tmp)?;
    tmp.as_file().sync_all()?;
    let file = tmp.persist(output).map_err(|e| Error::Io(e.error))?;
    Ok(file.metadata()?.len())
}
