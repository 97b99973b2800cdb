use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Cannot read root directory {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("None of the {0} input files could be imported")]
    NothingImported(usize),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Fatal errors abort the whole run; everything else is scoped to one directory.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::RootUnreadable { .. } | Error::OutputDir { .. })
    }
}
