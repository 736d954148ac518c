use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Fatal errors that abort a generator run.
///
/// Problems confined to one function or one cache file are not errors; they
/// end up as diagnostics in the [`GenerationReport`](crate::GenerationReport).
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("cannot read source {}: {source}", .path.display())]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write output {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot resolve path {}: {source}", .path.display())]
    InvalidPath {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("export marker must not be empty")]
    EmptyExportMarker,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeneratorError {
    /// The file the error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            GeneratorError::ReadSource { path, .. }
            | GeneratorError::WriteOutput { path, .. }
            | GeneratorError::InvalidPath { path, .. } => Some(path),
            GeneratorError::EmptyExportMarker | GeneratorError::Io(_) => None,
        }
    }
}
