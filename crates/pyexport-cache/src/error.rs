use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the cache layer.
///
/// None of these is fatal to a generator run: load errors degrade to an empty
/// cache and save errors only cost the next run a full rebuild.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache encoding error: {0}")]
    Encoding(#[from] postcard::Error),

    #[error("cache format version {found} does not match {expected}")]
    FormatVersion { found: u32, expected: u32 },

    #[error("cache was written by a different generator configuration")]
    FingerprintMismatch,

    #[error("cannot read modification time of {}", .0.display())]
    MissingFile(PathBuf),
}

pub type CacheResult<T> = Result<T, CacheError>;
