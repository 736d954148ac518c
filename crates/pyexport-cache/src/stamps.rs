use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Source of file modification times.
pub trait FileStamps {
    /// Current modification time of `path`, or `None` if it cannot be read.
    fn modified(&self, path: &Path) -> Option<SystemTime>;
}

/// Reads modification times from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStamps;

impl FileStamps for DiskStamps {
    fn modified(&self, path: &Path) -> Option<SystemTime> {
        fs::metadata(path).and_then(|m| m.modified()).ok()
    }
}

impl<S: FileStamps + ?Sized> FileStamps for &S {
    fn modified(&self, path: &Path) -> Option<SystemTime> {
        (**self).modified(path)
    }
}
