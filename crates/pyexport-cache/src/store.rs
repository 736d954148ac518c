use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use pyexport_core::CodeSections;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{CacheError, CacheResult, DiskStamps, FileStamps};

/// Bumped whenever the persisted layout changes.
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// What the cache remembers about one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub last_modification_time: SystemTime,
    /// Sections generated from the path. `None` for the generator identity and
    /// the output file, which are tracked by time only.
    pub data: Option<CodeSections>,
}

/// Whether a path must be processed again.
///
/// True unless there is a stored entry and the current modification time is
/// known and equal to it.
pub fn needs_reprocessing(stored: Option<&CacheEntry>, current: Option<SystemTime>) -> bool {
    match (stored, current) {
        (Some(entry), Some(current)) => entry.last_modification_time != current,
        _ => true,
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheContents {
    format_version: u32,
    fingerprint: u64,
    entries: FxHashMap<PathBuf, CacheEntry>,
}

/// Modification times and generated sections, keyed by absolute path.
///
/// `fingerprint` identifies the generator configuration that produced the
/// cached sections; a file written under another fingerprint is discarded on
/// load.
#[derive(Debug)]
pub struct ChangesCache<S: FileStamps = DiskStamps> {
    path: PathBuf,
    contents: CacheContents,
    stamps: S,
    dirty: bool,
}

impl ChangesCache<DiskStamps> {
    /// Loads the cache at `path` using filesystem modification times.
    pub fn load(path: impl Into<PathBuf>, fingerprint: u64) -> Self {
        Self::load_with_stamps(path, fingerprint, DiskStamps)
    }
}

impl<S: FileStamps> ChangesCache<S> {
    /// Loads the cache at `path`, reading modification times from `stamps`.
    ///
    /// Any failure to read or decode the file yields an empty cache.
    pub fn load_with_stamps(path: impl Into<PathBuf>, fingerprint: u64, stamps: S) -> Self {
        let path = path.into();

        let contents = match Self::read_contents(&path, fingerprint) {
            Ok(contents) => {
                debug!(path = %path.display(), entries = contents.entries.len(), "loaded cache");
                contents
            }
            Err(CacheError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no cache file, starting empty");
                Self::empty_contents(fingerprint)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "discarding unreadable cache");
                Self::empty_contents(fingerprint)
            }
        };

        Self {
            path,
            contents,
            stamps,
            dirty: false,
        }
    }

    fn empty_contents(fingerprint: u64) -> CacheContents {
        CacheContents {
            format_version: CACHE_FORMAT_VERSION,
            fingerprint,
            entries: FxHashMap::default(),
        }
    }

    fn read_contents(path: &Path, fingerprint: u64) -> CacheResult<CacheContents> {
        let bytes = fs::read(path)?;
        let contents: CacheContents = postcard::from_bytes(&bytes)?;

        if contents.format_version != CACHE_FORMAT_VERSION {
            return Err(CacheError::FormatVersion {
                found: contents.format_version,
                expected: CACHE_FORMAT_VERSION,
            });
        }
        if contents.fingerprint != fingerprint {
            return Err(CacheError::FingerprintMismatch);
        }

        Ok(contents)
    }

    /// Writes the cache to its path, replacing any previous file.
    pub fn save(&mut self) -> CacheResult<()> {
        debug!(path = %self.path.display(), entries = self.len(), "saving cache");
        let bytes = postcard::to_allocvec(&self.contents)?;
        fs::write(&self.path, bytes)?;
        self.dirty = false;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the in-memory state differs from what was loaded or last saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.contents.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.entries.is_empty()
    }

    pub fn entry(&self, path: &Path) -> Option<&CacheEntry> {
        self.contents.entries.get(path)
    }

    /// Drops every entry.
    pub fn erase(&mut self) {
        if !self.contents.entries.is_empty() {
            self.dirty = true;
        }
        self.contents.entries.clear();
    }

    /// Whether `path` has an entry whose time matches the file on disk.
    pub fn is_fresh(&self, path: &Path) -> bool {
        !needs_reprocessing(self.entry(path), self.stamps.modified(path))
    }

    /// The subset of `paths` that must be processed again, in order.
    pub fn changed_paths<'a>(&self, paths: &'a [PathBuf]) -> Vec<&'a Path> {
        paths
            .iter()
            .map(PathBuf::as_path)
            .filter(|path| !self.is_fresh(path))
            .collect()
    }

    /// Records the current modification time of `path`, keeping its data.
    pub fn update_modification_time(&mut self, path: &Path) -> CacheResult<()> {
        let modified = self
            .stamps
            .modified(path)
            .ok_or_else(|| CacheError::MissingFile(path.to_path_buf()))?;

        self.contents
            .entries
            .entry(path.to_path_buf())
            .and_modify(|entry| entry.last_modification_time = modified)
            .or_insert(CacheEntry {
                last_modification_time: modified,
                data: None,
            });
        self.dirty = true;
        Ok(())
    }

    /// Stores generated sections for `path`.
    ///
    /// The path must already have an entry (see
    /// [`update_modification_time`](Self::update_modification_time)); data for
    /// an untracked path is ignored, since it could never be validated.
    pub fn store_data(&mut self, path: &Path, data: CodeSections) {
        match self.contents.entries.get_mut(path) {
            Some(entry) => {
                entry.data = Some(data);
                self.dirty = true;
            }
            None => warn!(path = %path.display(), "ignoring data for untracked path"),
        }
    }

    pub fn data(&self, path: &Path) -> Option<&CodeSections> {
        self.entry(path).and_then(|entry| entry.data.as_ref())
    }

    /// Removes every entry whose path is not in `keep`, returning the removed
    /// entries sorted by path.
    pub fn retain_paths(&mut self, keep: &FxHashSet<&Path>) -> Vec<(PathBuf, CacheEntry)> {
        let mut stale: Vec<PathBuf> = self
            .contents
            .entries
            .keys()
            .filter(|path| !keep.contains(path.as_path()))
            .cloned()
            .collect();
        stale.sort();

        let evicted: Vec<(PathBuf, CacheEntry)> = stale
            .into_iter()
            .filter_map(|path| {
                let entry = self.contents.entries.remove(&path)?;
                Some((path, entry))
            })
            .collect();
        if !evicted.is_empty() {
            self.dirty = true;
        }

        evicted
    }
}
