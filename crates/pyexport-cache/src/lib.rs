//! Persistent change-detection cache for the binding generator.
//!
//! The cache maps absolute paths to the modification time they had when last
//! processed, plus the [`CodeSections`](pyexport_core::CodeSections) generated
//! from them. It has an explicit lifecycle: [`ChangesCache::load`] at the
//! start of a run, [`ChangesCache::save`] at most once at the end.
//!
//! Reading never fails: a missing, truncated or incompatible cache file
//! yields an empty cache, which simply means every input is reprocessed.
//!
//! Freshness is decided by the pure function [`needs_reprocessing`], fed by a
//! [`FileStamps`] provider so it can be tested without touching the disk.

pub mod error;
pub mod stamps;
pub mod store;

pub use error::{CacheError, CacheResult};
pub use stamps::{DiskStamps, FileStamps};
pub use store::{CACHE_FORMAT_VERSION, CacheEntry, ChangesCache, needs_reprocessing};
