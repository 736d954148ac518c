use std::fmt;
use std::path::PathBuf;

use pyexport_core::Diagnostics;

/// What a single [`Generator::run`](crate::Generator::run) did.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Whether the output file was written.
    pub output_written: bool,
    /// Whether the cache was discarded because the generator itself changed.
    pub cache_reset: bool,
    /// Inputs that were scanned again because their modification time changed.
    pub reprocessed: Vec<PathBuf>,
    /// Reprocessed inputs whose set of exported signatures actually changed.
    pub changed: Vec<PathBuf>,
    /// Paths dropped from the cache because they are no longer tracked.
    pub evicted: Vec<PathBuf>,
    /// Functions registered in the written module. Zero when nothing was written.
    pub function_count: usize,
    pub diagnostics: Diagnostics,
}

impl GenerationReport {
    /// True when the run found nothing to do.
    pub fn is_up_to_date(&self) -> bool {
        !self.output_written && self.reprocessed.is_empty() && self.evicted.is_empty()
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.output_written {
            write!(f, "generated {} function(s)", self.function_count)?;
        } else {
            write!(f, "skipped code generation")?;
        }
        write!(
            f,
            ", {} input(s) reprocessed, {} changed, {} evicted",
            self.reprocessed.len(),
            self.changed.len(),
            self.evicted.len()
        )?;
        if !self.diagnostics.is_empty() {
            write!(f, ", {} diagnostic(s)", self.diagnostics.len())?;
        }
        Ok(())
    }
}
