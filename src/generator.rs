//! The incremental generation pipeline.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pyexport_cache::{ChangesCache, DiskStamps, FileStamps};
use pyexport_codegen::{generate_code_sections, render_module};
use pyexport_core::{CodeSections, Diagnostic, Diagnostics, ExtractedSignature};
use pyexport_parser::{extract_function_signatures, parse_extracted};
use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::report::GenerationReport;

/// Turns annotated C++ sources into one extension module, reusing cached work
/// for files that have not changed since the last run.
///
/// ```no_run
/// use std::path::PathBuf;
/// use pyexport::{Generator, GeneratorConfig};
///
/// let generator = Generator::new(GeneratorConfig::new().with_cache_path("build/.pyexport.cache"));
/// let report = generator.run(
///     &[PathBuf::from("src/dsp.cpp"), PathBuf::from("src/io.cpp")],
///     "build/bindings.cpp",
///     "dsp",
/// )?;
/// println!("{report}");
/// # Ok::<(), pyexport::GeneratorError>(())
/// ```
#[derive(Debug)]
pub struct Generator<S: FileStamps = DiskStamps> {
    config: GeneratorConfig,
    stamps: S,
}

impl Generator<DiskStamps> {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_stamps(config, DiskStamps)
    }
}

impl<S: FileStamps> Generator<S> {
    /// Creates a generator reading modification times from `stamps`.
    pub fn with_stamps(config: GeneratorConfig, stamps: S) -> Self {
        Self { config, stamps }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Deletes the cache file, so the next run starts from scratch.
    pub fn clean(&self) -> Result<()> {
        match fs::remove_file(self.config.cache_path()) {
            Ok(()) => {
                info!(path = %self.config.cache_path().display(), "removed cache");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GeneratorError::Io(e)),
        }
    }

    /// Generates `output` from `sources`.
    ///
    /// Only sources whose modification time changed are scanned again, and the
    /// output is only rewritten when the exported functions changed, a tracked
    /// source disappeared, or the output itself is missing or was modified.
    pub fn run<P: AsRef<Path>>(
        &self,
        sources: &[PathBuf],
        output: P,
        module_name: &str,
    ) -> Result<GenerationReport> {
        if self.config.export_marker().is_empty() {
            return Err(GeneratorError::EmptyExportMarker);
        }

        let sources = absolute_unique(sources)?;
        let output = absolute(output.as_ref())?;
        let identity = self.identity_path()?;

        let mut report = GenerationReport::default();
        let mut cache = ChangesCache::load_with_stamps(
            self.config.cache_path(),
            self.config.fingerprint(),
            &self.stamps,
        );

        if let Some(identity) = identity.as_deref() {
            if !cache.is_fresh(identity) {
                if !cache.is_empty() {
                    info!(identity = %identity.display(), "generator changed, discarding cache");
                    report.cache_reset = true;
                }
                cache.erase();
                if let Err(e) = cache.update_modification_time(identity) {
                    warn!(error = %e, "cannot track generator identity");
                }
            }
        }

        let mut regenerate = self.evict_untracked(&mut cache, &sources, &output, identity.as_deref(), &mut report);

        for source in cache.changed_paths(&sources) {
            report.reprocessed.push(source.to_path_buf());
            if self.process_source(&mut cache, source, &mut report.diagnostics)? {
                report.changed.push(source.to_path_buf());
                regenerate = true;
            }
        }

        if !cache.is_fresh(&output) {
            debug!(output = %output.display(), "output missing or modified");
            regenerate = true;
        }

        if regenerate {
            let sections: CodeSections = sources.iter().filter_map(|source| cache.data(source)).collect();
            let code = render_module(&sections, module_name, self.config.dialect(), self.config.indent());

            fs::write(&output, code).map_err(|source| GeneratorError::WriteOutput {
                path: output.clone(),
                source,
            })?;
            if let Err(e) = cache.update_modification_time(&output) {
                warn!(error = %e, "cannot track output");
            }

            report.output_written = true;
            report.function_count = sections.module_function_definitions.len();
            info!(
                output = %output.display(),
                functions = report.function_count,
                "generated module"
            );
        } else {
            info!("no exported function changed, skipping code generation");
        }

        if cache.is_dirty() {
            if let Err(e) = cache.save() {
                warn!(path = %cache.path().display(), error = %e, "cannot save cache");
            }
        }

        Ok(report)
    }

    fn identity_path(&self) -> Result<Option<PathBuf>> {
        match self.config.self_identity() {
            Some(path) => absolute(path).map(Some),
            None => match std::env::current_exe() {
                Ok(path) => Ok(Some(path)),
                Err(e) => {
                    warn!(error = %e, "cannot locate generator executable");
                    Ok(None)
                }
            },
        }
    }

    /// Drops cache entries for paths no longer involved in the run. Returns
    /// whether a dropped entry contributed code to the module.
    fn evict_untracked(
        &self,
        cache: &mut ChangesCache<&S>,
        sources: &[PathBuf],
        output: &Path,
        identity: Option<&Path>,
        report: &mut GenerationReport,
    ) -> bool {
        let mut keep: FxHashSet<&Path> = sources.iter().map(PathBuf::as_path).collect();
        keep.insert(output);
        keep.extend(identity);

        let mut contributed = false;
        for (path, entry) in cache.retain_paths(&keep) {
            debug!(path = %path.display(), "evicting untracked path");
            contributed |= entry.data.is_some();
            report.evicted.push(path);
        }
        contributed
    }

    /// Scans one stale source and refreshes its cache entry. Returns whether
    /// its exported signatures changed.
    #[cfg_attr(feature = "profiling", profiling::function)]
    fn process_source(
        &self,
        cache: &mut ChangesCache<&S>,
        source: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Result<bool> {
        let section = source.display().to_string();
        let text = fs::read_to_string(source).map_err(|e| GeneratorError::ReadSource {
            path: source.to_path_buf(),
            source: e,
        })?;

        let extraction = extract_function_signatures(&text, self.config.export_marker());
        diagnostics.absorb(extraction.diagnostics, &section);

        let unchanged = cache
            .data(source)
            .is_some_and(|cached| same_signatures(&cached.function_signatures, &extraction.signatures));

        if let Err(e) = cache.update_modification_time(source) {
            warn!(error = %e, "cannot track source");
        }

        if unchanged {
            debug!(source = %section, "signatures unchanged");
            return Ok(false);
        }

        let mut sections = CodeSections::new();
        for extracted in &extraction.signatures {
            let generated = parse_extracted(extracted)
                .and_then(|signature| generate_code_sections(&signature, self.config.dialect()));

            match generated {
                Ok(generated) => sections.append(&generated),
                Err(e) => {
                    warn!(source = %section, error = %e, "skipping function");
                    diagnostics.push(Diagnostic::error(e.to_string()).with_section(section.as_str()));
                }
            }
        }
        sections.function_signatures = extraction.signatures;

        debug!(
            source = %section,
            functions = sections.module_function_definitions.len(),
            "regenerated sections"
        );
        cache.store_data(source, sections);

        Ok(true)
    }
}

fn same_signatures(cached: &[ExtractedSignature], current: &[ExtractedSignature]) -> bool {
    let cached: FxHashSet<&ExtractedSignature> = cached.iter().collect();
    let current: FxHashSet<&ExtractedSignature> = current.iter().collect();
    cached == current
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| GeneratorError::InvalidPath {
        path: path.to_path_buf(),
        source,
    })
}

/// Absolute forms of `paths`, keeping the first occurrence of duplicates.
fn absolute_unique(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut seen = FxHashSet::default();
    let mut unique = Vec::with_capacity(paths.len());
    for path in paths {
        let path = absolute(path)?;
        if seen.insert(path.clone()) {
            unique.push(path);
        }
    }
    Ok(unique)
}
