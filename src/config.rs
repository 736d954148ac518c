//! Generator configuration.

use std::path::{Path, PathBuf};

use pyexport_codegen::BindingDialect;
use xxhash_rust::xxh64::xxh64;

/// Marker placed before exported functions in the C++ sources.
pub const DEFAULT_EXPORT_MARKER: &str = "EXPORT_TO_PYTHON";

/// Cache file used when none is configured, relative to the working directory.
pub const DEFAULT_CACHE_PATH: &str = ".pyexport.cache";

pub const DEFAULT_INDENT: usize = 2;

/// Multiplier mixing successive fields into the fingerprint, so that field
/// order matters.
const FINGERPRINT_SEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// Everything a [`Generator`](crate::Generator) needs besides its inputs.
///
/// ```rust
/// use pyexport::GeneratorConfig;
///
/// let config = GeneratorConfig::new()
///     .with_export_marker("EXPORT")
///     .with_indent(4)
///     .with_cache_path("build/bindings.cache");
///
/// assert_eq!(config.export_marker(), "EXPORT");
/// assert_ne!(config.fingerprint(), GeneratorConfig::new().fingerprint());
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    export_marker: String,
    dialect: BindingDialect,
    indent: usize,
    cache_path: PathBuf,
    self_identity: Option<PathBuf>,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self {
            export_marker: DEFAULT_EXPORT_MARKER.to_string(),
            dialect: BindingDialect::default(),
            indent: DEFAULT_INDENT,
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            self_identity: None,
        }
    }

    pub fn with_export_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.export_marker = marker.into();
        self
    }

    pub fn with_dialect(mut self, dialect: BindingDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Spaces per brace level in the generated module.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_cache_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cache_path = path.into();
        self
    }

    /// File whose modification invalidates the whole cache.
    ///
    /// Defaults to the running executable, so rebuilding the generator forces
    /// a full regeneration.
    pub fn with_self_identity<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.self_identity = Some(path.into());
        self
    }

    pub fn export_marker(&self) -> &str {
        &self.export_marker
    }

    pub fn dialect(&self) -> &BindingDialect {
        &self.dialect
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    pub fn self_identity(&self) -> Option<&Path> {
        self.self_identity.as_deref()
    }

    /// Hash of every setting that affects the cached sections.
    ///
    /// A cache written under a different fingerprint is discarded on load.
    pub fn fingerprint(&self) -> u64 {
        let dialect = &self.dialect;
        let indent = self.indent.to_string();

        let mut fields: Vec<&str> = vec![
            env!("CARGO_PKG_VERSION"),
            self.export_marker.as_str(),
            indent.as_str(),
            dialect.opaque_type.as_str(),
            dialect.buffer_type.as_str(),
            dialect.conversion_function.as_str(),
            dialect.contiguity_check.as_str(),
            dialect.core_include.as_str(),
            dialect.module_macro.as_str(),
            dialect.module_handle.as_str(),
            dialect.argument_helper.as_str(),
            dialect.banner.as_str(),
        ];
        fields.extend(dialect.wrapper_includes.iter().map(String::as_str));

        fields.iter().fold(0u64, |hash, field| {
            hash.wrapping_mul(FINGERPRINT_SEP)
                .wrapping_add(xxh64(field.as_bytes(), 0))
        })
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.export_marker(), "EXPORT_TO_PYTHON");
        assert_eq!(config.indent(), 2);
        assert_eq!(config.cache_path(), Path::new(".pyexport.cache"));
        assert_eq!(config.self_identity(), None);
        assert_eq!(config.dialect(), &BindingDialect::pybind11());
    }

    #[test]
    fn fingerprint_is_stable() {
        assert_eq!(GeneratorConfig::new().fingerprint(), GeneratorConfig::new().fingerprint());
    }

    #[test]
    fn fingerprint_ignores_paths() {
        let base = GeneratorConfig::new().fingerprint();
        let moved = GeneratorConfig::new()
            .with_cache_path("/tmp/elsewhere.cache")
            .with_self_identity("/usr/bin/true")
            .fingerprint();
        assert_eq!(base, moved);
    }

    #[test]
    fn fingerprint_tracks_generated_text() {
        let base = GeneratorConfig::new().fingerprint();

        assert_ne!(base, GeneratorConfig::new().with_indent(4).fingerprint());
        assert_ne!(base, GeneratorConfig::new().with_export_marker("EXPORT").fingerprint());

        let dialect = BindingDialect::default().with_opaque_type("audio::Buffer");
        assert_ne!(base, GeneratorConfig::new().with_dialect(dialect).fingerprint());

        let dialect = BindingDialect::default().with_wrapper_includes(["interop.hpp"]);
        assert_ne!(base, GeneratorConfig::new().with_dialect(dialect).fingerprint());
    }
}
