//! Generates pybind11 extension modules from annotated C++ sources.
//!
//! Functions preceded by an export marker (`EXPORT_TO_PYTHON` by default) are
//! collected from every input file, and a single translation unit registering
//! them is written. Functions taking opaque channel data get a generated
//! wrapper that converts from a numpy-compatible buffer first.
//!
//! Work is incremental: a cache keyed by absolute path remembers modification
//! times and the code generated for each file, so unchanged inputs are not
//! rescanned and the output is only rewritten when an exported signature
//! actually changed.
//!
//! The pipeline is split across crates:
//! - `pyexport-core`: the shared data model
//! - `pyexport-parser`: comment stripping, namespace decomposition and signature parsing
//! - `pyexport-codegen`: wrappers, registrations and module assembly
//! - `pyexport-cache`: the persistent change-detection store

pub mod config;
pub mod error;
pub mod generator;
pub mod report;

pub use config::{DEFAULT_CACHE_PATH, DEFAULT_EXPORT_MARKER, DEFAULT_INDENT, GeneratorConfig};
pub use error::{GeneratorError, Result};
pub use generator::Generator;
pub use report::GenerationReport;

pub use pyexport_codegen::BindingDialect;
pub use pyexport_core::{CodeSections, Diagnostic, DiagnosticKind, Diagnostics, Signature};
