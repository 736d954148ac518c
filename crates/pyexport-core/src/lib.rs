//! Core data model shared by the pyexport crates.
//!
//! This crate holds the types that flow between the scanning, code generation
//! and caching stages of the binding generator:
//! - [`Signature`] and [`Parameter`], the structured form of an exported declaration
//! - [`ExtractedSignature`], the raw scanner output used for change detection
//! - [`CodeSections`], the generated fragments produced for one source file
//! - [`Diagnostics`], non-fatal problems collected during a run
//! - Error types for the phases that can fail
//!
//! # Example
//!
//! ```
//! use pyexport_core::{Parameter, Signature};
//!
//! let signature = Signature {
//!     return_type: "int".into(),
//!     name: "add".into(),
//!     parameters: vec![Parameter::named("int", "a"), Parameter::named("int", "b")],
//!     specifiers: vec!["noexcept".into()],
//!     namespace: Some("math".into()),
//! };
//!
//! assert_eq!(signature.to_declaration(), "int add(int a, int b) noexcept");
//! assert_eq!(signature.qualified_name().to_string(), "math::add");
//! assert_eq!(signature.flat_name(), "math__add");
//! ```

pub mod diagnostics;
pub mod error;
pub mod qualified_name;
pub mod qualifiers;
pub mod sections;
pub mod signature;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{SignatureError, SignatureResult};
pub use qualified_name::QualifiedName;
pub use qualifiers::{ForwardingCategory, TypeQualifiers};
pub use sections::CodeSections;
pub use signature::{ExtractedSignature, Parameter, Signature};
