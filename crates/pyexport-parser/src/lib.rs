//! Scanner and signature parser for annotated C++ sources.
//!
//! This crate finds functions marked for export and splits their declarations
//! into structured [`Signature`]s. It is deliberately not a C++ front end: the
//! model is line-oriented and purely lexical.
//! - [`strip`] removes comments and preprocessor directives
//! - [`namespace`] partitions the remaining text by enclosing namespace
//! - [`scanner`] extracts the raw text following each export marker
//! - [`signature`] parses raw text into a [`Signature`]
//!
//! # Supported grammar
//!
//! Correct results are guaranteed only for plain declarations of the form
//! `<return type> <name>(<type> [name], ...) <specifiers>`. Known unsupported
//! constructs:
//! - template arguments with top-level commas (`std::map<int, int>`) in a parameter
//! - string or character literals containing `{` or `}` inside a namespace body
//! - function pointer parameters, default arguments and attributes
//! - classes with base clauses are not treated as scopes
//!
//! Inputs outside the subset produce unspecified results, but never panic.
//!
//! # Example
//!
//! ```
//! use pyexport_parser::{extract_function_signatures, parse_signature};
//!
//! let source = r#"
//! #define EXPORT_TO_PYTHON
//! namespace dsp {
//! EXPORT_TO_PYTHON
//! float gain(float x, float db) { return x; }
//! }
//! "#;
//!
//! let extraction = extract_function_signatures(source, "EXPORT_TO_PYTHON");
//! assert_eq!(extraction.signatures.len(), 1);
//!
//! let found = &extraction.signatures[0];
//! assert_eq!(found.raw, "float gain(float x, float db)");
//! assert_eq!(found.namespace.as_deref(), Some("dsp"));
//!
//! let signature = parse_signature(&found.raw, found.namespace.as_deref()).unwrap();
//! assert_eq!(signature.flat_name(), "dsp__gain");
//! ```

pub mod namespace;
pub mod scanner;
pub mod signature;
pub mod strip;

pub use namespace::{Decomposition, NamespaceSegment, decompose_into_namespaces};
pub use scanner::{Extraction, extract_function_signatures, scan_segment};
pub use signature::{parse_extracted, parse_parameter, parse_signature};
pub use strip::{Stripped, strip_comments_and_directives};

pub use pyexport_core::Signature;
