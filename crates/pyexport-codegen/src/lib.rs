//! Code generation for exported C++ functions.
//!
//! Given parsed [`Signature`](pyexport_core::Signature)s, this crate produces
//! the text of a pybind11 extension module:
//! - [`wrapper`] synthesizes adapters for functions taking opaque channel data
//! - [`binding`] emits forward declarations and `m.def(...)` statements
//! - [`module`] assembles everything into one translation unit
//! - [`indent`] re-indents the result by brace depth
//!
//! All runtime-specific spellings (type names, macros, includes) come from a
//! [`BindingDialect`], so the generated code can target a differently named
//! conversion layer without touching the generator.

pub mod binding;
pub mod dialect;
pub mod indent;
pub mod module;
pub mod wrapper;

pub use binding::{
    argument_annotations, forward_declaration, generate_code_sections, registration_statement,
};
pub use dialect::BindingDialect;
pub use indent::indent_braces;
pub use module::{generate_module, render_module};
pub use wrapper::{Wrapper, create_wrapper};
