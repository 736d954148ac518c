//! Forward declarations and registration statements.

use pyexport_core::{CodeSections, Signature, SignatureResult};

use crate::{BindingDialect, Wrapper, create_wrapper};

/// `extern` declaration of `signature`, nested in its namespaces.
///
/// ```rust
/// use pyexport_codegen::forward_declaration;
/// use pyexport_parser::parse_signature;
///
/// let signature = parse_signature("void f(int x)", Some("a::b")).unwrap();
/// assert_eq!(
///     forward_declaration(&signature),
///     "namespace a { namespace b { extern void f(int x); } }"
/// );
/// ```
pub fn forward_declaration(signature: &Signature) -> String {
    let qualified_name = signature.qualified_name();

    qualified_name.namespace_path().iter().rev().fold(
        format!("extern {};", signature.to_declaration()),
        |inner, namespace| format!("namespace {namespace} {{ {inner} }}"),
    )
}

/// Named-argument annotations for the registration statement.
///
/// Empty unless every parameter has a name: a partially named list would
/// misalign keyword arguments.
pub fn argument_annotations(signature: &Signature, dialect: &BindingDialect) -> Vec<String> {
    if !signature.all_parameters_named() {
        return Vec::new();
    }

    signature
        .parameters
        .iter()
        .filter_map(|p| p.name.as_deref())
        .map(|name| format!("{}(\"{}\")", dialect.argument_helper, name))
        .collect()
}

/// `m.def(...)` statement exposing `signature` under its flattened name.
///
/// The bound callable is the wrapper when there is one, the original function
/// otherwise.
pub fn registration_statement(
    signature: &Signature,
    wrapper: Option<&Wrapper>,
    dialect: &BindingDialect,
) -> String {
    let qualified_name = signature.qualified_name();
    let target = match wrapper {
        Some(wrapper) => format!("&{}", wrapper.name),
        None => format!("&{qualified_name}"),
    };

    let mut arguments = vec![format!("\"{}\"", qualified_name.flattened()), target];
    arguments.extend(argument_annotations(signature, dialect));

    format!("{}.def({});", dialect.module_handle, arguments.join(", "))
}

/// Generates declaration, wrapper and registration for one function.
///
/// `function_signatures` is left empty; it is filled in per file by the caller,
/// which knows the raw text the signature was parsed from.
pub fn generate_code_sections(
    signature: &Signature,
    dialect: &BindingDialect,
) -> SignatureResult<CodeSections> {
    let wrapper = create_wrapper(signature, dialect)?;

    let mut sections = CodeSections::new();
    sections
        .function_declarations
        .push(forward_declaration(signature));
    sections
        .module_function_definitions
        .push(registration_statement(signature, wrapper.as_ref(), dialect));
    if let Some(wrapper) = wrapper {
        sections.wrapper_definitions.push(wrapper.definition);
    }

    Ok(sections)
}
