//! Assembly of the generated extension module source.

use pyexport_core::CodeSections;

use crate::{BindingDialect, indent_braces};

/// Builds the module source from aggregated sections, without indentation.
///
/// Layout:
///
/// ```text
/// <banner>
///
/// [#include "<wrapper include>" ...
/// ]
/// #include "<core include>"
///
/// <forward declarations>
///
/// <wrapper definitions>
///
/// PYBIND11_MODULE(<module name>, m) {
/// <registration statements>
/// }
/// ```
///
/// Wrapper includes are only added when the sections contain a wrapper, so
/// modules without one do not depend on the buffer conversion headers.
pub fn generate_module(sections: &CodeSections, module_name: &str, dialect: &BindingDialect) -> String {
    let mut includes = Vec::new();
    if sections.has_wrappers() {
        for include in &dialect.wrapper_includes {
            includes.push(format!("#include \"{include}\""));
        }
        includes.push(String::new());
    }
    includes.push(format!("#include \"{}\"", dialect.core_include));

    format!(
        "{banner}\n\n{includes}\n\n{declarations}\n\n{wrappers}\n\n{macro_name}({module_name}, {handle}) {{\n{definitions}\n}}",
        banner = dialect.banner,
        includes = includes.join("\n"),
        declarations = sections.function_declarations.join("\n"),
        wrappers = sections.wrapper_definitions.join("\n"),
        macro_name = dialect.module_macro,
        handle = dialect.module_handle,
        definitions = sections.module_function_definitions.join("\n"),
    )
}

/// Builds and re-indents the module source.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn render_module(
    sections: &CodeSections,
    module_name: &str,
    dialect: &BindingDialect,
    indent: usize,
) -> String {
    indent_braces(&generate_module(sections, module_name, dialect), indent)
}
