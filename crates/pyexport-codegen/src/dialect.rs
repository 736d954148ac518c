/// Placeholder replaced by the element type in [`BindingDialect::buffer_type`].
pub const ELEMENT_TYPE_PLACEHOLDER: &str = "{T}";

/// Spellings of the runtime-facing constructs in generated code.
///
/// The default targets pybind11 together with the `bbmp_interop` conversion
/// headers.
///
/// ```rust
/// use pyexport_codegen::BindingDialect;
///
/// let dialect = BindingDialect::default();
/// assert_eq!(dialect.buffer_type_for("float"), "pybind11::array_t<float, 0>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingDialect {
    /// Parameter type that triggers wrapper synthesis, e.g. `bbmp::OwnedChannelData`.
    pub opaque_type: String,
    /// Runtime buffer type replacing the opaque type in wrappers; `{T}` is
    /// replaced by the opaque type's argument.
    pub buffer_type: String,
    /// Function constructing the opaque type from a buffer.
    pub conversion_function: String,
    /// Function asserting a buffer is contiguous.
    pub contiguity_check: String,
    /// Include every generated module needs.
    pub core_include: String,
    /// Includes needed only when at least one wrapper is generated.
    pub wrapper_includes: Vec<String>,
    /// Macro opening the module registration block.
    pub module_macro: String,
    /// Name of the module handle inside the registration block.
    pub module_handle: String,
    /// Function building a named-argument annotation.
    pub argument_helper: String,
    /// First line of the generated file.
    pub banner: String,
}

impl BindingDialect {
    pub fn pybind11() -> Self {
        Self {
            opaque_type: "bbmp::OwnedChannelData".to_string(),
            buffer_type: "pybind11::array_t<{T}, 0>".to_string(),
            conversion_function: "bbmp::createOwnedChannelData".to_string(),
            contiguity_check: "assert_c_contiguous".to_string(),
            core_include: "pybind11/pybind11.h".to_string(),
            wrapper_includes: vec![
                "bbmp_interop/types.hpp".to_string(),
                "bbmp_interop/conversions.hpp".to_string(),
            ],
            module_macro: "PYBIND11_MODULE".to_string(),
            module_handle: "m".to_string(),
            argument_helper: "pybind11::arg".to_string(),
            banner: "/* THIS FILE IS AUTO GENERATED BY PYEXPORT */".to_string(),
        }
    }

    pub fn with_opaque_type(mut self, opaque_type: impl Into<String>) -> Self {
        self.opaque_type = opaque_type.into();
        self
    }

    pub fn with_buffer_type(mut self, buffer_type: impl Into<String>) -> Self {
        self.buffer_type = buffer_type.into();
        self
    }

    pub fn with_conversion_function(mut self, function: impl Into<String>) -> Self {
        self.conversion_function = function.into();
        self
    }

    pub fn with_wrapper_includes<I, S>(mut self, includes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wrapper_includes = includes.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a parameter of type `ty` needs a wrapper.
    pub fn is_opaque(&self, ty: &str) -> bool {
        ty.contains(&self.opaque_type)
    }

    /// The buffer type for element type `element`.
    pub fn buffer_type_for(&self, element: &str) -> String {
        self.buffer_type.replace(ELEMENT_TYPE_PLACEHOLDER, element)
    }
}

impl Default for BindingDialect {
    fn default() -> Self {
        Self::pybind11()
    }
}
