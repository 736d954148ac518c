//! Adapter functions for signatures taking opaque channel data.
//!
//! The foreign runtime cannot pass `bbmp::OwnedChannelData<T>` directly. For
//! every function taking one, a wrapper is generated that accepts the
//! runtime's buffer type instead, converts it, and forwards to the real
//! function:
//!
//! ```text
//! void add_to_array(bbmp::OwnedChannelData<float>& data, const float number);
//!
//! void test_namespace__add_to_array_wrapper(pybind11::array_t<float, 0> data, const float number)
//! {
//! assert_c_contiguous(data);
//! auto data_wrapper = bbmp::createOwnedChannelData(std::move(data));
//! return test_namespace::add_to_array(data_wrapper, std::move(number));
//! }
//! ```

use std::sync::LazyLock;

use pyexport_core::{ForwardingCategory, Signature, SignatureError, SignatureResult};
use regex::Regex;

use crate::BindingDialect;

static TYPE_ARGUMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Za-z0-9\s_-]+)>").expect("type argument pattern is valid")
});

/// A generated wrapper function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapper {
    /// Qualified name of the wrapped function flattened with `__`, plus `_wrapper`.
    pub name: String,
    /// Complete C++ definition.
    pub definition: String,
}

/// One parameter of the wrapper's own signature.
struct WrapperParameter {
    ty: String,
    name: String,
    is_buffer: bool,
}

/// Extracts `T` from a type such as `const bbmp::OwnedChannelData<T>&`.
fn type_argument<'a>(ty: &'a str, signature: &Signature) -> SignatureResult<&'a str> {
    TYPE_ARGUMENT_REGEX
        .captures(ty)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim())
        .ok_or_else(|| SignatureError::MissingTypeArgument {
            ty: ty.to_string(),
            raw: signature.to_declaration(),
        })
}

/// Builds the wrapper for `signature`, or `None` if no parameter needs one.
///
/// `None` is the common case: the registration then binds the original
/// function directly. Unnamed parameters are named `arg<index>` after their
/// position in the parameter list.
///
/// Fails when an opaque parameter has no extractable type argument.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn create_wrapper(
    signature: &Signature,
    dialect: &BindingDialect,
) -> SignatureResult<Option<Wrapper>> {
    if !signature
        .parameters
        .iter()
        .any(|p| dialect.is_opaque(&p.ty))
    {
        return Ok(None);
    }

    let mut wrapper_parameters = Vec::with_capacity(signature.parameters.len());
    for (index, parameter) in signature.parameters.iter().enumerate() {
        let name = parameter
            .name
            .clone()
            .unwrap_or_else(|| format!("arg{index}"));

        if dialect.is_opaque(&parameter.ty) {
            let element = type_argument(&parameter.ty, signature)?;
            wrapper_parameters.push(WrapperParameter {
                ty: dialect.buffer_type_for(element),
                name,
                is_buffer: true,
            });
        } else {
            wrapper_parameters.push(WrapperParameter {
                ty: parameter.ty.clone(),
                name,
                is_buffer: false,
            });
        }
    }

    let mut body = Vec::new();
    for parameter in wrapper_parameters.iter().filter(|p| p.is_buffer) {
        body.push(format!("{}({});", dialect.contiguity_check, parameter.name));
    }

    let mut forwarded = Vec::with_capacity(wrapper_parameters.len());
    for (wrapper_parameter, original) in wrapper_parameters.iter().zip(&signature.parameters) {
        let forwarded_name = if wrapper_parameter.is_buffer {
            let local = format!("{}_wrapper", wrapper_parameter.name);
            body.push(format!(
                "auto {local} = {}(std::move({}));",
                dialect.conversion_function, wrapper_parameter.name
            ));
            local
        } else {
            wrapper_parameter.name.clone()
        };

        if ForwardingCategory::of(&original.ty).forwards_by_name() {
            forwarded.push(forwarded_name);
        } else {
            forwarded.push(format!("std::move({forwarded_name})"));
        }
    }

    let qualified_name = signature.qualified_name();
    let name = format!("{}_wrapper", qualified_name.flattened());
    body.push(format!(
        "return {}({});",
        qualified_name,
        forwarded.join(", ")
    ));

    let parameter_list = wrapper_parameters
        .iter()
        .map(|p| format!("{} {}", p.ty, p.name))
        .collect::<Vec<_>>()
        .join(", ");

    let definition = format!(
        "{} {}({})\n{{\n{}\n}}",
        signature.return_type,
        name,
        parameter_list,
        body.join("\n")
    );

    Ok(Some(Wrapper { name, definition }))
}
