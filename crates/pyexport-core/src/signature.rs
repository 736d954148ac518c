use serde::{Deserialize, Serialize};
use std::fmt;

use crate::QualifiedName;

/// A raw signature as found by the annotation scanner.
///
/// The raw text is what change detection compares: two runs producing the
/// same set of `ExtractedSignature`s for a file need no new code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtractedSignature {
    /// Declaration text between the export marker and the first `{` or `;`.
    pub raw: String,
    /// Enclosing namespace path, `::`-joined. `None` at file scope.
    pub namespace: Option<String>,
}

impl ExtractedSignature {
    pub fn new(raw: impl Into<String>, namespace: Option<String>) -> Self {
        Self {
            raw: raw.into(),
            namespace,
        }
    }
}

/// One parameter of an exported function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Declared type, including `const`, `*` and `&` decorations.
    pub ty: String,
    /// Parameter name, if the declaration has one.
    pub name: Option<String>,
}

impl Parameter {
    pub fn named(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: Some(name.into()),
        }
    }

    pub fn unnamed(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: None,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {}", self.ty, name),
            None => write!(f, "{}", self.ty),
        }
    }
}

/// Structured form of an exported function declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub return_type: String,
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// Trailing specifiers such as `const`, `noexcept` or `override`.
    pub specifiers: Vec<String>,
    /// Enclosing namespace path, `::`-joined. `None` at file scope.
    pub namespace: Option<String>,
}

impl Signature {
    /// Canonical declaration text, without namespace qualification.
    ///
    /// Parsing the result again yields an equal signature for every input in
    /// the supported grammar. It is not guaranteed to match the source text.
    pub fn to_declaration(&self) -> String {
        let parameters = self
            .parameters
            .iter()
            .map(Parameter::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "{} {}({}) {}",
            self.return_type,
            self.name,
            parameters,
            self.specifiers.join(" ")
        )
        .trim()
        .to_string()
    }

    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::from_parts(self.name.clone(), self.namespace.as_deref())
    }

    /// Qualified name with `::` flattened to `__`.
    pub fn flat_name(&self) -> String {
        self.qualified_name().flattened()
    }

    /// Whether every parameter carries a name.
    ///
    /// True for an empty parameter list.
    pub fn all_parameters_named(&self) -> bool {
        self.parameters.iter().all(|p| p.name.is_some())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_declaration())
    }
}
