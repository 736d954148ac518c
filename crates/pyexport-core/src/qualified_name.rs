use std::fmt;

/// Fully-qualified name of an exported function.
///
/// Bridges the `::`-joined namespace string carried by a signature and the
/// segment list needed to emit nested namespace blocks or flattened
/// registration names.
///
/// # Examples
///
/// ```
/// use pyexport_core::QualifiedName;
///
/// let hello = QualifiedName::global("hello");
/// assert_eq!(hello.to_string(), "hello");
///
/// let nested = QualifiedName::new("process", vec!["dsp".into(), "filters".into()]);
/// assert_eq!(nested.to_string(), "dsp::filters::process");
/// assert_eq!(nested.flattened(), "dsp__filters__process");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Simple name (e.g., "process")
    pub name: String,
    /// Namespace path, outermost first. Empty for file scope.
    pub namespace: Vec<String>,
}

impl QualifiedName {
    /// Create a new qualified name with namespace.
    pub fn new(name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
        }
    }

    /// Create a qualified name at file scope.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Vec::new(),
        }
    }

    /// Create from a simple name and an optional `::`-joined namespace.
    ///
    /// Empty path components are dropped, so `"::a::b"` and `"a::b"` are equal.
    pub fn from_parts(name: impl Into<String>, namespace: Option<&str>) -> Self {
        let namespace = namespace
            .map(|ns| {
                ns.split("::")
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: name.into(),
            namespace,
        }
    }

    /// Check if this is at file scope.
    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Get the namespace path, outermost first.
    pub fn namespace_path(&self) -> &[String] {
        &self.namespace
    }

    /// Get the namespace as a joined string.
    pub fn namespace_string(&self) -> String {
        self.namespace.join("::")
    }

    /// The qualified name with every `::` replaced by `__`.
    ///
    /// This is the identifier a function is exposed under in the foreign
    /// runtime, and the stem of its wrapper's name.
    pub fn flattened(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}__{}", self.namespace.join("__"), self.name)
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}::{}", self.namespace.join("::"), self.name)
        }
    }
}
