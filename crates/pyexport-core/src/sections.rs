use serde::{Deserialize, Serialize};

use crate::ExtractedSignature;

/// Generated code fragments for one source file, or for a whole module once
/// aggregated.
///
/// Every field is ordered: appending keeps file order, then function order
/// within a file. This is the payload the incremental cache stores per input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSections {
    /// Signatures the sections were generated from, used for change detection.
    pub function_signatures: Vec<ExtractedSignature>,
    /// `extern` forward declarations, wrapped in their namespaces.
    pub function_declarations: Vec<String>,
    /// Full definitions of generated wrapper functions.
    pub wrapper_definitions: Vec<String>,
    /// One registration statement per exported function.
    pub module_function_definitions: Vec<String>,
}

impl CodeSections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenates `other` onto `self`, field by field.
    pub fn append(&mut self, other: &CodeSections) {
        self.function_signatures
            .extend_from_slice(&other.function_signatures);
        self.function_declarations
            .extend_from_slice(&other.function_declarations);
        self.wrapper_definitions
            .extend_from_slice(&other.wrapper_definitions);
        self.module_function_definitions
            .extend_from_slice(&other.module_function_definitions);
    }

    pub fn has_wrappers(&self) -> bool {
        !self.wrapper_definitions.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.function_signatures.is_empty()
            && self.function_declarations.is_empty()
            && self.wrapper_definitions.is_empty()
            && self.module_function_definitions.is_empty()
    }
}

impl<'a> FromIterator<&'a CodeSections> for CodeSections {
    fn from_iter<I: IntoIterator<Item = &'a CodeSections>>(iter: I) -> Self {
        let mut aggregate = CodeSections::new();
        for sections in iter {
            aggregate.append(sections);
        }
        aggregate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(tag: &str, wrapper: bool) -> CodeSections {
        CodeSections {
            function_signatures: vec![ExtractedSignature::new(format!("void {tag}()"), None)],
            function_declarations: vec![format!("extern void {tag}();")],
            wrapper_definitions: if wrapper {
                vec![format!("void {tag}_wrapper() {{}}")]
            } else {
                Vec::new()
            },
            module_function_definitions: vec![format!("m.def(\"{tag}\", &{tag});")],
        }
    }

    #[test]
    fn append_preserves_order() {
        let mut aggregate = sections("a", false);
        aggregate.append(&sections("b", true));

        assert_eq!(
            aggregate.function_declarations,
            vec!["extern void a();", "extern void b();"]
        );
        assert_eq!(aggregate.wrapper_definitions, vec!["void b_wrapper() {}"]);
        assert!(aggregate.has_wrappers());
    }

    #[test]
    fn collect_from_references() {
        let parts = [sections("a", false), sections("b", false)];
        let aggregate: CodeSections = parts.iter().collect();

        assert_eq!(aggregate.module_function_definitions.len(), 2);
        assert!(!aggregate.has_wrappers());
        assert!(CodeSections::new().is_empty());
    }
}
