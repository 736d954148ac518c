//! Export marker scanning.

use pyexport_core::{Diagnostics, ExtractedSignature};
use tracing::debug;

use crate::namespace::{NamespaceSegment, decompose_into_namespaces};
use crate::strip::strip_comments_and_directives;

/// Every exported signature found in one source file.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub signatures: Vec<ExtractedSignature>,
    pub diagnostics: Diagnostics,
}

/// Finds every `marker` in a segment and returns the text that follows it.
///
/// The raw signature runs from the end of the marker to the first `{` or `;`,
/// whichever comes first, and is trimmed. Declarations and definitions are
/// captured the same way. An empty marker matches nothing.
pub fn scan_segment(segment: &NamespaceSegment, marker: &str) -> Vec<ExtractedSignature> {
    if marker.is_empty() {
        return Vec::new();
    }

    let code = segment.body.as_str();
    let mut signatures = Vec::new();
    let mut cursor = 0;

    while let Some(found) = code[cursor..].find(marker) {
        let start = cursor + found + marker.len();
        let rest = &code[start..];

        let end = match (rest.find('{'), rest.find(';')) {
            (Some(brace), Some(semicolon)) => start + brace.min(semicolon),
            (Some(brace), None) => start + brace,
            (None, Some(semicolon)) => start + semicolon,
            (None, None) => code.len(),
        };

        signatures.push(ExtractedSignature::new(
            code[start..end].trim(),
            segment.namespace.clone(),
        ));

        // The boundary is a single ASCII byte, or the end of the text.
        cursor = (end + 1).min(code.len());
    }

    signatures
}

/// Runs the stripping, namespace and scanning passes over a whole file.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn extract_function_signatures(source: &str, marker: &str) -> Extraction {
    let stripped = strip_comments_and_directives(source);
    let decomposition = decompose_into_namespaces(&stripped.text);

    let mut diagnostics = stripped.diagnostics;
    for diagnostic in decomposition.diagnostics.iter() {
        diagnostics.push(diagnostic.clone());
    }

    let signatures: Vec<_> = decomposition
        .segments
        .iter()
        .flat_map(|segment| scan_segment(segment, marker))
        .collect();

    debug!(
        segments = decomposition.segments.len(),
        signatures = signatures.len(),
        "extracted exported signatures"
    );

    Extraction {
        signatures,
        diagnostics,
    }
}
