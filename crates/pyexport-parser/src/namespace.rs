//! Partitioning of stripped source text by enclosing namespace.
//!
//! `namespace`, `class` and `struct` blocks are all treated as scopes: a
//! function exported from inside `struct Foo { ... }` is tagged `Foo`.

use std::collections::VecDeque;
use std::sync::LazyLock;

use pyexport_core::{Diagnostic, Diagnostics};
use regex::Regex;
use tracing::trace;

static NAMESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(?:namespace|class|struct)\s*([A-Za-z0-9_-]+)\s*\{")
        .expect("namespace pattern is valid")
});

/// Text directly inside one scope, with nested scopes cut out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSegment {
    /// `::`-joined path of the scope. `None` for file scope.
    pub namespace: Option<String>,
    pub body: String,
}

impl NamespaceSegment {
    pub fn new(namespace: Option<String>, body: impl Into<String>) -> Self {
        Self {
            namespace,
            body: body.into(),
        }
    }
}

/// Result of [`decompose_into_namespaces`].
#[derive(Debug, Clone, Default)]
pub struct Decomposition {
    /// File scope first, then scopes breadth-first in source order.
    pub segments: Vec<NamespaceSegment>,
    pub diagnostics: Diagnostics,
}

fn extend_namespace(parent: Option<&str>, child: &str) -> String {
    match parent {
        Some(parent) => format!("{parent}::{child}"),
        None => child.to_string(),
    }
}

/// Index of the `}` closing the scope whose body starts at `start`.
///
/// Counts braces only; braces in string or character literals are counted too.
fn find_matching_brace(code: &str, start: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, byte) in code.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits `code` into one segment per scope.
///
/// Each scope opening is located, its body is taken up to the matching brace,
/// and the whole block is cut out of the parent before searching the parent
/// again. Children are queued and decomposed the same way until no scopes
/// remain. Together the segment bodies cover every character of `code` that is
/// not part of a scope header or closing brace.
///
/// A scope without a closing brace takes the rest of the text as its body and
/// is reported as a warning.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn decompose_into_namespaces(code: &str) -> Decomposition {
    let mut decomposition = Decomposition::default();
    let mut pending = VecDeque::from([NamespaceSegment::new(None, code)]);

    while let Some(NamespaceSegment {
        namespace,
        mut body,
    }) = pending.pop_front()
    {
        while let Some(captures) = NAMESPACE_REGEX.captures(&body) {
            let header = captures.get(0).expect("group 0 is the whole match");
            let child_name = extend_namespace(namespace.as_deref(), &captures[1]);
            let match_start = header.start();
            let body_start = header.end();

            trace!(namespace = %child_name, "found scope");

            match find_matching_brace(&body, body_start) {
                Some(body_end) => {
                    pending.push_back(NamespaceSegment::new(
                        Some(child_name),
                        &body[body_start..body_end],
                    ));
                    body.replace_range(match_start..=body_end, "");
                }
                None => {
                    decomposition.diagnostics.push(Diagnostic::warning(format!(
                        "unmatched '{{' opening scope `{child_name}`; the rest of the file is treated as its body"
                    )));
                    pending.push_back(NamespaceSegment::new(
                        Some(child_name),
                        &body[body_start..],
                    ));
                    body.truncate(match_start);
                }
            }
        }

        decomposition
            .segments
            .push(NamespaceSegment::new(namespace, body));
    }

    decomposition
}
