//! Comment and preprocessor directive removal.

use pyexport_core::{Diagnostic, Diagnostics};

const LINE_COMMENT: &str = "//";
const BLOCK_COMMENT_OPEN: &str = "/*";
const BLOCK_COMMENT_CLOSE: &str = "*/";

/// Source text with comments and directives removed, flattened to one line.
#[derive(Debug, Clone, Default)]
pub struct Stripped {
    pub text: String,
    pub diagnostics: Diagnostics,
}

/// Removes `//` comments, `/* */` comments and `#` directive lines.
///
/// Each line is trimmed; a line whose first character is `#` is dropped,
/// any other line is cut at its first `//` and followed by a single space.
/// Block comments are then excised from the joined text. A block comment that
/// never ends drops everything from its opener on and is reported as a
/// warning.
///
/// String literals are not recognized: `"http://x"` loses everything after
/// `//`. That never matters for declarations.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn strip_comments_and_directives(source: &str) -> Stripped {
    let mut code = String::with_capacity(source.len());

    for line in source.lines() {
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }

        let code_part = match line.find(LINE_COMMENT) {
            Some(pos) => &line[..pos],
            None => line,
        };
        code.push_str(code_part);
        code.push(' ');
    }

    let mut diagnostics = Diagnostics::new();

    while let Some(start) = code.find(BLOCK_COMMENT_OPEN) {
        match code[start + BLOCK_COMMENT_OPEN.len()..].find(BLOCK_COMMENT_CLOSE) {
            Some(offset) => {
                let end = start + BLOCK_COMMENT_OPEN.len() + offset + BLOCK_COMMENT_CLOSE.len();
                code.replace_range(start..end, "");
            }
            None => {
                diagnostics.push(Diagnostic::warning(format!(
                    "unterminated block comment; {} trailing characters ignored",
                    code.len() - start
                )));
                code.truncate(start);
                break;
            }
        }
    }

    Stripped {
        text: code,
        diagnostics,
    }
}
