/// Re-indents C++ code by brace depth alone.
///
/// A line without `}` is written at the current depth. A `{` on a line opens
/// one level, a `}` closes one, and a line containing `}` is written after the
/// depth was updated, so closing braces line up with their opener. Existing
/// leading whitespace is discarded and blank lines stay empty.
///
/// ```rust
/// use pyexport_codegen::indent_braces;
///
/// let code = "void f()\n{\nreturn;\n}";
/// assert_eq!(indent_braces(code, 2), "void f()\n{\n  return;\n}\n");
/// ```
pub fn indent_braces(code: &str, spaces: usize) -> String {
    let mut indented = String::with_capacity(code.len());
    let mut level = 0usize;

    let mut emit = |line: &str, level: usize| {
        if !line.is_empty() {
            indented.push_str(&" ".repeat(level * spaces));
            indented.push_str(line);
        }
        indented.push('\n');
    };

    for line in code.lines() {
        let line = line.trim_start();
        let opens = line.contains('{');
        let closes = line.contains('}');

        if !closes {
            emit(line, level);
        }
        if opens {
            level += 1;
        }
        if closes {
            level = level.saturating_sub(1);
            emit(line, level);
        }
    }

    indented
}
