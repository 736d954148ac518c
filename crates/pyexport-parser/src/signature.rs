//! Parsing of raw declaration text into [`Signature`]s.

use pyexport_core::{ExtractedSignature, Parameter, Signature, SignatureError, SignatureResult};

/// Parses one raw declaration, such as
/// `const std::string greet(int*, const std::string& s) noexcept`.
///
/// - The text before the first `(` is split on whitespace: the last token is
///   the name, the others form the return type.
/// - The text between `(` and the next `)` is split on commas into parameters.
/// - The text after `)` is split on whitespace into specifiers.
///
/// Fails when there is no parameter list, when it is never closed, or when no
/// name precedes it.
pub fn parse_signature(raw: &str, namespace: Option<&str>) -> SignatureResult<Signature> {
    let (head, rest) = raw
        .split_once('(')
        .ok_or_else(|| SignatureError::MissingParameterList {
            raw: raw.to_string(),
        })?;

    let mut head_tokens: Vec<&str> = head.split_whitespace().collect();
    let name = head_tokens.pop().ok_or_else(|| SignatureError::MissingName {
        raw: raw.to_string(),
    })?;

    let (parameter_list, tail) =
        rest.split_once(')')
            .ok_or_else(|| SignatureError::UnterminatedParameterList {
                raw: raw.to_string(),
            })?;

    let parameters = if parameter_list.trim().is_empty() {
        Vec::new()
    } else {
        parameter_list.split(',').map(parse_parameter).collect()
    };

    Ok(Signature {
        return_type: head_tokens.join(" "),
        name: name.to_string(),
        parameters,
        specifiers: tail.split_whitespace().map(str::to_string).collect(),
        namespace: namespace.map(str::to_string),
    })
}

/// Parses the output of the annotation scanner.
pub fn parse_extracted(extracted: &ExtractedSignature) -> SignatureResult<Signature> {
    parse_signature(&extracted.raw, extracted.namespace.as_deref())
}

/// Splits one parameter declaration into type and optional name.
///
/// Name detection ignores `*` and `&` and skips `const` words: if more than one
/// word remains, the last one is the name. Otherwise the whole trimmed text is
/// the type. The stored type keeps its decorations, with runs of whitespace
/// collapsed to single spaces.
pub fn parse_parameter(text: &str) -> Parameter {
    let trimmed = text.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let detection_tokens: Vec<&str> = tokens
        .iter()
        .map(|token| token.trim_matches(['*', '&']))
        .filter(|token| !token.is_empty() && *token != "const")
        .collect();

    if detection_tokens.len() < 2 {
        return Parameter::unnamed(trimmed);
    }

    let name = detection_tokens[detection_tokens.len() - 1];
    let last = tokens[tokens.len() - 1];

    // `int *p` keeps its `*` in the type; `int* p` and `int *p` agree.
    let type_text = if last.trim_start_matches(['*', '&']) == name {
        &trimmed[..trimmed.len() - name.len()]
    } else {
        &trimmed[..trimmed.len() - last.len()]
    };

    Parameter::named(type_text.split_whitespace().collect::<Vec<_>>().join(" "), name)
}
