//! Tag-body lexer: splits the raw text between `<` and `>` into a tag name
//! and an attribute list.
//!
//! The splitting model is deliberately simple: tokens are separated by single
//! spaces, so quoted values containing spaces come apart. That matches the
//! engine's permissive, never-fail posture; the tree builder tolerates
//! whatever falls out.

/// Split a raw tag body into a lower-cased tag name and attribute pairs.
///
/// Contract:
/// - The first space-separated token, lower-cased, is the tag name (it keeps
///   any `/` or `!` prefix for the tree builder to dispatch on).
/// - A token containing `=` splits on the first `=` only; the key is
///   case-folded. A value that begins and ends with the same quote character
///   and is longer than two characters has the quotes stripped.
/// - A token without `=` becomes a boolean attribute with an empty value.
/// - Duplicate keys keep the first occurrence; empty keys and empty tokens
///   are dropped silently. No entity decoding happens here.
pub(crate) fn lex_tag(body: &str) -> (String, Vec<(String, String)>) {
    let mut parts = body.split(' ');
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();

    fn push_unique(attributes: &mut Vec<(String, String)>, key: String, value: String) {
        if key.is_empty() {
            return;
        }
        if attributes.iter().any(|(k, _)| *k == key) {
            return;
        }
        attributes.push((key, value));
    }

    let mut attributes: Vec<(String, String)> = Vec::new();
    for token in parts {
        if token.is_empty() {
            continue;
        }
        match token.split_once('=') {
            Some((key, value)) => {
                push_unique(
                    &mut attributes,
                    key.to_ascii_lowercase(),
                    strip_quotes(value).to_string(),
                );
            }
            None => {
                push_unique(&mut attributes, token.to_ascii_lowercase(), String::new());
            }
        }
    }

    (name, attributes)
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() > 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}
