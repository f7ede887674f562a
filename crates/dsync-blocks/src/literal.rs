//! Lenient object-literal normalization.
//!
//! Component files embed their definition as a JavaScript object literal.
//! Developers touch these by hand, so keys may be unquoted and strings may
//! use single quotes:
//!
//! ```text
//! {prop: "value", 'prop2': 1, prop3: ['value', 0]}
//! ```
//!
//! [`format`] rewrites such text token by token into strict JSON:
//!
//! ```text
//! {"prop":"value","prop2":1,"prop3":["value",0]}
//! ```
//!
//! This is not a JavaScript evaluator. Comments, trailing commas, template
//! strings and expressions are not understood; malformed input produces
//! malformed output, which [`parse_literal`] then rejects.

use serde_json::Value;

use crate::{Error, Result};

const SEPARATORS: [char; 6] = ['{', '}', '[', ']', ':', ','];

const KEYWORDS: [&str; 3] = ["true", "false", "null"];

/// A lexical unit of a lenient literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// One of `{ } [ ] : ,`
    Separator(char),
    /// A `"..."` string, quotes included, already strict.
    DoubleQuoted(String),
    /// A `'...'` string, quotes included.
    SingleQuoted(String),
    /// A bare token starting with a digit, or `-` and a digit.
    Number(String),
    /// `true`, `false` or `null`.
    Keyword(String),
    /// Any other bare word, typically an unquoted key.
    Bare(String),
}

impl Token {
    fn classify(text: String) -> Self {
        let mut chars = text.chars();
        let first = chars.next();
        let second = chars.next();
        match first {
            Some('"') => Token::DoubleQuoted(text),
            Some('\'') => Token::SingleQuoted(text),
            Some(c) if c.is_ascii_digit() => Token::Number(text),
            Some('-') if second.is_some_and(|c| c.is_ascii_digit()) => Token::Number(text),
            _ if KEYWORDS.contains(&text.as_str()) => Token::Keyword(text),
            _ => Token::Bare(text),
        }
    }

    /// Append the strict JSON form of this token to `out`.
    fn write_strict(&self, out: &mut String) {
        match self {
            Token::Separator(c) => out.push(*c),
            Token::DoubleQuoted(text) | Token::Number(text) | Token::Keyword(text) => {
                out.push_str(text)
            }
            Token::SingleQuoted(text) => requote(text, out),
            Token::Bare(text) => {
                out.push('"');
                out.push_str(text);
                out.push('"');
            }
        }
    }
}

/// Split a lenient literal into tokens.
///
/// Whitespace outside quotes is dropped. Inside a quoted run everything is
/// kept verbatim, and a backslash protects the character after it.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in input.chars() {
        if let Some(open) = quote {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == open {
                quote = None;
            }
            continue;
        }

        if c.is_whitespace() {
            continue;
        }

        if SEPARATORS.contains(&c) {
            flush(&mut current, &mut tokens);
            tokens.push(Token::Separator(c));
            continue;
        }

        if c == '"' || c == '\'' {
            quote = Some(c);
        }
        current.push(c);
    }
    flush(&mut current, &mut tokens);

    tokens
}

fn flush(current: &mut String, tokens: &mut Vec<Token>) {
    if !current.is_empty() {
        tokens.push(Token::classify(std::mem::take(current)));
    }
}

/// Rewrite `'...'` as `"..."`: `\'` loses its backslash, a bare `"` gains one.
fn requote(text: &str, out: &mut String) {
    let inner = &text[1..];
    let inner = inner.strip_suffix('\'').unwrap_or(inner);

    out.push('"');
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\'') => out.push('\''),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out.push('"');
}

/// Convert a lenient object literal into compact strict JSON text.
///
/// Empty input is returned unchanged.
///
/// # Example
/// ```
/// use dsync_blocks::literal::format;
///
/// let json = format("{padding: {top: 10}, color: 'red'}");
/// assert_eq!(json, r#"{"padding":{"top":10},"color":"red"}"#);
/// ```
pub fn format(input: &str) -> String {
    if input.is_empty() {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    for token in tokenize(input) {
        token.write_strict(&mut out);
    }
    out
}

/// Normalize a lenient literal and parse it into a structured value.
pub fn parse_literal(literal: &str) -> Result<Value> {
    let strict = format(literal);
    serde_json::from_str(&strict).map_err(|source| Error::InvalidLiteral {
        excerpt: excerpt(literal),
        source,
    })
}

fn excerpt(literal: &str) -> String {
    const LIMIT: usize = 40;
    let flat: String = literal.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &flat[..idx]),
        None => flat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_format_mixed_quoting() {
        let js = r#"{prop: "value", 'prop2': 1, prop3: ['value', 0], child: {"child:prop": 'value'}}"#;
        let expected =
            r#"{"prop":"value","prop2":1,"prop3":["value",0],"child":{"child:prop":"value"}}"#;
        assert_eq!(format(js), expected);
    }

    #[test]
    fn test_format_line_breaks() {
        let js = "{\n                prop: \"value\"\n            }";
        assert_eq!(format(js), r#"{"prop":"value"}"#);
    }

    #[test]
    fn test_format_empty_input_unchanged() {
        assert_eq!(format(""), "");
    }

    #[test]
    fn test_format_keeps_keywords_and_negative_numbers() {
        let js = "{visible: true, hidden: false, gap: null, offset: -4, scale: 1.5e2}";
        assert_eq!(
            format(js),
            r#"{"visible":true,"hidden":false,"gap":null,"offset":-4,"scale":1.5e2}"#
        );
    }

    #[test]
    fn test_format_keeps_whitespace_inside_strings() {
        assert_eq!(
            format("{font: 'Open Sans', label:\t\"a b\"}"),
            r#"{"font":"Open Sans","label":"a b"}"#
        );
    }

    #[test]
    fn test_format_separators_inside_quotes_are_text() {
        assert_eq!(
            format("{'a:b': \"{x, y}\", sel: ':hover'}"),
            r#"{"a:b":"{x, y}","sel":":hover"}"#
        );
    }

    #[test]
    fn test_format_single_quoted_escapes() {
        assert_eq!(format(r#"{q: 'it\'s "quoted"'}"#), r#"{"q":"it's \"quoted\""}"#);
    }

    #[test]
    fn test_format_double_quoted_escapes_survive() {
        let js = r#"{"q": "say \"hi\"", 'k': 'a\\b'}"#;
        assert_eq!(format(js), r#"{"q":"say \"hi\"","k":"a\\b"}"#);
    }

    #[test]
    fn test_format_bare_top_level_value() {
        assert_eq!(format("42"), "42");
        assert_eq!(format("primary"), r#""primary""#);
    }

    #[test]
    fn test_tokenize_classes() {
        let tokens = tokenize("{a: 'b', \"c\": [1, true]}");
        assert_eq!(
            tokens,
            vec![
                Token::Separator('{'),
                Token::Bare("a".into()),
                Token::Separator(':'),
                Token::SingleQuoted("'b'".into()),
                Token::Separator(','),
                Token::DoubleQuoted("\"c\"".into()),
                Token::Separator(':'),
                Token::Separator('['),
                Token::Number("1".into()),
                Token::Separator(','),
                Token::Keyword("true".into()),
                Token::Separator(']'),
                Token::Separator('}'),
            ]
        );
    }

    #[test]
    fn test_parse_literal_value() {
        let value = parse_literal("{root: {padding: {top: 0}, color: 'red'}}").unwrap();
        assert_eq!(value, json!({"root": {"padding": {"top": 0}, "color": "red"}}));
    }

    #[test]
    fn test_parse_literal_rejects_unbalanced_input() {
        let err = parse_literal("{root: {padding: 1}").unwrap_err();
        assert!(matches!(err, Error::InvalidLiteral { .. }));
        assert!(err.to_string().contains("{root: {padding: 1}"));
    }

    #[test]
    fn test_excerpt_truncates_long_literals() {
        let long = format!("{{key: '{}'}}", "x".repeat(100));
        let short = excerpt(&long);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), 43);
    }
}
