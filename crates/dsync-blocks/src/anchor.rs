//! Locating the embedded definition in a component file.
//!
//! A component file carries its last synchronized definition as the second
//! argument of a factory call:
//!
//! ```text
//! export const style = createStyle('card', {
//!     "root": { "color": "red" }
//! })
//! ```
//!
//! The call head (`createStyle('card',`) is found with a regex. The extent of
//! the literal is found by scanning forward with quote awareness until the
//! parenthesis closing the call, so string values such as `"rgb(0, 0, 0)"`
//! do not cut the literal short. The renderer in [`crate::template`] writes
//! exactly this shape, which makes the two modules one serialization contract.

use std::ops::Range;

use regex::Regex;
use serde_json::{Map, Value};

use crate::literal::parse_literal;
use crate::{Error, Result};

/// A definition literal found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embedded {
    /// The component name passed as the first argument, unquoted.
    pub name: String,
    /// The raw literal text, trimmed.
    pub literal: String,
    /// Byte range of `literal` within the searched text.
    pub span: Range<usize>,
}

/// Anchor for one factory function, e.g. `createStyle`.
#[derive(Debug, Clone)]
pub struct Anchor {
    factory: String,
    head: Regex,
}

impl Anchor {
    /// Build the anchor for `factory`.
    ///
    /// The call may be written as `factory(` or `_factory(` (the svelte
    /// flavor re-imports the factory under a leading underscore). The first
    /// argument must be a quoted string.
    pub fn new(factory: &str) -> Result<Self> {
        let pattern = format!(
            r#"(?:^|[^A-Za-z0-9_$])_?{}\(\s*('(?:[^'\\]|\\.)*'|"(?:[^"\\]|\\.)*")\s*,"#,
            regex::escape(factory)
        );
        let head = Regex::new(&pattern).map_err(|source| Error::Pattern {
            factory: factory.to_string(),
            source,
        })?;

        Ok(Self {
            factory: factory.to_string(),
            head,
        })
    }

    pub fn factory(&self) -> &str {
        &self.factory
    }

    /// Find the first embedded literal in `text`.
    ///
    /// Returns `Ok(None)` when the file has no factory call at all.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnterminatedLiteral`] when the call head is present
    /// but the call is never closed.
    pub fn extract(&self, text: &str) -> Result<Option<Embedded>> {
        let Some(caps) = self.head.captures(text) else {
            return Ok(None);
        };
        let (Some(name), Some(whole)) = (caps.get(1), caps.get(0)) else {
            return Ok(None);
        };

        let rest = &text[whole.end()..];
        let close = closing_paren(rest).ok_or_else(|| Error::UnterminatedLiteral {
            factory: self.factory.clone(),
        })?;

        let raw = &rest[..close];
        let leading = raw.len() - raw.trim_start().len();
        let literal = raw.trim();
        let start = whole.end() + leading;

        Ok(Some(Embedded {
            name: unquote(name.as_str()),
            literal: literal.to_string(),
            span: start..start + literal.len(),
        }))
    }

    /// Extract and parse the embedded definition.
    ///
    /// A file without an anchor yields an empty object: there is no
    /// previous definition to preserve.
    pub fn extract_definition(&self, text: &str) -> Result<Value> {
        match self.extract(text)? {
            Some(embedded) => {
                tracing::debug!(
                    factory = %self.factory,
                    name = %embedded.name,
                    "Found embedded definition"
                );
                parse_literal(&embedded.literal)
            }
            None => Ok(Value::Object(Map::new())),
        }
    }
}

/// Byte offset of the `)` that closes the call, skipping quoted text and
/// anything nested inside brackets.
fn closing_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, c) in text.char_indices() {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == open {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '{' | '[' | '(' => depth += 1,
            '}' | ']' => depth = depth.checked_sub(1)?,
            ')' if depth == 0 => return Some(idx),
            ')' => depth -= 1,
            _ => {}
        }
    }

    None
}

fn unquote(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}
