// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsed message templates.
//!
//! A template is an ordered sequence of tokens: literal text spans and
//! property placeholders. Placeholders are delimited by `{` and `}`; the body
//! is a non-negative integer (positional) or an identifier (named),
//! optionally followed by `:` and a format hint that is carried through to
//! the record untouched. `{{` and `}}` are escaped braces.
//!
//! Parsing is permissive: anything that does not scan as a well-formed
//! placeholder stays in the output as literal text, so a bad log statement
//! still renders rather than failing the call that logged it.

use crate::property_map::PropertyMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(String),
    Property(PropertyToken),
}

/// One `{name}` or `{name:hint}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PropertyToken {
    name: String,
    hint: Option<String>,
    /// The original text span, kept so an unbound placeholder can be
    /// reproduced verbatim.
    raw: String,
}

impl PropertyToken {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// `Some(index)` when the placeholder body is a decimal index.
    pub(crate) fn positional_index(&self) -> Option<usize> {
        if self.name.bytes().all(|b| b.is_ascii_digit()) {
            self.name.parse().ok()
        } else {
            None
        }
    }
}

/// An immutable, parsed format string, shared by every caller that logs the
/// same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    raw: String,
    tokens: Vec<Token>,
}

impl Template {
    /// Parses `format`. Never fails; malformed placeholder runs become
    /// literal text.
    pub fn parse(format: &str) -> Template {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut input = format;
        while !input.is_empty() {
            if let Some(rest) = input.strip_prefix("{{") {
                literal.push('{');
                input = rest;
            } else if let Some(rest) = input.strip_prefix("}}") {
                literal.push('}');
                input = rest;
            } else if input.starts_with('{') {
                match placeholder_at(input) {
                    Some((token, consumed)) => {
                        if !literal.is_empty() {
                            tokens.push(Token::Literal(std::mem::take(&mut literal)));
                        }
                        tokens.push(Token::Property(token));
                        input = &input[consumed..];
                    }
                    None => {
                        literal.push('{');
                        input = &input[1..];
                    }
                }
            } else if let Some(rest) = input.strip_prefix('}') {
                literal.push('}');
                input = rest;
            } else {
                let span = input.find(['{', '}']).unwrap_or(input.len());
                literal.push_str(&input[..span]);
                input = &input[span..];
            }
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }
        Template {
            raw: format.to_owned(),
            tokens,
        }
    }

    /// The format string this template was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub(crate) fn property_tokens(&self) -> impl Iterator<Item = &PropertyToken> {
        self.tokens.iter().filter_map(|token| match token {
            Token::Property(property) => Some(property),
            Token::Literal(_) => None,
        })
    }

    /// Substitutes bound values into the literal spans, in template order.
    /// Placeholders with no binding reproduce their original `{...}` text.
    pub fn render(&self, properties: &PropertyMap) -> String {
        let mut out = String::with_capacity(self.raw.len());
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Property(property) => match properties.get(property.name()) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => out.push_str(&property.raw),
                },
            }
        }
        out
    }
}

/// Scans a placeholder starting at the `{` that begins `input`. Returns the
/// token and the number of bytes consumed, or `None` if the run is not a
/// well-formed placeholder.
fn placeholder_at(input: &str) -> Option<(PropertyToken, usize)> {
    let close = input.find('}')?;
    let body = &input[1..close];
    let (name, hint) = match body.split_once(':') {
        Some((name, hint)) => (name, Some(hint)),
        None => (body, None),
    };
    if name.is_empty()
        || name.contains('{')
        || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return None;
    }
    if hint.is_some_and(|hint| hint.contains('{')) {
        return None;
    }
    let token = PropertyToken {
        name: name.to_owned(),
        hint: hint.map(str::to_owned),
        raw: input[..=close].to_owned(),
    };
    Some((token, close + 1))
}
