// SPDX-License-Identifier: MIT OR Apache-2.0

//! Template-to-properties binding and rendering.
//!
//! [`TemplateFormatter`] runs a fixed two-stage strategy:
//!
//! 1. **Structured binding** pairs each distinct placeholder with the
//!    correspondingly-positioned argument and destructures the value, so
//!    arrays and objects keep their shape in the property map and render in
//!    canonical bracketed form.
//! 2. **Scalar fallback** runs when the structured stage declines (too few
//!    arguments, or a positional index out of range). It walks placeholders
//!    in order of appearance, binds the next argument as an opaque scalar,
//!    and stops quietly when arguments run out.
//!
//! Either way the call produces a rendered message; binding trouble is never
//! an error the caller sees.

use crate::error::BindError;
use crate::property_map::PropertyMap;
use crate::template::Template;
use crate::template_cache::TemplateCache;
use crate::value::PropertyValue;
use serde_json::Value;
use std::fmt::Debug;

/// Converts a format string plus arguments into rendered text and structured
/// properties.
///
/// This is the seam the facade dispatches through; tests substitute a
/// counting double to prove disabled levels never reach the formatter.
pub trait MessageFormatter: Debug + Send + Sync {
    fn format(&self, template: &str, args: &[Value]) -> RenderedMessage;
}

/// The outcome of one formatting call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub text: String,
    pub properties: PropertyMap,
}

/// The production [`MessageFormatter`].
///
/// Owns its [`TemplateCache`]; construct one formatter and share it across
/// loggers to share the cache.
#[derive(Debug, Default)]
pub struct TemplateFormatter {
    cache: TemplateCache,
}

impl TemplateFormatter {
    pub fn new() -> Self {
        Self {
            cache: TemplateCache::new(),
        }
    }

    pub fn with_cache(cache: TemplateCache) -> Self {
        Self { cache }
    }

    /// The cache backing this formatter.
    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    fn try_structured_bind(
        &self,
        template: &Template,
        args: &[Value],
    ) -> Result<PropertyMap, BindError> {
        let mut properties = PropertyMap::new();
        let mut next_positional = 0usize;
        for token in template.property_tokens() {
            if properties.contains(token.name()) {
                continue;
            }
            let value = match token.positional_index() {
                Some(index) => args.get(index).ok_or(BindError::PositionalOutOfRange {
                    index,
                    arguments: args.len(),
                })?,
                None => {
                    let value = args.get(next_positional).ok_or(BindError::NotEnoughArguments {
                        arguments: args.len(),
                    })?;
                    next_positional += 1;
                    value
                }
            };
            properties.insert(token.name().to_owned(), PropertyValue::destructure(value));
        }
        Ok(properties)
    }

    fn scalar_fallback_bind(&self, template: &Template, args: &[Value]) -> PropertyMap {
        let mut properties = PropertyMap::new();
        // Placeholders pair with arguments by position of appearance, so a
        // repeated name consumes an argument but keeps its first binding.
        for (token, value) in template.property_tokens().zip(args) {
            properties.insert_if_absent(token.name().to_owned(), PropertyValue::scalar(value));
        }
        properties
    }
}

impl MessageFormatter for TemplateFormatter {
    fn format(&self, template: &str, args: &[Value]) -> RenderedMessage {
        let parsed = self.cache.parse(template);
        let properties = self
            .try_structured_bind(&parsed, args)
            .unwrap_or_else(|_declined| self.scalar_fallback_bind(&parsed, args));
        let text = parsed.render(&properties);
        RenderedMessage { text, properties }
    }
}
