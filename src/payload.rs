// SPDX-License-Identifier: MIT OR Apache-2.0

//! The outgoing message payload.
//!
//! The hosting runtime can deliver either a pre-rendered line of text or a
//! template with arguments. That choice is resolved exactly once, here,
//! where the payload enters the core; everything downstream matches on the
//! enum instead of re-inspecting wrapper shapes.

use crate::error::FormatError;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum MessagePayload {
    /// Already-rendered text, logged as-is.
    Plain { text: String },
    /// A format string to bind against `args`.
    Templated { format: String, args: Vec<Value> },
}

impl MessagePayload {
    pub fn plain(text: impl Into<String>) -> Self {
        MessagePayload::Plain { text: text.into() }
    }

    /// Builds a templated payload from runtime-supplied parts.
    ///
    /// An absent format string is a programming error at the call site, not
    /// a formatting condition, so it is reported immediately instead of
    /// being rendered around.
    pub fn templated(format: Option<String>, args: Vec<Value>) -> Result<Self, FormatError> {
        match format {
            Some(format) => Ok(MessagePayload::Templated { format, args }),
            None => Err(FormatError::MissingTemplate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MessagePayload;
    use crate::error::FormatError;
    use serde_json::json;

    #[test]
    fn absent_format_is_rejected_up_front() {
        let result = MessagePayload::templated(None, vec![json!(1)]);
        assert_eq!(result, Err(FormatError::MissingTemplate));
    }

    #[test]
    fn present_format_builds_a_templated_payload() {
        let payload = MessagePayload::templated(Some("{n}".into()), vec![json!(1)])
            .expect("format was supplied");
        assert_eq!(
            payload,
            MessagePayload::Templated {
                format: "{n}".into(),
                args: vec![json!(1)],
            }
        );
    }
}
