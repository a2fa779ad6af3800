// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bound property values and their textual rendering.
//!
//! Arguments arrive as opaque [`serde_json::Value`]s. Binding decides how much
//! structure to preserve: the structured path *destructures* a value
//! (arrays become [`PropertyValue::Sequence`], objects become
//! [`PropertyValue::Structure`]), while the scalar fallback wraps the whole
//! value as an opaque [`PropertyValue::Scalar`].
//!
//! Rendering is canonical and stable, because downstream consumers compare
//! rendered output byte-for-byte: sequences render as `[a, b, c]`, structures
//! as `{name: value}`, and strings are always double-quoted.

use serde::Serialize;
use serde::ser::Serializer;
use serde_json::Value;
use std::fmt::{self, Display};

/// A value bound to a placeholder or carried by a context enrichment.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// The argument as supplied, no decomposition.
    Scalar(Value),
    /// A destructured array, element by element.
    Sequence(Vec<PropertyValue>),
    /// A destructured object, field by field.
    Structure(Vec<(String, PropertyValue)>),
}

impl PropertyValue {
    /// Recursively decomposes a raw argument into sequence/structure form.
    pub fn destructure(value: &Value) -> PropertyValue {
        match value {
            Value::Array(items) => {
                PropertyValue::Sequence(items.iter().map(PropertyValue::destructure).collect())
            }
            Value::Object(fields) => PropertyValue::Structure(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), PropertyValue::destructure(value)))
                    .collect(),
            ),
            other => PropertyValue::Scalar(other.clone()),
        }
    }

    /// Wraps a raw argument without decomposition.
    pub fn scalar(value: &Value) -> PropertyValue {
        PropertyValue::Scalar(value.clone())
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Value's Display is compact JSON, which already quotes strings.
            PropertyValue::Scalar(value) => Display::fmt(value, f),
            PropertyValue::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    Display::fmt(item, f)?;
                }
                f.write_str("]")
            }
            PropertyValue::Structure(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyValue::Scalar(value) => value.serialize(serializer),
            PropertyValue::Sequence(items) => serializer.collect_seq(items),
            PropertyValue::Structure(fields) => {
                serializer.collect_map(fields.iter().map(|(name, value)| (name, value)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PropertyValue;
    use serde_json::json;

    #[test]
    fn destructured_sequence_renders_bracketed() {
        let value = PropertyValue::destructure(&json!([0, 1, 2]));
        assert_eq!(value.to_string(), "[0, 1, 2]");
    }

    #[test]
    fn strings_render_double_quoted() {
        let value = PropertyValue::destructure(&json!(["One", "Two"]));
        assert_eq!(value.to_string(), "[\"One\", \"Two\"]");
        let scalar = PropertyValue::destructure(&json!("plain"));
        assert_eq!(scalar.to_string(), "\"plain\"");
    }

    #[test]
    fn floats_keep_their_shortest_form() {
        let value = PropertyValue::destructure(&json!([0.1, 0.2, 0.3]));
        assert_eq!(value.to_string(), "[0.1, 0.2, 0.3]");
    }

    #[test]
    fn nested_structures_render_by_field() {
        let value = PropertyValue::destructure(&json!({"id": 7, "tags": ["a"]}));
        assert_eq!(value.to_string(), "{id: 7, tags: [\"a\"]}");
    }

    #[test]
    fn scalar_keeps_the_value_opaque() {
        let value = PropertyValue::scalar(&json!([0, 1, 2]));
        assert_eq!(value, PropertyValue::Scalar(json!([0, 1, 2])));
        // Opaque form is compact JSON, not the canonical spaced form.
        assert_eq!(value.to_string(), "[0,1,2]");
    }

    #[test]
    fn serializes_transparently() {
        let value = PropertyValue::destructure(&json!({"id": 7, "tags": [1, 2]}));
        let round = serde_json::to_value(&value).unwrap();
        assert_eq!(round, json!({"id": 7, "tags": [1, 2]}));
    }
}
