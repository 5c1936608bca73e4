//! JSON Schema types.
//!
//! Only the subset needed to describe path parameters and free-form bodies.

use serde::{Deserialize, Serialize};

/// JSON Schema representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Schema {
    /// Reference to another schema.
    Ref(RefSchema),
    /// Primitive type schema.
    Primitive(PrimitiveSchema),
    /// Any value (`{}`).
    Any(AnySchema),
}

/// Schema reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefSchema {
    /// Reference path (e.g., "#/components/schemas/Item").
    #[serde(rename = "$ref")]
    pub reference: String,
}

/// Primitive type schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveSchema {
    /// JSON Schema type.
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Format hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// The empty schema, accepting any value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnySchema {}

/// JSON Schema primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// String type.
    String,
    /// Number type (float).
    Number,
    /// Integer type.
    Integer,
    /// Boolean type.
    Boolean,
    /// Null type.
    Null,
}

impl Schema {
    fn primitive(schema_type: SchemaType, format: Option<&str>) -> Self {
        Self::Primitive(PrimitiveSchema {
            schema_type,
            format: format.map(str::to_string),
            title: None,
        })
    }

    /// A string schema.
    #[must_use]
    pub fn string() -> Self {
        Self::primitive(SchemaType::String, None)
    }

    /// A string schema with a format hint (`uuid`, `path`, ...).
    #[must_use]
    pub fn string_format(format: &str) -> Self {
        Self::primitive(SchemaType::String, Some(format))
    }

    /// An integer schema.
    #[must_use]
    pub fn integer(format: Option<&str>) -> Self {
        Self::primitive(SchemaType::Integer, format)
    }

    /// A number schema.
    #[must_use]
    pub fn number(format: Option<&str>) -> Self {
        Self::primitive(SchemaType::Number, format)
    }

    /// A boolean schema.
    #[must_use]
    pub fn boolean() -> Self {
        Self::primitive(SchemaType::Boolean, None)
    }

    /// The empty schema.
    #[must_use]
    pub fn any() -> Self {
        Self::Any(AnySchema {})
    }

    /// A `$ref` to `#/components/schemas/{name}`.
    #[must_use]
    pub fn reference(name: &str) -> Self {
        Self::Ref(RefSchema {
            reference: format!("#/components/schemas/{}", name),
        })
    }

    /// Sets the title of a primitive schema. Other variants are unchanged.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        if let Self::Primitive(p) = &mut self {
            p.title = Some(title.into());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_serializes_type_and_format() {
        let json = serde_json::to_string(&Schema::integer(Some("int64"))).unwrap();
        assert_eq!(json, r#"{"type":"integer","format":"int64"}"#);
    }

    #[test]
    fn any_serializes_as_empty_object() {
        assert_eq!(serde_json::to_string(&Schema::any()).unwrap(), "{}");
        let parsed: Schema = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, Schema::any());
    }

    #[test]
    fn reference_points_into_components() {
        let json = serde_json::to_string(&Schema::reference("Item")).unwrap();
        assert_eq!(json, r##"{"$ref":"#/components/schemas/Item"}"##);
    }

    #[test]
    fn title_only_applies_to_primitives() {
        let titled = Schema::string().with_title("Name");
        assert!(matches!(titled, Schema::Primitive(ref p) if p.title.as_deref() == Some("Name")));
        assert_eq!(Schema::any().with_title("ignored"), Schema::any());
    }
}
