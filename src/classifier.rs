//! # Resource Classifier
//!
//! Decides, for one field of one record, whether it is part of the identifier,
//! a structural member, an attribute, or a to-one / to-many relationship.
//!
//! Two shapes are supported:
//!
//! - [`Shape::Declared`]: the record came from a [`Resource`](crate::schema::Resource)
//!   type and carries a [`Schema`]. Classification is a static lookup.
//! - [`Shape::Dynamic`]: the record is a generic JSON map. A field is a
//!   relationship iff its value (or every element of a non-empty array)
//!   exposes a non-empty `id` and `type`.
//!
//! Classification never fails. Anything ambiguous is an attribute.

use crate::document::keys;
use crate::document::ResourceIdentifier;
use crate::schema::{FieldKind, Schema};
use serde_json::Value;

/// The role a field plays in its record's resource object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    /// `id` or `type`.
    Identifier,
    /// `links` or `meta`: lifted onto the resource object itself.
    Structural,
    /// `attributes` or `relationships` used as a record field name.
    Reserved,
    Attribute,
    ToOne,
    ToMany,
}

impl FieldClass {
    pub fn is_relationship(self) -> bool {
        matches!(self, FieldClass::ToOne | FieldClass::ToMany)
    }
}

/// How the fields of a record are to be classified.
#[derive(Debug, Clone)]
pub enum Shape {
    Dynamic,
    Declared(Schema),
}

impl Shape {
    /// Classifies field `name` holding `value`.
    pub fn classify(&self, name: &str, value: &Value) -> FieldClass {
        match name {
            keys::ID | keys::TYPE => return FieldClass::Identifier,
            keys::LINKS | keys::META => return FieldClass::Structural,
            keys::ATTRIBUTES | keys::RELATIONSHIPS => return FieldClass::Reserved,
            _ => {}
        }

        match self {
            Shape::Declared(schema) => match schema.kind_of(name) {
                FieldKind::Attribute => FieldClass::Attribute,
                FieldKind::ToOne(_) => FieldClass::ToOne,
                FieldKind::ToMany(_) => FieldClass::ToMany,
            },
            Shape::Dynamic => classify_dynamic(value),
        }
    }

    /// Shape of the record(s) referenced by relationship field `name`.
    pub fn target(&self, name: &str) -> Shape {
        match self {
            Shape::Declared(schema) => schema
                .kind_of(name)
                .target()
                .map(Shape::Declared)
                .unwrap_or(Shape::Dynamic),
            Shape::Dynamic => Shape::Dynamic,
        }
    }

    /// Declared relationship fields that must appear even when absent from the
    /// serialized record. Empty for dynamic shapes.
    pub fn declared_relationships(&self) -> Vec<&'static str> {
        match self {
            Shape::Declared(schema) => schema.relationships().map(|(name, _)| name).collect(),
            Shape::Dynamic => Vec::new(),
        }
    }
}

fn classify_dynamic(value: &Value) -> FieldClass {
    match value {
        Value::Object(_) if ResourceIdentifier::from_value(value).is_some() => FieldClass::ToOne,
        Value::Array(items)
            if !items.is_empty()
                && items
                    .iter()
                    .all(|item| ResourceIdentifier::from_value(item).is_some()) =>
        {
            FieldClass::ToMany
        }
        _ => FieldClass::Attribute,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location() -> Schema {
        Schema::new().attribute("region")
    }

    #[test]
    fn test_reserved_names_bypass_classification() {
        let record = json!({ "id": "x", "type": "t" });
        for shape in [Shape::Dynamic, Shape::Declared(Schema::new())] {
            assert_eq!(shape.classify("id", &record), FieldClass::Identifier);
            assert_eq!(shape.classify("type", &record), FieldClass::Identifier);
            assert_eq!(shape.classify("links", &record), FieldClass::Structural);
            assert_eq!(shape.classify("meta", &record), FieldClass::Structural);
            assert_eq!(shape.classify("attributes", &record), FieldClass::Reserved);
            assert_eq!(shape.classify("relationships", &record), FieldClass::Reserved);
        }
    }

    #[test]
    fn test_dynamic_duck_typing() {
        let shape = Shape::Dynamic;
        assert_eq!(
            shape.classify("location", &json!({ "id": "l0", "type": "locations" })),
            FieldClass::ToOne
        );
        assert_eq!(
            shape.classify("comments", &json!([{ "id": "1", "type": "comments" }])),
            FieldClass::ToMany
        );
        // No `type`: plain nested data.
        assert_eq!(
            shape.classify("region", &json!({ "id": "r0", "name": "Paris" })),
            FieldClass::Attribute
        );
        // Mixed arrays stay attributes.
        assert_eq!(
            shape.classify("mixed", &json!([{ "id": "1", "type": "a" }, { "id": "2" }])),
            FieldClass::Attribute
        );
        assert_eq!(shape.classify("empty", &json!([])), FieldClass::Attribute);
        assert_eq!(shape.classify("nothing", &Value::Null), FieldClass::Attribute);
        assert_eq!(shape.classify("keys", &json!(["kA", "kB"])), FieldClass::Attribute);
    }

    #[test]
    fn test_declared_lookup_ignores_value_shape() {
        let shape = Shape::Declared(
            Schema::new()
                .to_one("location", location)
                .to_many("visits", location),
        );

        assert_eq!(shape.classify("location", &Value::Null), FieldClass::ToOne);
        assert_eq!(shape.classify("visits", &json!([])), FieldClass::ToMany);
        // Looks like a record but is not declared as one.
        assert_eq!(
            shape.classify("extra", &json!({ "id": "1", "type": "x" })),
            FieldClass::Attribute
        );
    }

    #[test]
    fn test_target_shape_follows_declaration() {
        let shape = Shape::Declared(Schema::new().to_one("location", location));
        assert!(matches!(shape.target("location"), Shape::Declared(_)));
        assert!(matches!(shape.target("other"), Shape::Dynamic));
        assert!(matches!(Shape::Dynamic.target("location"), Shape::Dynamic));
        assert_eq!(shape.declared_relationships(), vec!["location"]);
    }
}
