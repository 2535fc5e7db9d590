//! # Resource Trait & Field Descriptors
//!
//! The `Resource` trait is the contract every record type implements to be encoded
//! by the [`JsonApiEncoder`](crate::encoder::JsonApiEncoder). It ties a plain
//! `serde` type to a statically declared [`Schema`] that says which of its fields
//! point at other identified records.
//!
//! # Architecture Note
//! Why declare fields instead of inspecting values?
//! A value that happens to contain `id` and `type` keys is not necessarily a
//! related record: it may be plain nested data. With a declared schema the
//! classifier never guesses for typed records. Only fields declared
//! [`FieldKind::ToOne`] or [`FieldKind::ToMany`] become relationships, every
//! other field is an attribute.
//!
//! Target schemas are referenced through `fn() -> Schema` pointers, so
//! self-referential and mutually recursive record types can be declared:
//!
//! ```rust
//! use jsonapi_codable::schema::{Resource, Schema};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Person {
//!     id: String,
//!     #[serde(rename = "type")]
//!     kind: String,
//!     name: String,
//!     friends: Vec<Person>,
//! }
//!
//! impl Resource for Person {
//!     fn schema() -> Schema {
//!         Schema::new().attribute("name").to_many("friends", Person::schema)
//!     }
//! }
//! ```

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Lazily produced schema of a relationship target.
pub type SchemaFn = fn() -> Schema;

/// Declared role of a single record field.
#[derive(Clone, Copy)]
pub enum FieldKind {
    Attribute,
    ToOne(SchemaFn),
    ToMany(SchemaFn),
}

impl FieldKind {
    pub fn is_relationship(&self) -> bool {
        !matches!(self, FieldKind::Attribute)
    }

    /// Schema of the related record, for relationship fields.
    pub fn target(&self) -> Option<Schema> {
        match self {
            FieldKind::Attribute => None,
            FieldKind::ToOne(target) | FieldKind::ToMany(target) => Some(target()),
        }
    }
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Attribute => f.write_str("Attribute"),
            FieldKind::ToOne(_) => f.write_str("ToOne"),
            FieldKind::ToMany(_) => f.write_str("ToMany"),
        }
    }
}

/// Field descriptor table for one record type.
///
/// Fields are keyed by their **serialized** name, i.e. after any
/// `#[serde(rename)]`.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<&'static str, FieldKind>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an attribute. Undeclared fields are attributes anyway.
    pub fn attribute(mut self, name: &'static str) -> Self {
        self.fields.insert(name, FieldKind::Attribute);
        self
    }

    pub fn to_one(mut self, name: &'static str, target: SchemaFn) -> Self {
        self.fields.insert(name, FieldKind::ToOne(target));
        self
    }

    pub fn to_many(mut self, name: &'static str, target: SchemaFn) -> Self {
        self.fields.insert(name, FieldKind::ToMany(target));
        self
    }

    /// Declared kind of `name`; `Attribute` when not declared.
    pub fn kind_of(&self, name: &str) -> FieldKind {
        self.fields
            .get(name)
            .copied()
            .unwrap_or(FieldKind::Attribute)
    }

    /// Declared relationship fields, in declaration order.
    pub fn relationships(&self) -> impl Iterator<Item = (&'static str, FieldKind)> + '_ {
        self.fields
            .iter()
            .filter(|(_, kind)| kind.is_relationship())
            .map(|(name, kind)| (*name, *kind))
    }
}

/// Trait that any record type must implement to be encoded with a declared schema.
///
/// The record must serialize to a JSON object carrying string `id` and `type`
/// members. Decoding only needs `DeserializeOwned`; the trait bound is there so
/// a type that encodes can always be decoded back.
pub trait Resource: Serialize + DeserializeOwned {
    /// The field descriptor table for this record type.
    fn schema() -> Schema;
}
