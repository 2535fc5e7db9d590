//! # JSON:API Wire Model
//!
//! Typed mirror of the document format the encoder produces and the decoder
//! consumes.
//!
//! ## Key Types
//!
//! - [`ResourceIdentifier`]: the `(type, id)` pair that names a resource. It is the
//!   only key used for deduplication and lookup.
//! - [`ResourceObject`]: one flat record on the wire: identifier, attributes,
//!   relationships, optional links and meta.
//! - [`RelationshipRef`]: a to-one (possibly `null`) or to-many reference.
//! - [`Document`]: `data` plus the deduplicated `included` pool.
//!
//! # Architecture Note
//! These types are built fresh for every encode/decode call and never cached.
//! The decoder reads them leniently through the `from_value` constructors, which
//! return `None` instead of failing so each caller decides whether a malformed
//! member is fatal (`data`) or skippable (`included`).

pub mod keys;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// Generic JSON object, key order preserved.
pub type JsonMap = Map<String, Value>;

// =============================================================================
// 1. IDENTIFIERS
// =============================================================================

/// The `(type, id)` pair naming a resource across a document.
///
/// Two identifiers are equal iff both fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResourceIdentifier {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
        }
    }

    /// Extracts the identifier from any JSON object exposing non-empty string
    /// `id` and `type` members.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let id = object.get(keys::ID)?.as_str()?;
        let kind = object.get(keys::TYPE)?.as_str()?;
        if id.is_empty() || kind.is_empty() {
            return None;
        }
        Some(Self::new(id, kind))
    }

    /// `{"id": .., "type": ..}` as a plain JSON object.
    pub fn to_map(&self) -> JsonMap {
        let mut map = JsonMap::new();
        map.insert(keys::ID.to_string(), Value::String(self.id.clone()));
        map.insert(keys::TYPE.to_string(), Value::String(self.kind.clone()));
        map
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

// =============================================================================
// 2. RELATIONSHIPS
// =============================================================================

/// Linkage carried by a relationship member.
///
/// `ToMany` is listed first so untagged deserialization tries the array form
/// before the object/null form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipRef {
    ToMany(Vec<ResourceIdentifier>),
    ToOne(Option<ResourceIdentifier>),
}

impl RelationshipRef {
    /// Reads a relationship `data` member. Array elements without a valid
    /// identifier are dropped.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(RelationshipRef::ToOne(None)),
            Value::Array(items) => Some(RelationshipRef::ToMany(
                items
                    .iter()
                    .filter_map(|item| {
                        let identifier = ResourceIdentifier::from_value(item);
                        if identifier.is_none() {
                            warn!(%item, "Dropping linkage without identifier");
                        }
                        identifier
                    })
                    .collect(),
            )),
            Value::Object(_) => {
                ResourceIdentifier::from_value(value).map(|id| RelationshipRef::ToOne(Some(id)))
            }
            _ => None,
        }
    }
}

/// A relationship member: `{"data": <linkage>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub data: RelationshipRef,
}

impl From<RelationshipRef> for Relationship {
    fn from(data: RelationshipRef) -> Self {
        Self { data }
    }
}

// =============================================================================
// 3. RESOURCE OBJECTS
// =============================================================================

/// The wire representation of one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    #[serde(flatten)]
    pub identifier: ResourceIdentifier,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: JsonMap,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub relationships: IndexMap<String, Relationship>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<JsonMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonMap>,
}

impl ResourceObject {
    pub fn new(identifier: ResourceIdentifier) -> Self {
        Self {
            identifier,
            attributes: JsonMap::new(),
            relationships: IndexMap::new(),
            links: None,
            meta: None,
        }
    }

    /// Lenient read of a resource object. Returns `None` only when the
    /// identifier is missing; malformed optional members are ignored.
    pub fn from_value(value: &Value) -> Option<Self> {
        let identifier = ResourceIdentifier::from_value(value)?;
        let object = value.as_object()?;
        let mut resource = Self::new(identifier);

        if let Some(attributes) = object.get(keys::ATTRIBUTES).and_then(Value::as_object) {
            resource.attributes = attributes.clone();
        }

        if let Some(relationships) = object.get(keys::RELATIONSHIPS).and_then(Value::as_object) {
            for (name, member) in relationships {
                // Links-only relationship members carry no linkage to resolve.
                let Some(data) = member.get(keys::DATA) else {
                    continue;
                };
                match RelationshipRef::from_value(data) {
                    Some(linkage) => {
                        resource.relationships.insert(name.clone(), linkage.into());
                    }
                    None => warn!(relationship = %name, "Ignoring malformed relationship data"),
                }
            }
        }

        resource.links = object.get(keys::LINKS).and_then(Value::as_object).cloned();
        resource.meta = object.get(keys::META).and_then(Value::as_object).cloned();
        Some(resource)
    }
}

// =============================================================================
// 4. DOCUMENTS
// =============================================================================

/// Primary data of a document: a single resource or a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    Many(Vec<ResourceObject>),
    One(Box<ResourceObject>),
}

impl PrimaryData {
    pub fn resources(&self) -> Vec<&ResourceObject> {
        match self {
            PrimaryData::One(resource) => vec![resource.as_ref()],
            PrimaryData::Many(resources) => resources.iter().collect(),
        }
    }
}

/// A complete JSON:API document as produced by the encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub data: PrimaryData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<ResourceObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<JsonMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonMap>,
}

impl Document {
    /// Looks up an included resource by identifier.
    pub fn find_included(&self, identifier: &ResourceIdentifier) -> Option<&ResourceObject> {
        self.included
            .iter()
            .find(|resource| &resource.identifier == identifier)
    }
}
