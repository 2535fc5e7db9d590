//! # Graph Flattener
//!
//! Turns a plain object graph, where related records are embedded inline, into a
//! JSON:API [`Document`].
//!
//! ## Algorithm
//!
//! 1. Every root record must yield an identifier. All root identifiers are marked
//!    *visited* and *forbidden* before the walk starts, so a root is never
//!    re-described as an included resource.
//! 2. Each record is described as a [`ResourceObject`]: attributes are copied as
//!    is, relationship fields are replaced by the target identifiers only.
//! 3. Related records are walked depth-first in field order. A related record is
//!    pooled *before* its own relationships are walked, and an identifier that
//!    was already visited is never descended into again. The first body seen
//!    wins. This is what makes cyclic and diamond-shaped graphs terminate with
//!    exactly one entry per identifier.
//! 4. The pool is drained into `included` (first-discovery order), minus the
//!    forbidden root identifiers.
//!
//! Any visited record without an identifier aborts the whole call with
//! [`JsonApiError::NotSerializable`]; no partial document is produced.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_codable::encoder::JsonApiEncoder;
//! use serde_json::json;
//!
//! let record = json!({
//!     "id": "u0", "type": "users", "info": "x",
//!     "location": { "id": "l0", "type": "locations", "region": { "id": "r0", "name": "Paris" } }
//! });
//!
//! let document = JsonApiEncoder::new().value_to_document(&record).unwrap();
//! assert_eq!(document.included.len(), 1);
//! assert_eq!(document.included[0].identifier.id, "l0");
//! ```

use crate::classifier::{FieldClass, Shape};
use crate::document::{
    keys, Document, JsonMap, PrimaryData, RelationshipRef, ResourceIdentifier, ResourceObject,
};
use crate::error::{JsonApiError, Result};
use crate::index::IncludedPool;
use crate::schema::Resource;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, instrument, trace, warn};

/// Encodes records into JSON:API documents.
///
/// The encoder holds only output options; all traversal state is local to one
/// call, so a single encoder can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct JsonApiEncoder {
    pretty: bool,
    links: Option<JsonMap>,
    meta: Option<JsonMap>,
}

impl JsonApiEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Document-level `links`, emitted at the root of every encoded document.
    pub fn with_links(mut self, links: JsonMap) -> Self {
        self.links = Some(links);
        self
    }

    /// Document-level `meta`, emitted at the root of every encoded document.
    pub fn with_meta(mut self, meta: JsonMap) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Encodes one record to document bytes.
    pub fn encode<T: Resource>(&self, record: &T) -> Result<Vec<u8>> {
        let document = self.to_document(record)?;
        self.write(&document)
    }

    /// Encodes a sequence of records; `data` is an array in input order.
    pub fn encode_all<T: Resource>(&self, records: &[T]) -> Result<Vec<u8>> {
        let document = self.to_document_all(records)?;
        self.write(&document)
    }

    /// Encodes a generic JSON map (or array of maps), classifying fields by
    /// duck typing.
    pub fn encode_value(&self, value: &Value) -> Result<Vec<u8>> {
        let document = self.value_to_document(value)?;
        self.write(&document)
    }

    #[instrument(skip_all, fields(record_type = std::any::type_name::<T>()))]
    pub fn to_document<T: Resource>(&self, record: &T) -> Result<Document> {
        let value = serde_json::to_value(record).map_err(JsonApiError::not_serializable)?;
        let (data, included) = flatten_one(&value, &Shape::Declared(T::schema()))?;
        Ok(self.assemble(data, included))
    }

    #[instrument(skip_all, fields(record_type = std::any::type_name::<T>(), count = records.len()))]
    pub fn to_document_all<T: Resource>(&self, records: &[T]) -> Result<Document> {
        let values = records
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(JsonApiError::not_serializable)?;
        let (data, included) = flatten_many(&values, &Shape::Declared(T::schema()))?;
        Ok(self.assemble(data, included))
    }

    #[instrument(skip_all)]
    pub fn value_to_document(&self, value: &Value) -> Result<Document> {
        let (data, included) = match value {
            Value::Array(records) => flatten_many(records, &Shape::Dynamic)?,
            Value::Object(_) => flatten_one(value, &Shape::Dynamic)?,
            other => return Err(JsonApiError::not_serializable(other)),
        };
        Ok(self.assemble(data, included))
    }

    fn assemble(&self, data: PrimaryData, included: Vec<ResourceObject>) -> Document {
        debug!(
            primary = data.resources().len(),
            included = included.len(),
            "Document assembled"
        );
        Document {
            data,
            included,
            links: self.links.clone(),
            meta: self.meta.clone(),
        }
    }

    fn write(&self, document: &Document) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(document)
        } else {
            serde_json::to_vec(document)
        };
        bytes.map_err(JsonApiError::not_serializable)
    }
}

// =============================================================================
// TRAVERSAL
// =============================================================================

fn flatten_one(record: &Value, shape: &Shape) -> Result<(PrimaryData, Vec<ResourceObject>)> {
    let mut resources = Flattener::default().run(std::slice::from_ref(record), shape)?;
    let included = resources.split_off(1);
    let primary = resources
        .pop()
        .ok_or_else(|| JsonApiError::not_serializable(record))?;
    Ok((PrimaryData::One(Box::new(primary)), included))
}

fn flatten_many(records: &[Value], shape: &Shape) -> Result<(PrimaryData, Vec<ResourceObject>)> {
    let mut resources = Flattener::default().run(records, shape)?;
    let included = resources.split_off(records.len());
    Ok((PrimaryData::Many(resources), included))
}

/// Per-call traversal state.
#[derive(Default)]
struct Flattener {
    pool: IncludedPool,
    visited: HashSet<ResourceIdentifier>,
}

/// A related record still to be walked, with the shape it is classified under.
type Pending<'v> = (&'v Value, Shape);

impl Flattener {
    /// Returns the root resources followed by the included ones.
    fn run(mut self, roots: &[Value], shape: &Shape) -> Result<Vec<ResourceObject>> {
        let identifiers = roots
            .iter()
            .map(identify)
            .collect::<Result<Vec<_>>>()?;

        for identifier in &identifiers {
            self.visited.insert(identifier.clone());
            self.pool.forbid(identifier.clone());
        }

        let mut primary = Vec::with_capacity(roots.len());
        for (record, identifier) in roots.iter().zip(identifiers) {
            trace!(%identifier, "Describing primary resource");
            let (resource, pending) = describe(identifier, record, shape)?;
            primary.push(resource);
            self.walk(pending)?;
        }

        primary.extend(self.pool.into_included());
        Ok(primary)
    }

    fn walk(&mut self, pending: Vec<Pending<'_>>) -> Result<()> {
        for (record, shape) in pending {
            let identifier = identify(record)?;
            if !self.visited.insert(identifier.clone()) {
                trace!(%identifier, "Already visited, reference only");
                continue;
            }
            trace!(%identifier, "Describing related resource");
            let (resource, nested) = describe(identifier, record, &shape)?;
            self.pool.insert(resource);
            self.walk(nested)?;
        }
        Ok(())
    }
}

fn identify(record: &Value) -> Result<ResourceIdentifier> {
    ResourceIdentifier::from_value(record).ok_or_else(|| JsonApiError::not_serializable(record))
}

/// Builds the resource object of one record and lists the related records it
/// points at.
fn describe<'v>(
    identifier: ResourceIdentifier,
    record: &'v Value,
    shape: &Shape,
) -> Result<(ResourceObject, Vec<Pending<'v>>)> {
    let fields = record
        .as_object()
        .ok_or_else(|| JsonApiError::not_serializable(record))?;

    let mut resource = ResourceObject::new(identifier);
    let mut pending = Vec::new();

    for (name, value) in fields {
        let class = shape.classify(name, value);

        // Presence check: a relationship without a value is a null to-one.
        if class.is_relationship() && value.is_null() {
            resource
                .relationships
                .insert(name.clone(), RelationshipRef::ToOne(None).into());
            continue;
        }

        match class {
            FieldClass::Identifier => {}
            FieldClass::Structural => match value {
                Value::Object(member) if name == keys::LINKS => resource.links = Some(member.clone()),
                Value::Object(member) => resource.meta = Some(member.clone()),
                Value::Null => {}
                other => warn!(field = %name, value = %other, "Skipping non-object structural member"),
            },
            FieldClass::Reserved => {
                warn!(field = %name, "Skipping field with reserved JSON:API member name");
            }
            FieldClass::Attribute => {
                resource.attributes.insert(name.clone(), value.clone());
            }
            FieldClass::ToOne => {
                let target = identify(value)?;
                resource
                    .relationships
                    .insert(name.clone(), RelationshipRef::ToOne(Some(target)).into());
                pending.push((value, shape.target(name)));
            }
            FieldClass::ToMany => {
                let items = value
                    .as_array()
                    .ok_or_else(|| JsonApiError::not_serializable(value))?;
                let targets = items.iter().map(identify).collect::<Result<Vec<_>>>()?;
                resource
                    .relationships
                    .insert(name.clone(), RelationshipRef::ToMany(targets).into());
                let target_shape = shape.target(name);
                pending.extend(items.iter().map(|item| (item, target_shape.clone())));
            }
        }
    }

    for name in shape.declared_relationships() {
        if !fields.contains_key(name) {
            resource
                .relationships
                .insert(name.to_string(), RelationshipRef::ToOne(None).into());
        }
    }

    Ok((resource, pending))
}
