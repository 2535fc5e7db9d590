//! # Graph Rebuilder
//!
//! Reverses the [encoder](crate::encoder): reads a JSON:API document and rebuilds
//! the nested object graph, then hands it to `serde` to produce the caller's type.
//!
//! ## Algorithm
//!
//! 1. Parse the bytes and split the document into `data` (single, array or
//!    `null`), `included` (empty when absent) and the root `links`/`meta`.
//! 2. For each primary resource start from its identifier, merge its
//!    `attributes`, then replace every relationship linkage with the flattened
//!    body of the referenced included resource (recursively, order preserved
//!    for to-many).
//! 3. Attach `links` according to the [`LinkPolicy`] and `meta` verbatim.
//! 4. Deserialize the assembled value into `T`.
//!
//! ## Leniency
//!
//! Linkage is resolved against `included` first, then against the primary
//! `data` entries. A linkage that resolves against neither (sparse includes),
//! that points back at a resource currently being rebuilt (a cycle), or that
//! sits deeper than [`MAX_RESOLVE_DEPTH`] degrades to the bare `{"id", "type"}`
//! identifier instead of failing. Missing `data`, identifier-less primary
//! entries and shape mismatches are hard errors.

use crate::document::{keys, JsonMap, RelationshipRef, ResourceIdentifier, ResourceObject};
use crate::error::{JsonApiError, Result};
use crate::index::IdentifierIndex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

/// Nesting depth past which references are left as bare identifiers. Matches
/// the recursion limit `serde_json` applies when parsing.
pub const MAX_RESOLVE_DEPTH: usize = 128;

/// Selects which `links` container a reconstructed record exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkPolicy {
    /// Primary records carry the document's root `links` (when present).
    #[default]
    RootLinksOverride,
    /// Every record carries its own resource-level `links`; root links are
    /// ignored.
    ObjectLevelLinksOverride,
}

/// A decoded document: the record(s) plus the document-level members.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub data: T,
    pub links: Option<JsonMap>,
    pub meta: Option<JsonMap>,
}

/// Decodes JSON:API documents into plain record graphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonApiDecoder {
    link_policy: LinkPolicy,
}

impl JsonApiDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link_policy(mut self, link_policy: LinkPolicy) -> Self {
        self.link_policy = link_policy;
        self
    }

    /// Decodes document bytes into `T` (a record type, `Vec` of records, or
    /// `Option` of a record for `data: null`).
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        Ok(self.decode_document(bytes)?.data)
    }

    /// Decodes an already parsed document.
    pub fn decode_value<T: DeserializeOwned>(&self, document: &Value) -> Result<T> {
        Ok(self.decode_document_value(document)?.data)
    }

    /// Like [`decode`](Self::decode) but also returns the document-level
    /// `links` and `meta`.
    pub fn decode_document<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Decoded<T>> {
        let document: Value = serde_json::from_slice(bytes)
            .map_err(|e| JsonApiError::not_json(e.to_string()))?;
        self.decode_document_value(&document)
    }

    #[instrument(skip_all, fields(target = std::any::type_name::<T>(), policy = ?self.link_policy))]
    pub fn decode_document_value<T: DeserializeOwned>(&self, document: &Value) -> Result<Decoded<T>> {
        let rebuilt = self.rebuild(document)?;
        let data = serde_json::from_value(rebuilt.data).map_err(JsonApiError::shape_mismatch::<T>)?;
        Ok(Decoded {
            data,
            links: rebuilt.links,
            meta: rebuilt.meta,
        })
    }

    /// Rebuilds the plain object graph without binding it to a Rust type.
    pub fn rebuild(&self, document: &Value) -> Result<Decoded<Value>> {
        let root = document
            .as_object()
            .ok_or_else(|| JsonApiError::not_json("document root is not an object"))?;
        let data = root
            .get(keys::DATA)
            .ok_or_else(|| JsonApiError::not_json("missing top-level `data` member"))?;

        let included = parse_included(root.get(keys::INCLUDED));
        let links = root.get(keys::LINKS).and_then(Value::as_object).cloned();
        let meta = root.get(keys::META).and_then(Value::as_object).cloned();

        let (primary, many) = match data {
            Value::Null => return Ok(Decoded { data: Value::Null, links, meta }),
            Value::Array(entries) => (
                entries.iter().map(parse_primary).collect::<Result<Vec<_>>>()?,
                true,
            ),
            entry => (vec![parse_primary(entry)?], false),
        };

        let mut rebuilt = {
            let mut rebuilder = Rebuilder {
                index: IdentifierIndex::build(&included).with_primary(&primary),
                policy: self.link_policy,
                root_links: links.as_ref(),
                stack: Vec::new(),
            };
            primary
                .iter()
                .map(|resource| rebuilder.primary(resource))
                .collect::<Vec<_>>()
        };
        let data = if many {
            Value::Array(rebuilt)
        } else {
            rebuilt.pop().unwrap_or(Value::Null)
        };

        debug!(primary = primary.len(), included = included.len(), "Document rebuilt");
        Ok(Decoded { data, links, meta })
    }
}

fn parse_primary(entry: &Value) -> Result<ResourceObject> {
    ResourceObject::from_value(entry).ok_or_else(|| JsonApiError::bad_root(entry))
}

fn parse_included(member: Option<&Value>) -> Vec<ResourceObject> {
    match member {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| {
                let resource = ResourceObject::from_value(entry);
                if resource.is_none() {
                    warn!(%entry, "Skipping included entry without identifier");
                }
                resource
            })
            .collect(),
        Some(other) => {
            warn!(member = %other, "Ignoring non-array `included` member");
            Vec::new()
        }
    }
}

// =============================================================================
// RECONSTRUCTION
// =============================================================================

/// Per-call reconstruction state.
struct Rebuilder<'a> {
    index: IdentifierIndex<'a>,
    policy: LinkPolicy,
    root_links: Option<&'a JsonMap>,
    /// Identifiers currently being rebuilt, outermost first.
    stack: Vec<ResourceIdentifier>,
}

impl<'a> Rebuilder<'a> {
    fn primary(&mut self, resource: &ResourceObject) -> Value {
        let mut body = self.flatten(resource);

        if let (LinkPolicy::RootLinksOverride, Some(links)) = (self.policy, self.root_links) {
            body.insert(keys::LINKS.to_string(), Value::Object(links.clone()));
        }
        Value::Object(body)
    }

    fn flatten(&mut self, resource: &ResourceObject) -> JsonMap {
        trace!(identifier = %resource.identifier, "Flattening resource");
        self.stack.push(resource.identifier.clone());

        let mut body = resource.identifier.to_map();
        for (name, value) in &resource.attributes {
            body.entry(name.clone()).or_insert_with(|| value.clone());
        }

        for (name, relationship) in &resource.relationships {
            let value = match &relationship.data {
                RelationshipRef::ToOne(None) => Value::Null,
                RelationshipRef::ToOne(Some(identifier)) => self.resolve(identifier),
                RelationshipRef::ToMany(identifiers) => Value::Array(
                    identifiers
                        .iter()
                        .map(|identifier| self.resolve(identifier))
                        .collect(),
                ),
            };
            body.entry(name.clone()).or_insert(value);
        }

        if let (LinkPolicy::ObjectLevelLinksOverride, Some(links)) = (self.policy, &resource.links) {
            body.insert(keys::LINKS.to_string(), Value::Object(links.clone()));
        }
        if let Some(meta) = &resource.meta {
            body.insert(keys::META.to_string(), Value::Object(meta.clone()));
        }

        self.stack.pop();
        body
    }

    fn resolve(&mut self, identifier: &ResourceIdentifier) -> Value {
        if self.stack.contains(identifier) {
            debug!(%identifier, "Reference back into the current path, keeping identifier");
            return Value::Object(identifier.to_map());
        }
        if self.stack.len() >= MAX_RESOLVE_DEPTH {
            warn!(%identifier, depth = self.stack.len(), "Nesting limit reached, keeping identifier");
            return Value::Object(identifier.to_map());
        }
        match self.index.get(identifier) {
            Some(resource) => Value::Object(self.flatten(resource)),
            None => {
                debug!(%identifier, "Reference not included, keeping identifier");
                Value::Object(identifier.to_map())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rebuild(document: Value, policy: LinkPolicy) -> Value {
        JsonApiDecoder::new()
            .link_policy(policy)
            .rebuild(&document)
            .unwrap()
            .data
    }

    #[test]
    fn test_resolves_relationships_recursively() {
        let document = json!({
            "data": {
                "id": "a0", "type": "articles",
                "attributes": { "title": "JSON:API" },
                "relationships": {
                    "author": { "data": { "id": "p0", "type": "people" } },
                    "comments": { "data": [
                        { "id": "c1", "type": "comments" },
                        { "id": "c0", "type": "comments" }
                    ] }
                }
            },
            "included": [
                { "id": "c0", "type": "comments", "attributes": { "body": "first" },
                  "relationships": { "author": { "data": { "id": "p0", "type": "people" } } } },
                { "id": "c1", "type": "comments", "attributes": { "body": "second" } },
                { "id": "p0", "type": "people", "attributes": { "name": "Dan" } }
            ]
        });

        assert_eq!(
            rebuild(document, LinkPolicy::RootLinksOverride),
            json!({
                "id": "a0", "type": "articles", "title": "JSON:API",
                "author": { "id": "p0", "type": "people", "name": "Dan" },
                "comments": [
                    { "id": "c1", "type": "comments", "body": "second" },
                    { "id": "c0", "type": "comments", "body": "first",
                      "author": { "id": "p0", "type": "people", "name": "Dan" } }
                ]
            })
        );
    }

    #[test]
    fn test_unresolved_reference_degrades_to_identifier() {
        let document = json!({
            "data": [{
                "id": "u0", "type": "users",
                "relationships": {
                    "location": { "data": { "id": "l9", "type": "locations" } },
                    "manager": { "data": null }
                }
            }]
        });

        assert_eq!(
            rebuild(document, LinkPolicy::RootLinksOverride),
            json!([{
                "id": "u0", "type": "users",
                "location": { "id": "l9", "type": "locations" },
                "manager": null
            }])
        );
    }

    #[test]
    fn test_cyclic_included_terminates() {
        let document = json!({
            "data": { "id": "root", "type": "nodes",
                      "relationships": { "next": { "data": { "id": "b", "type": "nodes" } } } },
            "included": [
                { "id": "b", "type": "nodes",
                  "relationships": { "next": { "data": { "id": "c", "type": "nodes" } } } },
                { "id": "c", "type": "nodes",
                  "relationships": { "next": { "data": { "id": "b", "type": "nodes" } } } }
            ]
        });

        assert_eq!(
            rebuild(document, LinkPolicy::RootLinksOverride),
            json!({
                "id": "root", "type": "nodes",
                "next": { "id": "b", "type": "nodes",
                          "next": { "id": "c", "type": "nodes",
                                    "next": { "id": "b", "type": "nodes" } } }
            })
        );
    }

    #[test]
    fn test_reference_to_another_primary_resolves() {
        let document = json!({
            "data": [
                { "id": "boss", "type": "employees",
                  "relationships": { "reports": { "data": [{ "id": "e1", "type": "employees" }] } } },
                { "id": "e1", "type": "employees", "attributes": { "name": "Ann" } }
            ]
        });

        assert_eq!(
            rebuild(document, LinkPolicy::RootLinksOverride),
            json!([
                { "id": "boss", "type": "employees",
                  "reports": [{ "id": "e1", "type": "employees", "name": "Ann" }] },
                { "id": "e1", "type": "employees", "name": "Ann" }
            ])
        );
    }

    #[test]
    fn test_long_included_chain_is_cut_at_depth_limit() {
        let node = |i: usize| {
            json!({ "id": format!("n{i}"), "type": "nodes",
                    "relationships": { "next": { "data": { "id": format!("n{}", i + 1), "type": "nodes" } } } })
        };
        let document = json!({
            "data": node(0),
            "included": (1..20_000).map(node).collect::<Vec<_>>()
        });

        let rebuilt = rebuild(document, LinkPolicy::RootLinksOverride);
        let mut current = &rebuilt;
        let mut depth = 0;
        while let Some(next) = current.get("next") {
            current = next;
            depth += 1;
        }
        assert_eq!(depth, MAX_RESOLVE_DEPTH);
        assert_eq!(
            current,
            &json!({ "id": format!("n{MAX_RESOLVE_DEPTH}"), "type": "nodes" })
        );
    }

    #[test]
    fn test_link_policy_selection() {
        let document = json!({
            "links": { "self": "https://example.com/root" },
            "data": {
                "id": "p0", "type": "people",
                "links": { "self": "https://example.com/people/p0" },
                "meta": { "rank": 1 },
                "relationships": { "friend": { "data": { "id": "p1", "type": "people" } } }
            },
            "included": [
                { "id": "p1", "type": "people", "links": { "self": "https://example.com/people/p1" } }
            ]
        });

        let root = rebuild(document.clone(), LinkPolicy::RootLinksOverride);
        assert_eq!(root["links"], json!({ "self": "https://example.com/root" }));
        assert_eq!(root["meta"], json!({ "rank": 1 }));
        assert!(root["friend"].get("links").is_none());

        let object = rebuild(document, LinkPolicy::ObjectLevelLinksOverride);
        assert_eq!(object["links"], json!({ "self": "https://example.com/people/p0" }));
        assert_eq!(
            object["friend"]["links"],
            json!({ "self": "https://example.com/people/p1" })
        );
    }

    #[test]
    fn test_object_level_policy_without_own_links() {
        let document = json!({
            "links": { "self": "https://example.com/root" },
            "data": { "id": "p0", "type": "people" }
        });

        let object = rebuild(document, LinkPolicy::ObjectLevelLinksOverride);
        assert_eq!(object, json!({ "id": "p0", "type": "people" }));
    }

    #[test]
    fn test_error_taxonomy() {
        let decoder = JsonApiDecoder::new();

        let err = decoder.decode::<Value>(b"not json").unwrap_err();
        assert!(matches!(err, JsonApiError::NotJson { .. }));

        let err = decoder.decode::<Value>(br#"{ "meta": {} }"#).unwrap_err();
        assert!(matches!(err, JsonApiError::NotJson { .. }));

        let err = decoder
            .decode::<Value>(br#"{ "data": [{ "id": "1", "type": "a" }, { "type": "a" }] }"#)
            .unwrap_err();
        assert!(matches!(err, JsonApiError::BadRoot { .. }));

        let err = decoder
            .decode::<Vec<Value>>(br#"{ "data": { "id": "1", "type": "a" } }"#)
            .unwrap_err();
        assert!(matches!(err, JsonApiError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_null_data_and_document_members() {
        let decoded = JsonApiDecoder::new()
            .decode_document::<Option<Value>>(
                br#"{ "data": null, "meta": { "total": 0 }, "links": { "self": "/x" } }"#,
            )
            .unwrap();

        assert_eq!(decoded.data, None);
        assert_eq!(decoded.meta.unwrap()["total"], json!(0));
        assert_eq!(decoded.links.unwrap()["self"], json!("/x"));
    }

    #[test]
    fn test_malformed_included_entries_are_skipped() {
        let document = json!({
            "data": { "id": "1", "type": "a",
                      "relationships": { "b": { "data": { "id": "2", "type": "b" } } } },
            "included": [
                { "attributes": { "orphan": true } },
                { "id": "2", "type": "b", "attributes": { "ok": true } }
            ]
        });

        assert_eq!(
            rebuild(document, LinkPolicy::RootLinksOverride)["b"],
            json!({ "id": "2", "type": "b", "ok": true })
        );
    }
}
