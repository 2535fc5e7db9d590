//! # Identifier Index
//!
//! Both pipelines key resources by [`ResourceIdentifier`]:
//!
//! - [`IncludedPool`] accumulates related resources during one encode call.
//!   First body wins; identifiers of primary resources are *forbidden* and
//!   filtered out when the pool is drained.
//! - [`IdentifierIndex`] is the read-only lookup used by the decoder: the
//!   document's `included` member, backed by its primary `data` entries.
//!
//! Neither survives the call that built it.

use crate::document::{ResourceIdentifier, ResourceObject};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Deduplicated pool of related resources, in first-discovery order.
#[derive(Debug, Default)]
pub struct IncludedPool {
    resources: IndexMap<ResourceIdentifier, ResourceObject>,
    forbidden: HashSet<ResourceIdentifier>,
}

impl IncludedPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a primary resource: it may be visited, but is never emitted under
    /// `included`.
    pub fn forbid(&mut self, identifier: ResourceIdentifier) {
        self.forbidden.insert(identifier);
    }

    /// Adds `resource` unless its identifier is already pooled. Returns whether
    /// it was inserted; a later duplicate is discarded, not merged.
    pub fn insert(&mut self, resource: ResourceObject) -> bool {
        if self.resources.contains_key(&resource.identifier) {
            debug!(identifier = %resource.identifier, "Already pooled, keeping first body");
            return false;
        }
        self.resources.insert(resource.identifier.clone(), resource);
        true
    }

    /// Drains the pool into the `included` member, dropping primary resources.
    pub fn into_included(self) -> Vec<ResourceObject> {
        let forbidden = self.forbidden;
        self.resources
            .into_values()
            .filter(|resource| !forbidden.contains(&resource.identifier))
            .collect()
    }
}

/// Lookup of included resources by identifier.
#[derive(Debug, Default)]
pub struct IdentifierIndex<'a> {
    resources: HashMap<&'a ResourceIdentifier, &'a ResourceObject>,
}

impl<'a> IdentifierIndex<'a> {
    /// Indexes `included`. When an identifier appears twice the first entry is
    /// kept.
    pub fn build(included: &'a [ResourceObject]) -> Self {
        let mut resources = HashMap::with_capacity(included.len());
        for resource in included {
            if resources.contains_key(&resource.identifier) {
                warn!(identifier = %resource.identifier, "Duplicate included resource, keeping first");
                continue;
            }
            resources.insert(&resource.identifier, resource);
        }
        Self { resources }
    }

    /// Adds the primary resources as a fallback for identifiers that
    /// `included` does not carry. Included entries take precedence.
    pub fn with_primary(mut self, primary: &'a [ResourceObject]) -> Self {
        for resource in primary {
            self.resources.entry(&resource.identifier).or_insert(resource);
        }
        self
    }

    pub fn get(&self, identifier: &ResourceIdentifier) -> Option<&'a ResourceObject> {
        self.resources.get(identifier).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(id: &str, kind: &str, name: &str) -> ResourceObject {
        let mut resource = ResourceObject::new(ResourceIdentifier::new(id, kind));
        resource.attributes.insert("name".into(), json!(name));
        resource
    }

    #[test]
    fn test_pool_first_body_wins() {
        let mut pool = IncludedPool::new();
        assert!(pool.insert(resource("t0", "tires", "first")));
        assert!(!pool.insert(resource("t0", "tires", "second")));
        assert!(pool.insert(resource("t0", "wheels", "other type")));

        let included = pool.into_included();
        assert_eq!(included.len(), 2);
        assert_eq!(included[0].attributes["name"], json!("first"));
    }

    #[test]
    fn test_pool_drops_forbidden_and_keeps_discovery_order() {
        let mut pool = IncludedPool::new();
        pool.forbid(ResourceIdentifier::new("a", "nodes"));
        pool.insert(resource("c", "nodes", "c"));
        pool.insert(resource("a", "nodes", "a"));
        pool.insert(resource("b", "nodes", "b"));

        let ids: Vec<_> = pool
            .into_included()
            .into_iter()
            .map(|resource| resource.identifier.id)
            .collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn test_index_lookup_first_wins() {
        let included = vec![
            resource("1", "people", "first"),
            resource("1", "people", "second"),
            resource("2", "people", "other"),
        ];
        let index = IdentifierIndex::build(&included);

        let found = index.get(&ResourceIdentifier::new("1", "people")).unwrap();
        assert_eq!(found.attributes["name"], json!("first"));
        assert!(index.get(&ResourceIdentifier::new("1", "comments")).is_none());
    }

    #[test]
    fn test_index_falls_back_to_primary() {
        let included = vec![resource("1", "people", "included")];
        let primary = vec![
            resource("1", "people", "primary"),
            resource("2", "people", "primary only"),
        ];
        let index = IdentifierIndex::build(&included).with_primary(&primary);

        let shared = index.get(&ResourceIdentifier::new("1", "people")).unwrap();
        assert_eq!(shared.attributes["name"], json!("included"));
        let root = index.get(&ResourceIdentifier::new("2", "people")).unwrap();
        assert_eq!(root.attributes["name"], json!("primary only"));
    }
}
