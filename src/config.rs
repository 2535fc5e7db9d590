//! Codec configuration.
//!
//! [`CoderConfig`] derives `Deserialize` so a host application can embed it in
//! its own configuration file:
//!
//! ```rust
//! use jsonapi_codable::config::CoderConfig;
//! use jsonapi_codable::decoder::LinkPolicy;
//!
//! let config: CoderConfig =
//!     serde_json::from_str(r#"{ "pretty": true, "link_policy": "object_level_links_override" }"#).unwrap();
//! assert!(config.pretty);
//! assert_eq!(config.link_policy, LinkPolicy::ObjectLevelLinksOverride);
//! ```

use crate::decoder::LinkPolicy;
use serde::{Deserialize, Serialize};

/// Options shared by the encoder and decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoderConfig {
    /// Pretty-print encoded documents.
    pub pretty: bool,
    /// Where reconstructed records take their `links` from.
    pub link_policy: LinkPolicy,
}

impl CoderConfig {
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn link_policy(mut self, link_policy: LinkPolicy) -> Self {
        self.link_policy = link_policy;
        self
    }
}
