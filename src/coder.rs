//! # JsonApiCoder
//!
//! One-stop facade pairing a [`JsonApiEncoder`] and a [`JsonApiDecoder`] built
//! from the same [`CoderConfig`].
//!
//! ```rust
//! use jsonapi_codable::coder::JsonApiCoder;
//! use jsonapi_codable::model::{Location, Region, User};
//!
//! let coder = JsonApiCoder::default();
//! let user = User::new("u0", "x", Some(Location::new("l0", Region::new("r0", "Paris"))));
//!
//! let bytes = coder.encode(&user).unwrap();
//! let decoded: User = coder.decode(&bytes).unwrap();
//! assert_eq!(decoded, user);
//! ```

use crate::config::CoderConfig;
use crate::decoder::{Decoded, JsonApiDecoder, LinkPolicy};
use crate::encoder::JsonApiEncoder;
use crate::error::Result;
use crate::schema::Resource;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;

/// Encoder and decoder sharing one configuration.
#[derive(Debug, Clone, Default)]
pub struct JsonApiCoder {
    encoder: JsonApiEncoder,
    decoder: JsonApiDecoder,
}

impl JsonApiCoder {
    pub fn new(config: CoderConfig) -> Self {
        Self {
            encoder: JsonApiEncoder::new().pretty(config.pretty),
            decoder: JsonApiDecoder::new().link_policy(config.link_policy),
        }
    }

    #[instrument(skip_all)]
    pub fn encode<T: Resource>(&self, record: &T) -> Result<Vec<u8>> {
        self.encoder.encode(record)
    }

    #[instrument(skip_all)]
    pub fn encode_all<T: Resource>(&self, records: &[T]) -> Result<Vec<u8>> {
        self.encoder.encode_all(records)
    }

    #[instrument(skip_all)]
    pub fn encode_value(&self, value: &Value) -> Result<Vec<u8>> {
        self.encoder.encode_value(value)
    }

    /// Decodes with the configured [`LinkPolicy`].
    #[instrument(skip_all)]
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        self.decoder.decode(bytes)
    }

    /// Decodes with an explicit [`LinkPolicy`], overriding the configured one.
    #[instrument(skip(self, bytes))]
    pub fn decode_with<T: DeserializeOwned>(&self, bytes: &[u8], link_policy: LinkPolicy) -> Result<T> {
        self.decoder.link_policy(link_policy).decode(bytes)
    }

    pub fn decode_document<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Decoded<T>> {
        self.decoder.decode_document(bytes)
    }
}
