#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # JSON:API Codable
//!
//! > **Bidirectional conversion between nested record graphs and JSON:API documents.**
//!
//! Plain Rust records embed their related records inline. A JSON:API document
//! instead keeps every record flat, addressed by a `(type, id)` pair, with
//! relationships expressed as identifier references and every related record
//! hoisted into one deduplicated `included` collection. This crate converts
//! between the two.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Declared, not guessed
//! Whether a field is an attribute or a relationship is declared once per record
//! type in a [`Schema`](schema::Schema). Generic JSON maps without a schema are
//! still supported and classified by duck typing (see [`classifier`]).
//!
//! ### Stateless calls
//! Every encode/decode call builds its own identifier pool and visited set and
//! drops them on return. Encoders and decoders hold options only, so they can be
//! shared freely between threads.
//!
//! ## 🚀 Core Concepts
//!
//! - [`Resource`](schema::Resource): implemented by each record type, returns its schema.
//! - [`JsonApiEncoder`](encoder::JsonApiEncoder): the **Graph Flattener**.
//! - [`JsonApiDecoder`](decoder::JsonApiDecoder): the **Graph Rebuilder**, with a
//!   [`LinkPolicy`](decoder::LinkPolicy) selecting root vs. resource-level links.
//! - [`JsonApiCoder`](coder::JsonApiCoder): both of the above behind one
//!   [`CoderConfig`](config::CoderConfig).
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! All failures are variants of [`JsonApiError`](error::JsonApiError) and are fatal
//! to the call. Unresolvable references are not errors; they decode as bare
//! identifiers.
//!
//! ### 2. Observability
//! We use `tracing` everywhere with structured fields. See [`telemetry`] for the
//! subscriber setup and what gets logged at which level.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Wire Model ([`document`])
//! Identifiers, resource objects, relationships and documents.
//!
//! ### 2. The Engine ([`schema`], [`classifier`], [`index`], [`encoder`], [`decoder`])
//! Field descriptors, field classification, the identifier pool/index, and the
//! two traversal pipelines.
//!
//! ### 3. The Interface ([`coder`], [`config`])
//! The facade most callers use.
//!
//! ### 4. The Samples ([`model`])
//! Record types used by the tests and as worked examples.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use jsonapi_codable::coder::JsonApiCoder;
//! use jsonapi_codable::model::{Car, Tire, Wheel};
//!
//! let tire = Tire::new("tire0", "GoodYear-Sport-Tire", "gy-sp00-19p-22p");
//! let car = Car::new("car0", "Audi S3", vec![
//!     Wheel::new("wheel0", tire.clone()),
//!     Wheel::new("wheel1", tire),
//! ]);
//!
//! let coder = JsonApiCoder::default();
//! let bytes = coder.encode(&car).unwrap();
//! let decoded: Car = coder.decode(&bytes).unwrap();
//! assert_eq!(decoded, car);
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! RUST_LOG=jsonapi_codable=debug cargo test
//! ```

pub mod classifier;
pub mod coder;
pub mod config;
pub mod decoder;
pub mod document;
pub mod encoder;
pub mod error;
pub mod index;
pub mod model;
pub mod schema;
pub mod telemetry;

// Re-export core types for convenience
pub use coder::JsonApiCoder;
pub use config::CoderConfig;
pub use decoder::{Decoded, JsonApiDecoder, LinkPolicy};
pub use document::{Document, RelationshipRef, ResourceIdentifier, ResourceObject};
pub use encoder::JsonApiEncoder;
pub use error::{JsonApiError, Result};
pub use schema::{FieldKind, Resource, Schema};
