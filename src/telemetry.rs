//! # Observability & Tracing
//!
//! The codec logs through the `tracing` crate and never installs a subscriber on
//! its own. Applications (and tests that want to see output) call
//! [`setup_tracing`] once.
//!
//! ## What Gets Traced
//!
//! - **Calls**: one span per public encode/decode entry point, with the target
//!   Rust type and the link policy as fields.
//! - **Traversal** (`trace`): every resource described or flattened.
//! - **Degradations** (`debug`/`warn`): unresolved references, skipped
//!   `included` entries, skipped reserved fields, duplicate identifiers.
//!
//! ## Usage
//!
//! ```bash
//! # Summaries only
//! RUST_LOG=jsonapi_codable=debug cargo test -- --nocapture
//!
//! # Every resource visited
//! RUST_LOG=jsonapi_codable=trace cargo test -- --nocapture
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Returns without error when a global subscriber is already set, so it is
/// safe to call from several tests.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
