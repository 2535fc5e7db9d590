//! # Codec Errors
//!
//! Every failure the encoder or decoder can report lives in [`JsonApiError`].
//! All of them are fatal to the call that produced them: no partial document and
//! no partially decoded record is ever handed back.
//!
//! Unresolvable relationship references are deliberately **not** in this list.
//! The decoder degrades them to bare identifiers instead (see
//! [`decoder`](crate::decoder)).

/// Errors that can occur while encoding to or decoding from a JSON:API document.
#[derive(Debug, thiserror::Error)]
pub enum JsonApiError {
    /// The input bytes are not JSON, or the JSON has no top-level `data` member.
    #[error("Not a JSON:API document: {reason}")]
    NotJson { reason: String },

    /// A primary `data` entry lacks a valid (id, type) pair.
    #[error("Primary resource has no valid identifier: {entry}")]
    BadRoot { entry: String },

    /// A visited record (root or related) cannot yield an (id, type) pair.
    #[error("Record is not serializable as a JSON:API resource: {value}")]
    NotSerializable { value: String },

    /// The rebuilt structure does not fit the requested output type.
    #[error("Cannot decode into {target}: {source}")]
    ShapeMismatch {
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, JsonApiError>;

impl JsonApiError {
    pub(crate) fn not_json(reason: impl Into<String>) -> Self {
        JsonApiError::NotJson {
            reason: reason.into(),
        }
    }

    pub(crate) fn bad_root(entry: &serde_json::Value) -> Self {
        JsonApiError::BadRoot {
            entry: entry.to_string(),
        }
    }

    pub(crate) fn not_serializable(value: impl ToString) -> Self {
        JsonApiError::NotSerializable {
            value: value.to_string(),
        }
    }

    pub(crate) fn shape_mismatch<T>(source: serde_json::Error) -> Self {
        JsonApiError::ShapeMismatch {
            target: std::any::type_name::<T>(),
            source,
        }
    }
}
