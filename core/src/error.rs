//! Error types for the post form.
//!
//! # Design
//! The user only ever sees "the request failed", but the cause is kept so
//! callers and logs can tell a rejected status from a dropped connection or
//! a body that did not decode. Every variant maps to the single failed
//! state of the request lifecycle.

use thiserror::Error;

/// Why a create-post request did not produce a `Post`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The host could not complete the round-trip (DNS, connect, reset...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into a `Post`.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The form payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Errors from the by-name form entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown form field: {0:?}")]
    UnknownField(String),
}
