//! Error types for the todo API client.
//!
//! # Design
//! 404 and 400 get dedicated variants because callers act on them: the todo
//! is gone, or the request itself was wrong. Both carry the server's message.
//! Every other unexpected status lands in `HttpError` with the raw body.

use thiserror::Error;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404, e.g. "todo with ID 7 not found".
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The server rejected the id or body with 400.
    #[error("bad request: {message}")]
    BadRequest { message: String },

    /// Any other status the operation does not expect.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
