// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by the codecs, the encodeable registry and the node states.

/// Errors returned by fdi-ua operations.
///
/// Decode failures always propagate: the generated encode/decode glue never
/// recovers locally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ========================================================================
    // Codec Errors
    // ========================================================================
    /// A value could not be written.
    #[error("encoding failed: {0}")]
    Encoding(String),
    /// A field could not be read (malformed payload, wrong field, wrong namespace).
    #[error("decoding failed at '{field}': {reason}")]
    Decoding { field: String, reason: String },
    /// The input ended before the value was complete.
    #[error("unexpected end of input at offset {offset}")]
    EndOfInput { offset: usize },
    /// A length or depth limit from `EncodingLimits` was exceeded.
    #[error("{what} {actual} exceeds limit {limit}")]
    LimitExceeded {
        what: &'static str,
        actual: usize,
        limit: usize,
    },
    /// No encodeable type is registered for an extension object's encoding id.
    #[error("no encodeable type registered for encoding id {0}")]
    UnknownEncoding(String),

    // ========================================================================
    // Identifier Errors
    // ========================================================================
    /// NodeId, Guid or QualifiedName text could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
    /// A namespace URI is not present in the namespace table.
    #[error("namespace not in table: {0}")]
    UnknownNamespace(String),

    // ========================================================================
    // Node Errors
    // ========================================================================
    /// Operation not valid in the node's current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Method input arguments do not match the declared arguments.
    #[error("bad arguments: {0}")]
    BadArguments(String),
    /// A method was called without a registered handler.
    #[error("method '{0}' has no handler")]
    MethodNotImplemented(String),

    // ========================================================================
    // Other Errors
    // ========================================================================
    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(String),
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for [`Error::Decoding`].
    pub fn decoding(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Decoding {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for every variant raised while reading a payload.
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            Error::Decoding { .. }
                | Error::EndOfInput { .. }
                | Error::LimitExceeded { .. }
                | Error::UnknownEncoding(_)
        )
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
