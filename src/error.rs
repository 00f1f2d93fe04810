// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for ahttp
//!
//! Errors fall into four groups: invalid arguments (caller preconditions),
//! I/O failures (transport, file reads, size guard, client lifecycle),
//! charset problems and cookie attribute parse failures.

use std::num::ParseIntError;

use thiserror::Error;

/// Result type alias for ahttp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ahttp
#[derive(Error, Debug)]
pub enum Error {
    /// A precondition on an argument was violated
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error (multipart file parts)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `close()` called on a client holding no transport
    #[error("Client was not initialized")]
    ClientNotInitialized,

    /// Request executed through a client that has been closed
    #[error("Client is closed")]
    ClientClosed,

    /// Response entity exceeds the caller's cap
    #[error("entity length ({length}) is greater than maximum allowed length ({max_length})")]
    BodyTooLarge { length: u64, max_length: u64 },

    /// Charset label not known to the encoder
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// Cookie `Max-Age` attribute is not a base-10 integer
    #[error("Invalid cookie max-age '{value}': {source}")]
    CookieMaxAge {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Create a body-too-large error
    pub fn body_too_large(length: u64, max_length: u64) -> Self {
        Error::BodyTooLarge { length, max_length }
    }

    /// Check if this is a caller precondition failure
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// Check if this belongs to the I/O error kind
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Error::Io(_)
                | Error::Http(_)
                | Error::ClientNotInitialized
                | Error::ClientClosed
                | Error::BodyTooLarge { .. }
        )
    }

    /// Check if this is a numeric parse failure
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::CookieMaxAge { .. })
    }

    /// Check if this is a charset failure
    pub fn is_encoding(&self) -> bool {
        matches!(self, Error::UnsupportedCharset(_))
    }

    /// Get HTTP status code if the transport reported one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
