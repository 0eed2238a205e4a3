//! Error types for article-extractor.
//!
//! This module defines the error types returned by extraction operations.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fetching the page failed (network, HTTP status, body read).
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The raw HTML body was empty.
    #[error("Empty HTML body")]
    EmptyBody,

    /// HTML parsing failed.
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// Character encoding conversion failed.
    #[error("Charset decoding failed: {0}")]
    DecodeError(String),

    /// No extractable content was found in the document.
    #[error("No extractable content found")]
    NoContent,
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
