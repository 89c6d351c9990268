//! Error types for the item service client

use thiserror::Error;

/// Errors that can occur when talking to the item service.
///
/// Every error is terminal for its request: the client never retries, and a
/// failed request does not affect other in-flight or subsequent requests.
#[derive(Error, Debug)]
pub enum Error {
    /// The endpoint string failed to parse as a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network or connection error (DNS, refused, reset, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// No response within the configured timeout
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// The response started but a complete body could not be obtained
    #[error("No usable response: {0}")]
    NoResponse(String),

    /// The server answered with a status other than 200
    #[error("Unexpected status code {0}")]
    UnexpectedStatus(u16),

    /// Response body missing or not decodable as the expected JSON shape
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// The request payload could not be serialized to JSON
    #[error("Failed to encode item: {0}")]
    Encode(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
