//! Error types for the transport layer below the gateway's JSON contract.
//!
//! This module defines the [`TransportError`] enum which covers every way a
//! request can fail before the gateway's response can be interpreted: the
//! connection itself, an unreadable body, or a malformed URL.

use thiserror::Error;

/// Errors raised while talking to the RPC gateway over HTTP.
///
/// A gateway-reported failure (a JSON body carrying a `message` field) is NOT
/// a transport error; it surfaces as
/// [`Error::RelayAttemptsExhausted`](crate::Error::RelayAttemptsExhausted).
///
/// # Example
///
/// ```rust,no_run
/// use pocket_query::rpc::TransportError;
///
/// fn handle_error(err: TransportError) {
///     match err {
///         TransportError::ServerError { status, body } => {
///             eprintln!("Gateway returned {}: {}", status, body);
///         }
///         TransportError::RequestFailed(e) => {
///             eprintln!("Network error: {}", e);
///         }
///         _ => eprintln!("Other error: {}", err),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request failed due to a network or connection error.
    ///
    /// This typically indicates connectivity issues such as:
    /// - Connection refused
    /// - DNS resolution failure
    /// - TLS handshake errors
    /// - An explicitly configured timeout elapsing
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The gateway answered with a non-success status and a body that does
    /// not follow the gateway failure shape.
    #[error("Server error {status}: {body}")]
    ServerError {
        /// The HTTP status code returned by the gateway.
        status: reqwest::StatusCode,
        /// The raw response body.
        body: String,
    },

    /// The configured gateway URL, or the URL composed from it, is invalid.
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    /// The request body could not be serialized, or the response body is not
    /// JSON, or it does not have the shape the called method promises.
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
