//! Crate-wide error type.
//!
//! Every public operation either returns a fully populated value or fails with
//! one of the [`Error`] variants below. Nothing is retried or swallowed.

use thiserror::Error;

use crate::rpc::TransportError;
use crate::transactions::TransactionKind;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The caller supplied a string that is not a 40 character hex address.
    /// Detected locally; no request is made.
    #[error("Address is not a valid POKT address: {0:?}")]
    InvalidAddress(String),

    /// The public key given for address derivation is not hex encoded.
    #[error("Public key is not a valid hex string: {0:?}")]
    InvalidPublicKey(String),

    /// The quantity passed to unit conversion is fractional, negative or does
    /// not parse as an integer.
    #[error("Quantity {0} cannot be converted to uPOKT: only whole, non-negative amounts are supported")]
    InvalidQuantity(String),

    /// An RPC method outside of the allow-list was requested.
    #[error("Method does not exist: {0}")]
    UnknownMethod(String),

    /// The gateway could not get an answer from the chain within its own
    /// relay budget. Carries the gateway's message verbatim.
    #[error("Relay attempts exhausted: {0}")]
    RelayAttemptsExhausted(String),

    /// A transaction does not contain a field its classified kind requires.
    #[error("Malformed {kind} transaction: missing or invalid field `{field}`")]
    MalformedTransaction { kind: TransactionKind, field: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    pub(crate) fn malformed(kind: TransactionKind, field: impl Into<String>) -> Self {
        Error::MalformedTransaction {
            kind,
            field: field.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Transport(TransportError::from(err))
    }
}
