//! HTTP client for the Pocket RPC gateway.
//!
//! The gateway exposes the chain's query API as a set of POST endpoints under
//! `/v1/query/*`. This module restricts calls to a fixed allow-list of those
//! endpoints ([`RpcMethod`]), composes their URLs against the configured
//! gateway, and classifies each JSON answer as a success or a gateway-reported
//! failure.
//!
//! # Example
//!
//! ```rust,no_run
//! use pocket_query::QueryConfig;
//! use pocket_query::rpc::{RpcClient, RpcMethod};
//!
//! # async fn example() -> Result<(), pocket_query::Error> {
//! let client = RpcClient::new()?;
//! let height = client.call(RpcMethod::Height, None, &QueryConfig::default()).await?;
//! println!("Chain height: {}", height["height"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! A body with a `message` field means the gateway already retried against
//! chain nodes and gave up; it becomes
//! [`Error::RelayAttemptsExhausted`](crate::Error::RelayAttemptsExhausted) and
//! is never retried here. Everything that goes wrong below the JSON layer is a
//! [`TransportError`].

mod client;
mod error;
mod method;

pub use client::RpcClient;
pub use error::TransportError;
pub use method::{RPC_METHODS, RpcMethod, compose_method_url, compose_url};
