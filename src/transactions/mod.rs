//! Decoding of raw chain transactions.
//!
//! The gateway returns transactions in the chain's amino JSON encoding: a
//! message type tag (`stdTx.msg.type`) next to a loosely typed, snake_case
//! payload. Decoding happens in two stages:
//!
//! 1. [`classify`] maps the tag onto the closed [`TransactionKind`] set, with
//!    [`TransactionKind::Unknown`] as the fallback for tags added by newer
//!    chain versions.
//! 2. [`extract`] projects the payload onto a typed [`TransactionMessage`],
//!    failing with [`Error::MalformedTransaction`](crate::Error::MalformedTransaction)
//!    when a required field is missing.
//!
//! [`decode_transaction`] runs both stages and assembles a
//! [`TransactionRecord`].

mod kind;
mod message;
mod record;

pub use kind::{TransactionKind, classify};
pub use message::{
    AddressMessage, AppStakeMessage, ClaimMessage, NodeStakeMessage, ProofMessage, SendMessage, TransactionMessage,
    extract,
};
pub use record::{AccountKind, TransactionRecord, decode_transaction, infer_account_kind, into_feed_order};
