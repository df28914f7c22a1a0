//! Client-side access layer for the Pocket Network.
//!
//! Validates and derives account addresses, converts POKT quantities to
//! uPOKT, and reads chain state (heights, balances, applications, nodes,
//! transaction history) through a public RPC gateway.
//!
//! ```rust,no_run
//! use pocket_query::{AccountQueryParams, QueryConfig, QueryService, derive_address, format_pokt, to_micro_units};
//!
//! # async fn example() -> Result<(), pocket_query::Error> {
//! let address = derive_address("2cf38013f8cbe524db3172ec507967ec551fd14cea8209cf4c9da2a490cecf74")?;
//! assert_eq!(to_micro_units(1u32)?, 1_000_000u32.into());
//!
//! let service = QueryService::new(QueryConfig::default())?;
//! let account = service.get_account(&address.to_hex(), AccountQueryParams::default()).await?;
//! println!("{}", format_pokt(&account.balance));
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod cli;
pub mod config;
mod error;
pub mod log;
pub mod query;
pub mod rpc;
pub mod transactions;
pub mod units;

pub use crate::address::{ADDRESS_LENGTH, Address, derive_address, is_valid_address};
pub use crate::config::QueryConfig;
pub use crate::error::{Error, Result};
pub use crate::query::{
    AccountDetails, AccountHistoryQueryParams, AccountOverview, AccountQueryParams, AccountState, AppQueryParams,
    AppState, AppsQueryParams, BlockQueryParams, BlockSummary, NodeQueryParams, NodeState, QueryService, SortOrder,
    StakingStatus,
};
pub use crate::rpc::TransportError;
pub use crate::transactions::{AccountKind, TransactionKind, TransactionMessage, TransactionRecord, classify};
pub use crate::units::{Amount, MICRO_UNITS_PER_POKT, Quantity, format_pokt, to_micro_units};
