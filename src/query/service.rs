//! High-level query surface.
//!
//! [`QueryService`] wraps the low-level [`RpcClient`] and provides one method
//! per gateway query, each following the same steps:
//!
//! 1. Validate address arguments, failing with
//!    [`Error::InvalidAddress`](crate::Error::InvalidAddress) before any
//!    request is made.
//! 2. Build the request body from the caller's parameters (see the `*Params`
//!    types for defaults).
//! 3. Call the gateway.
//! 4. Reshape the answer: amounts become [`Amount`](crate::Amount)s,
//!    transactions are decoded into [`TransactionRecord`]s.
//!
//! # Example
//!
//! ```rust,no_run
//! use pocket_query::{QueryConfig, QueryService, AccountQueryParams, format_pokt};
//!
//! # async fn example() -> Result<(), pocket_query::Error> {
//! let service = QueryService::new(QueryConfig::default())?;
//!
//! let account = service
//!     .get_account("fa08efadee9eaa9d5549bccd6087002a5f47c0e2", AccountQueryParams::default())
//!     .await?;
//! println!("Balance: {}", format_pokt(&account.balance));
//! # Ok(())
//! # }
//! ```

use log::debug;
use num_bigint::BigUint;
use serde::Serialize;

use crate::address::Address;
use crate::config::QueryConfig;
use crate::error::Result;
use crate::rpc::{RpcClient, RpcMethod};
use crate::transactions::{AccountKind, TransactionRecord, decode_transaction, infer_account_kind, into_feed_order};

use super::params::{
    AccountHistoryQueryParams, AccountHistoryRequest, AccountQueryParams, AddressRequest, AppQueryParams,
    AppsQueryParams, AppsRequest, BlockQueryParams, HeightRequest, NodeQueryParams,
};
use super::types::{
    AccountDetails, AccountHistoryResponse, AccountOverview, AccountResponse, AccountState, AppState, AppsResponse,
    BlockResponse, BlockSummary, HeightResponse, NodeState,
};

/// Read-only client for chain state exposed by a Pocket RPC gateway.
///
/// Holds no state besides its configuration; concurrent calls are fully
/// independent. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct QueryService {
    rpc: RpcClient,
    config: QueryConfig,
}

impl QueryService {
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be initialized (e.g. TLS backend
    /// initialization failure).
    pub fn new(config: QueryConfig) -> Result<Self> {
        Ok(Self {
            rpc: RpcClient::new()?,
            config,
        })
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Returns a service sharing this one's HTTP client but using `config`,
    /// e.g. to point a single query at another gateway.
    pub fn with_config(&self, config: QueryConfig) -> Self {
        Self {
            rpc: self.rpc.clone(),
            config,
        }
    }

    /// Returns the latest block height.
    pub async fn get_height(&self) -> Result<u64> {
        let response: HeightResponse = self.rpc.call_as(RpcMethod::Height, None, &self.config).await?;
        Ok(response.height)
    }

    /// Returns an account's balance, summed over all its coin entries.
    pub async fn get_account(&self, address: &str, params: AccountQueryParams) -> Result<AccountState> {
        let address: Address = address.parse()?;
        debug!(address:% = address, height = params.height; "Query: account");

        let response: AccountResponse = self
            .call(RpcMethod::Account, &AddressRequest {
                address: &address.to_hex(),
                height: params.height,
            })
            .await?;

        let balance = response
            .coins
            .unwrap_or_default()
            .into_iter()
            .fold(BigUint::default(), |total, coin| total + coin.amount);

        Ok(AccountState {
            address: response.address,
            balance,
        })
    }

    /// Returns an application's staking state.
    pub async fn get_app(&self, address: &str, params: AppQueryParams) -> Result<AppState> {
        let address: Address = address.parse()?;
        debug!(address:% = address, height = params.height; "Query: app");

        self.call(RpcMethod::App, &AddressRequest {
            address: &address.to_hex(),
            height: params.height,
        })
        .await
    }

    /// Returns one page of applications with the requested staking status.
    pub async fn get_apps(&self, params: AppsQueryParams) -> Result<Vec<AppState>> {
        debug!(page = params.page, per_page = params.per_page; "Query: apps");

        let response: AppsResponse = self.call(RpcMethod::Apps, &AppsRequest::from(params)).await?;
        Ok(response.result.unwrap_or_default())
    }

    /// Returns a node's staking state.
    pub async fn get_node(&self, address: &str, params: NodeQueryParams) -> Result<NodeState> {
        let address: Address = address.parse()?;
        debug!(address:% = address, height = params.height; "Query: node");

        self.call(RpcMethod::Node, &AddressRequest {
            address: &address.to_hex(),
            height: params.height,
        })
        .await
    }

    /// Returns a summary of the block header at `params.height`.
    pub async fn get_block(&self, params: BlockQueryParams) -> Result<BlockSummary> {
        debug!(height = params.height; "Query: block");

        let response: BlockResponse = self
            .call(RpcMethod::Block, &HeightRequest { height: params.height })
            .await?;
        Ok(response.into())
    }

    /// Returns one page of an address' transactions, decoded.
    ///
    /// Records come back in the reverse of the gateway's order. With the
    /// default `desc` sort that puts the oldest transaction of the page
    /// first; reverse again for the gateway's order.
    ///
    /// # Errors
    ///
    /// Besides the usual query errors, fails with
    /// [`Error::MalformedTransaction`](crate::Error::MalformedTransaction) if
    /// any transaction of the page cannot be decoded.
    pub async fn get_account_history(
        &self,
        address: &str,
        params: AccountHistoryQueryParams,
    ) -> Result<Vec<TransactionRecord>> {
        let address: Address = address.parse()?;
        let records = self.fetch_history(&address, params).await?;
        Ok(into_feed_order(records))
    }

    /// Fetches balance, history and, depending on what the history suggests
    /// the address is, its application or node stake.
    pub async fn inspect_account(&self, address: &str, params: AccountHistoryQueryParams) -> Result<AccountOverview> {
        let address: Address = address.parse()?;
        let at_height = AccountQueryParams { height: params.height };

        let account = self.get_account(&address.to_hex(), at_height).await?;
        let history = self.fetch_history(&address, params).await?;

        let kind = infer_account_kind(&history);
        debug!(address:% = address, kind:? = kind; "Query: inferred account kind");

        let details = match kind {
            AccountKind::Account => AccountDetails::None,
            AccountKind::Application => AccountDetails::Application(self.get_app(&address.to_hex(), at_height).await?),
            AccountKind::Node => AccountDetails::Node(self.get_node(&address.to_hex(), at_height).await?),
        };

        Ok(AccountOverview {
            address: address.to_hex(),
            balance: account.balance,
            kind,
            details,
            history: into_feed_order(history),
        })
    }

    /// History in the gateway's own order.
    async fn fetch_history(&self, address: &Address, params: AccountHistoryQueryParams) -> Result<Vec<TransactionRecord>> {
        debug!(address:% = address, page = params.page, per_page = params.per_page; "Query: account history");

        let address = address.to_hex();
        let response: AccountHistoryResponse = self
            .call(RpcMethod::AccountHistory, &AccountHistoryRequest::new(&address, params))
            .await?;

        let records = response
            .txs
            .unwrap_or_default()
            .iter()
            .map(decode_transaction)
            .collect::<Result<Vec<_>>>()?;
        debug!(count = records.len(); "Query: decoded account history");
        Ok(records)
    }

    async fn call<B, T>(&self, method: RpcMethod, body: &B) -> Result<T>
    where
        B: Serialize,
        T: serde::de::DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.rpc.call_as(method, Some(body), &self.config).await
    }
}
