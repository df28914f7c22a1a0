use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::transactions::{AccountKind, TransactionRecord};
use crate::units::{Amount, deserialize_amount, deserialize_u64_lenient, serialize_amount};

/// Staking state of an application or node. Travels as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StakingStatus {
    Unstaked = 0,
    Unstaking = 1,
    #[default]
    Staked = 2,
}

impl StakingStatus {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Unstaked => "Unstaked",
            Self::Unstaking => "Unstaking",
            Self::Staked => "Staked",
        }
    }
}

impl fmt::Display for StakingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

impl TryFrom<u8> for StakingStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unstaked),
            1 => Ok(Self::Unstaking),
            2 => Ok(Self::Staked),
            other => Err(format!("unknown staking status {other}")),
        }
    }
}

impl Serialize for StakingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for StakingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// Order in which the gateway pages through an account's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountState {
    pub address: String,
    /// Sum of all coin entries held by the account, in uPOKT.
    #[serde(serialize_with = "serialize_amount")]
    pub balance: Amount,
}

/// An application as returned by the `app`/`apps` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct AppState {
    pub address: String,
    #[serde(default)]
    pub chains: Vec<String>,
    #[serde(deserialize_with = "deserialize_amount", serialize_with = "serialize_amount")]
    pub max_relays: Amount,
    pub public_key: String,
    #[serde(deserialize_with = "deserialize_amount", serialize_with = "serialize_amount")]
    pub staked_tokens: Amount,
    pub status: StakingStatus,
    #[serde(default)]
    pub unstaking_time: String,
}

/// A node as returned by the `node` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct NodeState {
    pub address: String,
    #[serde(default)]
    pub chains: Vec<String>,
    #[serde(default)]
    pub jailed: bool,
    pub public_key: String,
    pub service_url: String,
    pub status: StakingStatus,
    #[serde(
        rename(deserialize = "tokens"),
        deserialize_with = "deserialize_amount",
        serialize_with = "serialize_amount"
    )]
    pub staked_tokens: Amount,
    #[serde(default)]
    pub unstaking_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    pub hash: String,
    pub height: u64,
    pub time: String,
    pub chain_id: String,
    pub proposer_address: String,
    pub num_txs: u64,
}

/// Stake details matching an address' inferred [`AccountKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum AccountDetails {
    None,
    Application(AppState),
    Node(NodeState),
}

/// Everything known about an address: balance, inferred kind, stake details
/// and a page of history in feed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOverview {
    pub address: String,
    #[serde(serialize_with = "serialize_amount")]
    pub balance: Amount,
    pub kind: AccountKind,
    pub details: AccountDetails,
    pub history: Vec<TransactionRecord>,
}

// Wire shapes. Field names follow the gateway's snake_case JSON.

#[derive(Debug, Deserialize)]
pub(crate) struct HeightResponse {
    #[serde(deserialize_with = "deserialize_u64_lenient")]
    pub height: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountResponse {
    pub address: String,
    #[serde(default)]
    pub coins: Option<Vec<Coin>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Coin {
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Amount,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppsResponse {
    #[serde(default)]
    pub result: Option<Vec<AppState>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountHistoryResponse {
    #[serde(default)]
    pub txs: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BlockResponse {
    pub block_id: BlockId,
    pub block: Block,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BlockId {
    pub hash: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Block {
    pub header: BlockHeader,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BlockHeader {
    pub chain_id: String,
    #[serde(deserialize_with = "deserialize_u64_lenient")]
    pub height: u64,
    pub time: String,
    #[serde(default, deserialize_with = "deserialize_u64_lenient")]
    pub num_txs: u64,
    pub proposer_address: String,
}

impl From<BlockResponse> for BlockSummary {
    fn from(response: BlockResponse) -> Self {
        let header = response.block.header;
        Self {
            hash: response.block_id.hash,
            height: header.height,
            time: header.time,
            chain_id: header.chain_id,
            proposer_address: header.proposer_address,
            num_txs: header.num_txs,
        }
    }
}
