use serde::Serialize;

use super::types::{SortOrder, StakingStatus};

/// Parameters for single-address lookups (`account`, `app`, `node`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccountQueryParams {
    /// Block height to query at; 0 means the latest block.
    pub height: u64,
}

pub type AppQueryParams = AccountQueryParams;
pub type NodeQueryParams = AccountQueryParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockQueryParams {
    /// 0 means the latest block.
    pub height: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppsQueryParams {
    pub height: u64,
    pub page: u32,
    pub per_page: u32,
    pub staking_status: StakingStatus,
}

impl Default for AppsQueryParams {
    fn default() -> Self {
        Self {
            height: 0,
            page: 1,
            per_page: 100,
            staking_status: StakingStatus::Staked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountHistoryQueryParams {
    pub height: u64,
    pub page: u32,
    pub per_page: u32,
    pub sort: SortOrder,
}

impl Default for AccountHistoryQueryParams {
    fn default() -> Self {
        Self {
            height: 0,
            page: 1,
            per_page: 100,
            sort: SortOrder::Desc,
        }
    }
}

// Request bodies as the gateway expects them.

#[derive(Debug, Serialize)]
pub(crate) struct AddressRequest<'a> {
    pub address: &'a str,
    pub height: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct HeightRequest {
    pub height: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct AppsRequest {
    pub height: u64,
    pub opts: AppsOptions,
}

#[derive(Debug, Serialize)]
pub(crate) struct AppsOptions {
    pub page: u32,
    pub per_page: u32,
    pub staking_status: StakingStatus,
}

#[derive(Debug, Serialize)]
pub(crate) struct AccountHistoryRequest<'a> {
    pub address: &'a str,
    pub height: u64,
    pub opts: HistoryOptions,
}

#[derive(Debug, Serialize)]
pub(crate) struct HistoryOptions {
    pub page: u32,
    pub per_page: u32,
    pub sort: SortOrder,
}

impl From<AppsQueryParams> for AppsRequest {
    fn from(params: AppsQueryParams) -> Self {
        Self {
            height: params.height,
            opts: AppsOptions {
                page: params.page,
                per_page: params.per_page,
                staking_status: params.staking_status,
            },
        }
    }
}

impl<'a> AccountHistoryRequest<'a> {
    pub fn new(address: &'a str, params: AccountHistoryQueryParams) -> Self {
        Self {
            address,
            height: params.height,
            opts: HistoryOptions {
                page: params.page,
                per_page: params.per_page,
                sort: params.sort,
            },
        }
    }
}
