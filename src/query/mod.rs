mod params;
mod service;
mod types;

pub use params::{
    AccountHistoryQueryParams, AccountQueryParams, AppQueryParams, AppsQueryParams, BlockQueryParams, NodeQueryParams,
};
pub use service::QueryService;
pub use types::{
    AccountDetails, AccountOverview, AccountState, AppState, BlockSummary, NodeState, SortOrder, StakingStatus,
};
