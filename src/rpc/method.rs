use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::config::QueryConfig;
use crate::error::{Error, Result};

/// A gateway RPC method this client is allowed to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcMethod {
    Height,
    Account,
    App,
    Apps,
    AccountHistory,
    Node,
    Block,
}

/// The allow-list of callable methods. Nothing outside it is ever requested.
pub const RPC_METHODS: [RpcMethod; 7] = [
    RpcMethod::Account,
    RpcMethod::AccountHistory,
    RpcMethod::App,
    RpcMethod::Apps,
    RpcMethod::Block,
    RpcMethod::Height,
    RpcMethod::Node,
];

impl RpcMethod {
    fn entry(&self) -> (&'static str, &'static str) {
        match self {
            Self::Account => ("ACCOUNT", "/v1/query/account"),
            Self::AccountHistory => ("ACCOUNT_HISTORY", "/v1/query/accounttxs"),
            Self::App => ("APP", "/v1/query/app"),
            Self::Apps => ("APPS", "/v1/query/apps"),
            Self::Block => ("BLOCK", "/v1/query/block"),
            Self::Height => ("HEIGHT", "/v1/query/height"),
            Self::Node => ("NODE", "/v1/query/node"),
        }
    }

    /// Logical name, e.g. `ACCOUNT_HISTORY`.
    pub fn name(&self) -> &'static str {
        self.entry().0
    }

    /// Path appended to the gateway base URL, e.g. `/v1/query/accounttxs`.
    pub fn path(&self) -> &'static str {
        self.entry().1
    }
}

impl fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RpcMethod {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        RPC_METHODS
            .into_iter()
            .find(|method| method.name() == name)
            .ok_or_else(|| Error::UnknownMethod(name.to_string()))
    }
}

/// Builds the full URL for `method` against the configured gateway.
///
/// The path suffix is appended to the base URL verbatim (gateway URLs embed an
/// application id in their path, so `Url::join` semantics would drop it).
pub fn compose_url(method: RpcMethod, config: &QueryConfig) -> Result<Url> {
    let base = config.gateway_url();
    let url = format!("{}{}", base.trim_end_matches('/'), method.path());
    Ok(Url::parse(&url)?)
}

/// Like [`compose_url`], for a method given by its logical name.
///
/// # Errors
///
/// Returns [`Error::UnknownMethod`] if `name` is not on the allow-list.
pub fn compose_method_url(name: &str, config: &QueryConfig) -> Result<Url> {
    compose_url(name.parse()?, config)
}
