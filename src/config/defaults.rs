use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::{ApplyArgs, GatewayArgs};

/// Public mainnet gateway used when no gateway is configured.
pub const DEFAULT_GATEWAY_URL: &str = "https://mainnet.gateway.pokt.network/v1/6075fbc8aa55b60033dc1421";

/// Key of the configuration file section holding [`QueryConfig`].
pub const CONFIG_SECTION: &str = "client";

/// Settings threaded through every query.
///
/// Both fields are optional; [`QueryConfig::default`] talks to
/// [`DEFAULT_GATEWAY_URL`] and imposes no timeout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryConfig {
    pub gateway_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl QueryConfig {
    pub fn with_gateway(gateway_url: &str) -> Self {
        Self {
            gateway_url: Some(gateway_url.to_string()),
            ..Self::default()
        }
    }

    /// The configured gateway, or the default one if unset or empty.
    pub fn gateway_url(&self) -> &str {
        match self.gateway_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_GATEWAY_URL,
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl ApplyArgs for QueryConfig {
    fn apply_gateway(&mut self, args: &GatewayArgs) {
        if let Some(gateway_url) = &args.gateway_url {
            self.gateway_url = Some(gateway_url.clone());
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.request_timeout_secs = Some(timeout_secs);
        }
    }
}
