use std::time::Instant;

use log::{debug, warn};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::QueryConfig;
use crate::error::{Error, Result};

use super::error::TransportError;
use super::method::{RpcMethod, compose_url};

const USER_AGENT: &str = concat!("pocket-query/", env!("CARGO_PKG_VERSION"));

/// Low level gateway client: one POST per call, no retries.
///
/// Retrying is the gateway's job; when its relay budget against chain nodes
/// runs out it answers with a `message` body, which is surfaced as
/// [`Error::RelayAttemptsExhausted`].
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: reqwest::Client,
}

impl RpcClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Calls `method` and returns the raw JSON answer.
    ///
    /// The body is parsed before the status code is looked at: the gateway
    /// reports relay failures with a `message` field on both 2xx and error
    /// statuses.
    ///
    /// # Errors
    ///
    /// - [`Error::RelayAttemptsExhausted`] if the answer carries `message`
    /// - [`Error::Transport`] for connection failures, non-JSON bodies and
    ///   non-success statuses without a gateway message
    pub async fn call(&self, method: RpcMethod, body: Option<Value>, config: &QueryConfig) -> Result<Value> {
        let url = compose_url(method, config)?;
        debug!(method = method.name(), url:% = url; "RPC: Sending request");

        let mut request = self.client.post(url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_string(&body)?);
        }
        if let Some(timeout) = config.request_timeout() {
            request = request.timeout(timeout);
        }

        let start = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(
            method = method.name(),
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64;
            "RPC: Response received"
        );

        let value: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) if status.is_success() => return Err(TransportError::JsonError(e).into()),
            Err(_) => return Err(TransportError::ServerError { status, body: text }.into()),
        };

        if let Some(message) = gateway_failure(&value) {
            warn!(
                method = method.name(),
                reason = &*message;
                "RPC: Gateway exhausted its relay attempts"
            );
            return Err(Error::RelayAttemptsExhausted(message));
        }

        if !status.is_success() {
            return Err(TransportError::ServerError { status, body: text }.into());
        }

        Ok(value)
    }

    /// Calls `method` and deserializes the answer into `T`.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        method: RpcMethod,
        body: Option<Value>,
        config: &QueryConfig,
    ) -> Result<T> {
        let value = self.call(method, body, config).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Returns the gateway's failure message if `value` has the failure shape.
fn gateway_failure(value: &Value) -> Option<String> {
    let message = value.as_object()?.get("message")?;
    Some(match message {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config_for(server: &MockServer) -> QueryConfig {
        QueryConfig::with_gateway(&server.uri())
    }

    #[test]
    fn test_gateway_failure_shape() {
        assert_eq!(
            gateway_failure(&json!({ "message": "Relay attempts exhausted" })),
            Some("Relay attempts exhausted".to_string())
        );
        assert_eq!(gateway_failure(&json!({ "message": 503 })), Some("503".to_string()));
        assert_eq!(gateway_failure(&json!({ "height": 1 })), None);
        assert_eq!(gateway_failure(&json!(["message"])), None);
    }

    #[tokio::test]
    async fn test_call_posts_json_body() {
        let mock_server = MockServer::start().await;
        let body = json!({ "address": "fa08efadee9eaa9d5549bccd6087002a5f47c0e2", "height": 0 });

        Mock::given(method("POST"))
            .and(path("/v1/query/account"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(&body))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "coins": [] })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = RpcClient::new().unwrap();
        let value = client
            .call(RpcMethod::Account, Some(body), &config_for(&mock_server))
            .await
            .unwrap();

        assert_eq!(value, json!({ "coins": [] }));
    }

    #[tokio::test]
    async fn test_call_without_body_sends_empty_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/query/height"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "height": 12 })))
            .mount(&mock_server)
            .await;

        let client = RpcClient::new().unwrap();
        let value = client
            .call(RpcMethod::Height, None, &config_for(&mock_server))
            .await
            .unwrap();

        assert_eq!(value["height"], 12);
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_message_field_is_relay_exhaustion_regardless_of_status() {
        for status in [200, 500] {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "message": "no nodes left" })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let client = RpcClient::new().unwrap();
            let err = client
                .call(RpcMethod::Height, None, &config_for(&mock_server))
                .await
                .unwrap_err();

            assert!(matches!(err, Error::RelayAttemptsExhausted(ref m) if m == "no nodes left"));
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>bad gateway</html>"))
            .mount(&mock_server)
            .await;

        let client = RpcClient::new().unwrap();
        let err = client
            .call(RpcMethod::Height, None, &config_for(&mock_server))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(TransportError::JsonError(_))));
    }

    #[tokio::test]
    async fn test_error_status_without_message_is_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
            .mount(&mock_server)
            .await;

        let client = RpcClient::new().unwrap();
        let err = client
            .call(RpcMethod::Height, None, &config_for(&mock_server))
            .await
            .unwrap_err();

        match err {
            Error::Transport(TransportError::ServerError { status, body }) => {
                assert_eq!(status.as_u16(), 502);
                assert_eq!(body, "upstream down");
            },
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_transport_error() {
        // Nothing listens on port 9 (discard) on a test machine.
        let config = QueryConfig::with_gateway("http://127.0.0.1:9");
        let client = RpcClient::new().unwrap();

        let err = client.call(RpcMethod::Height, None, &config).await.unwrap_err();

        assert!(matches!(err, Error::Transport(TransportError::RequestFailed(_))));
    }
}
