use reqwest::Client;
use rives_types::{RivesError, RivesResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub fn build_http_client(timeout: Duration) -> RivesResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| RivesError::Network(format!("Failed to build HTTP client: {}", e)))
}

/// Minimal JSON-RPC 2.0 client over HTTP POST.
pub struct RpcClient {
    http: Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> RivesResult<Self> {
        Ok(Self::with_client(build_http_client(timeout)?, url))
    }

    pub fn with_client(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> RivesResult<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id
        });

        debug!("RPC {} -> {}", method, self.url);

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RivesError::Network(format!("HTTP POST failed: {}", e)))?;

        let status = response.status();
        let result: serde_json::Value = response
            .json()
            .await
            .map_err(|e| RivesError::Rpc(format!("Failed to parse RPC response ({}): {}", status, e)))?;

        if let Some(error) = result.get("error") {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(RivesError::Rpc(format!("{} failed: {}", method, message)));
        }

        let value = result
            .get("result")
            .cloned()
            .ok_or_else(|| RivesError::Rpc(format!("{} returned no result", method)))?;

        serde_json::from_value(value)
            .map_err(|e| RivesError::Rpc(format!("Invalid {} response: {}", method, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = RpcClient::new("http://localhost:8080/rpc", Duration::from_secs(5)).unwrap();
        assert_eq!(client.url(), "http://localhost:8080/rpc");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let client = RpcClient::new("http://127.0.0.1:1/rpc", Duration::from_secs(2)).unwrap();
        let result: RivesResult<serde_json::Value> =
            client.call("cartesi_listOutputs", serde_json::json!({})).await;
        assert!(matches!(result, Err(RivesError::Network(_))));
    }
}
