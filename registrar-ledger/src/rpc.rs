//! JSON-RPC 2.0 client for the ledger node.

use serde_json::json;
use tracing::{debug, warn};

use registrar_core::error::{RegistrarError, Result};

/// Thin JSON-RPC 2.0 client over HTTP.
///
/// Every failure — connection reset, malformed body, or an `error` member
/// in the response — maps to [`RegistrarError::Transport`]. The answer is
/// then *unknown*, which callers must never conflate with the ledger's
/// "absent" sentinel.
///
/// No client-side timeout is imposed: a hung node hangs the issuing
/// request's continuation. The only bounded waiting anywhere is the
/// consensus watcher's retry budget.
pub struct RpcClient {
    url: String,
    http_client: reqwest::Client,
}

impl RpcClient {
    /// Creates a client for the given node URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Issues one JSON-RPC call and returns the `result` member.
    pub async fn call(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let request = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        debug!(method, url = %self.url, "ledger call");

        let response = self
            .http_client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RegistrarError::Transport(e.to_string()))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| RegistrarError::Transport(e.to_string()))?;

        if let Some(error) = body.get("error") {
            warn!(method, %error, "ledger node returned an error");
            return Err(RegistrarError::Transport(format!(
                "{method} failed: {error}"
            )));
        }

        body.get("result")
            .cloned()
            .ok_or_else(|| RegistrarError::Transport(format!("{method}: no result member")))
    }

    /// `eth_call` against a contract, returning the raw hex result.
    pub async fn eth_call(&self, to: &str, data: &str) -> Result<String> {
        let result = self
            .call("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await?;
        as_hex_string(result)
    }

    /// `eth_sendTransaction`, returning the transaction hash.
    pub async fn send_transaction(
        &self,
        from: &str,
        to: &str,
        data: &str,
        gas: u64,
    ) -> Result<String> {
        let result = self
            .call(
                "eth_sendTransaction",
                json!([{
                    "from": from,
                    "to": to,
                    "data": data,
                    "gas": format!("0x{gas:x}"),
                }]),
            )
            .await?;
        as_hex_string(result)
    }

    /// `eth_getTransactionReceipt`; `None` while the transaction is not yet included.
    pub async fn transaction_receipt(&self, tx_hash: &str) -> Result<Option<serde_json::Value>> {
        let result = self
            .call("eth_getTransactionReceipt", json!([tx_hash]))
            .await?;
        if result.is_null() {
            Ok(None)
        } else {
            Ok(Some(result))
        }
    }

    /// `eth_getCode` at an address.
    pub async fn code_at(&self, address: &str) -> Result<String> {
        let result = self.call("eth_getCode", json!([address, "latest"])).await?;
        as_hex_string(result)
    }

    /// `eth_getBalance` of an account, as the node's hex quantity.
    pub async fn balance_of(&self, address: &str) -> Result<String> {
        let result = self
            .call("eth_getBalance", json!([address, "latest"]))
            .await?;
        as_hex_string(result)
    }
}

fn as_hex_string(value: serde_json::Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| RegistrarError::Transport(format!("expected hex string, got {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rpc_result(value: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": value
        }))
    }

    #[tokio::test]
    async fn test_eth_call_returns_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(json!({ "method": "eth_call" })))
            .respond_with(rpc_result(json!("0xabcdef")))
            .mount(&server)
            .await;

        let client = RpcClient::new(server.uri());
        let result = client.eth_call("0x01", "0x02").await.unwrap();
        assert_eq!(result, "0xabcdef");
    }

    #[tokio::test]
    async fn test_rpc_error_maps_to_transport() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": -32000, "message": "boom" }
            })))
            .mount(&server)
            .await;

        let client = RpcClient::new(server.uri());
        let err = client.eth_call("0x01", "0x02").await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_unreachable_node_maps_to_transport() {
        // Nothing listens here.
        let client = RpcClient::new("http://127.0.0.1:9");
        let err = client.eth_call("0x01", "0x02").await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_null_receipt_means_not_included() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(
                json!({ "method": "eth_getTransactionReceipt" }),
            ))
            .respond_with(rpc_result(json!(null)))
            .mount(&server)
            .await;

        let client = RpcClient::new(server.uri());
        assert!(client
            .transaction_receipt("0xdead")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_send_transaction_returns_hash() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_sendTransaction" })))
            .respond_with(rpc_result(json!("0xfeed")))
            .mount(&server)
            .await;

        let client = RpcClient::new(server.uri());
        let hash = client
            .send_transaction("0x01", "0x02", "0x03", 3_000_000)
            .await
            .unwrap();
        assert_eq!(hash, "0xfeed");
    }
}
