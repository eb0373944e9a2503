use serde::Deserialize;
use serde_json::json;

use crate::contracts::ContractCaller;
use crate::error::CallError;

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorObject>,
}

/// `eth_call` against the latest block over HTTP JSON-RPC.
#[derive(Debug, Clone)]
pub struct JsonRpcCaller {
    client: reqwest::Client,
    url: String,
}

impl JsonRpcCaller {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl ContractCaller for JsonRpcCaller {
    async fn call(&self, to: &str, calldata: Vec<u8>) -> Result<Vec<u8>, CallError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [
                { "to": to, "data": format!("0x{}", hex::encode(&calldata)) },
                "latest"
            ]
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CallError::Transport(format!("http status {status}")));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| CallError::InvalidResponse(e.to_string()))?;
        parse_result(body)
    }
}

fn parse_result(body: RpcResponse) -> Result<Vec<u8>, CallError> {
    if let Some(error) = body.error {
        return Err(CallError::Rpc {
            code: error.code,
            message: error.message,
        });
    }
    let result = body
        .result
        .ok_or_else(|| CallError::InvalidResponse("missing result".to_string()))?;
    let digits = result.strip_prefix("0x").unwrap_or(&result);
    hex::decode(digits).map_err(|e| CallError::InvalidResponse(format!("bad hex result: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> RpcResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_hex_result() {
        let data = parse_result(body(r#"{"jsonrpc":"2.0","id":1,"result":"0x00ff"}"#)).unwrap();
        assert_eq!(data, vec![0x00, 0xff]);
    }

    #[test]
    fn test_parse_rpc_error() {
        let err = parse_result(body(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":3,"message":"execution reverted"}}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, CallError::Rpc { code: 3, .. }));
    }

    #[test]
    fn test_parse_malformed_result() {
        assert!(matches!(
            parse_result(body(r#"{"jsonrpc":"2.0","id":1,"result":"0xzz"}"#)),
            Err(CallError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_result(body(r#"{"jsonrpc":"2.0","id":1}"#)),
            Err(CallError::InvalidResponse(_))
        ));
    }
}
