//! JSON-RPC envelope shared by the wallet connector and the watcher.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<serde_json::Value>,
    error: Option<RpcErrorBody>,
}

/// The error object of a JSON-RPC response.
#[derive(Deserialize, Debug)]
pub(crate) struct RpcErrorBody {
    pub code: i64,
    pub message: String,
}

/// Failure of a single JSON-RPC call.
#[derive(Error, Debug)]
pub(crate) enum RpcCallError {
    /// The endpoint could not be reached or the body was not JSON-RPC.
    #[error("transport: {0}")]
    Transport(String),
    /// The endpoint answered with a JSON-RPC error object.
    #[error("rpc error {}: {}", .0.code, .0.message)]
    Remote(RpcErrorBody),
}

/// Issue one JSON-RPC call and return the `result` value.
pub(crate) async fn call(
    http: &reqwest::Client,
    url: &Url,
    method: &str,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcCallError> {
    let request = RpcRequest {
        jsonrpc: "2.0",
        id: 1,
        method,
        params,
    };
    let response = http
        .post(url.clone())
        .json(&request)
        .send()
        .await
        .map_err(|e| RpcCallError::Transport(e.to_string()))?;
    let body: RpcResponse = response
        .json()
        .await
        .map_err(|e| RpcCallError::Transport(e.to_string()))?;

    if let Some(err) = body.error {
        return Err(RpcCallError::Remote(err));
    }
    body.result
        .ok_or_else(|| RpcCallError::Transport("response carried no result".to_string()))
}

/// Encode bytes as `0x`-prefixed lowercase hex.
pub(crate) fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

/// Decode `0x`-prefixed hex into bytes.
pub(crate) fn from_hex(s: &str) -> Result<Vec<u8>, String> {
    let s = s.trim().trim_start_matches("0x");
    // Byte-indexed slicing below; non-ascii input must fail, not panic.
    if !s.is_ascii() {
        return Err("hex string contains non-ascii characters".to_string());
    }
    if s.len() % 2 != 0 {
        return Err(format!("odd-length hex string ({} chars)", s.len()));
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| format!("invalid hex at {i}: {e}"))
        })
        .collect()
}

/// Parse a `0x`-prefixed hex quantity into a u64.
pub(crate) fn from_hex_quantity(s: &str) -> Result<u64, String> {
    let s = s.trim().trim_start_matches("0x");
    u64::from_str_radix(s, 16).map_err(|e| format!("invalid hex quantity: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let bytes = vec![0x00, 0xff, 0x12];
        assert_eq!(to_hex(&bytes), "0x00ff12");
        assert_eq!(from_hex("0x00ff12").unwrap(), bytes);
    }

    #[test]
    fn hex_rejects_garbage() {
        assert!(from_hex("0x123").is_err());
        assert!(from_hex("0xzz").is_err());
    }

    #[test]
    fn hex_rejects_multibyte_input() {
        // Network-supplied strings may carry arbitrary UTF-8.
        assert!(from_hex("0x\u{20a0}aaaaaaaa").is_err());
        assert!(from_hex("0xaa\u{e9}aa").is_err());
    }

    #[test]
    fn quantity_parsing() {
        assert_eq!(from_hex_quantity("0x10").unwrap(), 16);
        assert_eq!(from_hex_quantity("0x0").unwrap(), 0);
        assert!(from_hex_quantity("0x").is_err());
    }
}
