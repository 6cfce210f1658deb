//! Ethereum JSON-RPC shaping shared by every wallet implementation.
//!
//! The browser wallet forwards these payloads to an EIP-1193 provider and the
//! native wallet posts them over HTTP; both parse results and errors here, so
//! classification into [`TxError`] happens in exactly one place.

#[cfg(feature = "native")]
pub mod http;

#[cfg(feature = "native")]
pub use http::HttpRpcWallet;

use alloy_primitives::{hex, Address, Bytes, TxHash};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::action::{ReadRequest, TxReceipt, WriteRequest};
use crate::error::{TxError, TxResult};

/// JSON-RPC error object.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl RpcErrorObject {
    /// Classify, folding a string `data` field (revert reason) into the message.
    pub fn into_tx_error(self) -> TxError {
        let message = match self.data.as_ref().and_then(Value::as_str) {
            Some(data) if !data.starts_with("0x") => format!("{}: {}", self.message, data),
            _ => self.message,
        };
        TxError::classify(Some(self.code), &message)
    }
}

/// Build a JSON-RPC 2.0 request envelope.
pub fn request_body(id: u64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    })
}

/// Unwrap a response envelope into its `result`.
pub fn parse_response(body: Value) -> TxResult<Value> {
    #[derive(Deserialize)]
    struct Envelope {
        #[serde(default)]
        result: Option<Value>,
        #[serde(default)]
        error: Option<RpcErrorObject>,
    }

    let envelope: Envelope = serde_json::from_value(body)
        .map_err(|e| TxError::NetworkError(format!("malformed JSON-RPC response: {}", e)))?;

    match (envelope.error, envelope.result) {
        (Some(error), _) => Err(error.into_tx_error()),
        (None, Some(result)) => Ok(result),
        (None, None) => Ok(Value::Null),
    }
}

/// `eth_call` params.
pub fn call_params(request: &ReadRequest) -> Value {
    json!([
        {
            "to": request.to.to_string(),
            "data": hex::encode_prefixed(&request.calldata),
        },
        "latest"
    ])
}

/// `eth_sendTransaction` params with an explicit gas ceiling.
pub fn send_params(from: Address, request: &WriteRequest) -> Value {
    json!([{
        "from": from.to_string(),
        "to": request.to.to_string(),
        "data": hex::encode_prefixed(&request.calldata),
        "gas": format!("{:#x}", request.gas_limit),
    }])
}

/// `eth_getTransactionReceipt` params.
pub fn receipt_params(hash: TxHash) -> Value {
    json!([hash.to_string()])
}

/// Decode a `0x…` data string.
pub fn decode_bytes(value: &Value) -> TxResult<Bytes> {
    let s = value
        .as_str()
        .ok_or_else(|| TxError::NetworkError(format!("expected hex string, got {}", value)))?;
    hex::decode(s)
        .map(Bytes::from)
        .map_err(|e| TxError::NetworkError(format!("invalid hex '{}': {}", s, e)))
}

pub fn decode_hash(value: &Value) -> TxResult<TxHash> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| TxError::NetworkError(format!("invalid transaction hash: {}", value)))
}

/// Parse a `0x`-prefixed quantity.
pub fn parse_quantity(value: &Value) -> Option<u64> {
    let s = value.as_str()?;
    u64::from_str_radix(s.strip_prefix("0x").unwrap_or(s), 16).ok()
}

/// `eth_accounts` / `eth_requestAccounts` result.
pub fn parse_accounts(value: &Value) -> TxResult<Vec<Address>> {
    let list = value
        .as_array()
        .ok_or_else(|| TxError::NetworkError(format!("expected account list, got {}", value)))?;
    Ok(list
        .iter()
        .filter_map(|a| a.as_str().and_then(|s| s.parse().ok()))
        .collect())
}

/// `eth_getTransactionReceipt` result; `null` while still pending.
pub fn parse_receipt(value: &Value) -> TxResult<Option<TxReceipt>> {
    if value.is_null() {
        return Ok(None);
    }

    let hash = decode_hash(&value["transactionHash"])?;
    // Pre-Byzantium receipts have no status; treat as success
    let success = value.get("status").and_then(parse_quantity).map_or(true, |s| s == 1);

    Ok(Some(TxReceipt {
        hash,
        block_number: parse_quantity(&value["blockNumber"]),
        gas_used: parse_quantity(&value["gasUsed"]),
        success,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{B256, U256};

    #[test]
    fn test_send_params_shape() {
        let request = WriteRequest {
            to: Address::with_last_byte(2),
            function: "claimRevenue",
            calldata: Bytes::from(vec![0xde, 0xad]),
            gas_limit: 200_000,
        };
        let params = send_params(Address::with_last_byte(1), &request);
        let tx = &params[0];
        assert_eq!(tx["data"], "0xdead");
        assert_eq!(tx["gas"], "0x30d40");
        assert_eq!(tx["to"], "0x0000000000000000000000000000000000000002");
    }

    #[test]
    fn test_call_params_use_latest_block() {
        let request = ReadRequest {
            to: Address::ZERO,
            function: "totalSupply",
            calldata: Bytes::from(vec![0x18, 0x16, 0x0d, 0xdd]),
        };
        let params = call_params(&request);
        assert_eq!(params[1], "latest");
        assert_eq!(params[0]["data"], "0x18160ddd");
    }

    #[test]
    fn test_error_envelope_classified() {
        let body = json!({
            "jsonrpc": "2.0", "id": 1,
            "error": { "code": 4001, "message": "User rejected the request." }
        });
        assert_eq!(parse_response(body), Err(TxError::RejectedByUser));

        let body = json!({
            "jsonrpc": "2.0", "id": 2,
            "error": { "code": 3, "message": "execution reverted", "data": "Not token owner" }
        });
        assert_eq!(
            parse_response(body),
            Err(TxError::ContractReverted { reason: Some("Not token owner".into()) })
        );
    }

    #[test]
    fn test_result_envelope() {
        let body = json!({ "jsonrpc": "2.0", "id": 1, "result": "0x01" });
        assert_eq!(parse_response(body).unwrap(), json!("0x01"));
    }

    #[test]
    fn test_receipt_parsing() {
        assert_eq!(parse_receipt(&Value::Null).unwrap(), None);

        let hash = B256::with_last_byte(5);
        let raw = json!({
            "transactionHash": hash.to_string(),
            "blockNumber": "0x10",
            "gasUsed": "0x5208",
            "status": "0x0"
        });
        let receipt = parse_receipt(&raw).unwrap().unwrap();
        assert_eq!(receipt.hash, hash);
        assert_eq!(receipt.block_number, Some(16));
        assert_eq!(receipt.gas_used, Some(21_000));
        assert!(!receipt.success);
    }

    #[test]
    fn test_decode_word() {
        let word = format!("0x{:064x}", 42);
        let bytes = decode_bytes(&json!(word)).unwrap();
        assert_eq!(U256::from_be_slice(&bytes), U256::from(42u64));
        assert!(decode_bytes(&json!(12)).is_err());
    }

    #[test]
    fn test_accounts() {
        let accounts = parse_accounts(&json!(["0x0000000000000000000000000000000000000009"])).unwrap();
        assert_eq!(accounts, vec![Address::with_last_byte(9)]);
    }
}
