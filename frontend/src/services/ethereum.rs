//! EIP-1193 provider bridge and the browser [`WalletClient`].
//!
//! Payloads are shaped by `flowmint::rpc` and errors classified there, so
//! the browser and the CLI agree on what a rejection looks like.

use alloy_primitives::{Address, Bytes, TxHash};
use flowmint::rpc::{
    call_params, decode_bytes, decode_hash, parse_receipt, receipt_params, send_params,
    RpcErrorObject,
};
use flowmint::{PollConfig, ReadRequest, TxError, TxReceipt, WalletClient, WriteRequest};
use flowmint::error::TxResult;
use gloo_timers::future::TimeoutFuture;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Send one JSON-RPC request through `window.ethereum`.
pub async fn request(method: &str, params: Value) -> TxResult<Value> {
    log::debug!("-> {}", method);

    let promise = eth_request_js(method, &params.to_string());
    let result = JsFuture::from(promise).await.map_err(js_error)?;

    let text = result
        .as_string()
        .ok_or_else(|| TxError::NetworkError(format!("{} returned a non-string result", method)))?;
    serde_json::from_str(&text)
        .map_err(|e| TxError::NetworkError(format!("invalid JSON from {}: {}", method, e)))
}

/// Classify a rejected provider promise.
fn js_error(e: JsValue) -> TxError {
    match serde_wasm_bindgen::from_value::<RpcErrorObject>(e.clone()) {
        Ok(error) => {
            log::warn!("Provider error {}: {}", error.code, error.message);
            error.into_tx_error()
        }
        Err(_) => {
            let message = js_sys::Reflect::get(&e, &"message".into())
                .ok()
                .and_then(|v| v.as_string())
                .or_else(|| e.as_string())
                .unwrap_or_else(|| "Unknown JS error".to_string());
            log::warn!("Provider error: {}", message);
            TxError::classify(None, &message)
        }
    }
}

pub fn has_provider() -> bool {
    has_provider_js()
}

/// Wallet backed by the injected provider for one connected account.
#[derive(Clone, Debug)]
pub struct BrowserWallet {
    account: Option<Address>,
    poll: PollConfig,
}

impl BrowserWallet {
    pub fn new(account: Option<Address>, poll: PollConfig) -> Self {
        Self { account, poll }
    }
}

impl WalletClient for BrowserWallet {
    fn account(&self) -> Option<Address> {
        self.account
    }

    async fn call(&self, read: &ReadRequest) -> TxResult<Bytes> {
        let value = request("eth_call", call_params(read)).await?;
        decode_bytes(&value)
    }

    async fn send_transaction(&self, write: &WriteRequest) -> TxResult<TxHash> {
        let from = self
            .account
            .ok_or_else(|| TxError::NetworkError("wallet not connected".to_string()))?;
        let value = request("eth_sendTransaction", send_params(from, write)).await?;
        decode_hash(&value)
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> TxResult<TxReceipt> {
        let interval_ms = self.poll.interval.as_millis().min(u32::MAX as u128) as u32;

        for _ in 0..self.poll.max_attempts() {
            let value = request("eth_getTransactionReceipt", receipt_params(hash)).await?;
            if let Some(receipt) = parse_receipt(&value)? {
                return Ok(receipt);
            }
            TimeoutFuture::new(interval_ms).await;
        }

        Err(TxError::NetworkError(format!(
            "no receipt for {} after {:?}",
            hash, self.poll.timeout
        )))
    }
}

/// JavaScript functions from ethereum.js
#[wasm_bindgen(module = "/src/js/ethereum.js")]
extern "C" {
    #[wasm_bindgen(js_name = "hasProvider")]
    fn has_provider_js() -> bool;

    #[wasm_bindgen(js_name = "ethRequest")]
    fn eth_request_js(method: &str, params_json: &str) -> js_sys::Promise;

    #[wasm_bindgen(js_name = "onAccountsChanged")]
    pub fn on_accounts_changed(callback: &Closure<dyn FnMut(String)>);
}
