//! JSON-RPC over HTTP, signing with a node-managed account.
//!
//! Meant for local dev nodes (Hardhat, Anvil) or any endpoint that exposes
//! `eth_sendTransaction` for an unlocked account.

use std::sync::atomic::{AtomicU64, Ordering};

use alloy_primitives::{Address, Bytes, TxHash};
use serde_json::{json, Value};

use super::{
    call_params, decode_bytes, decode_hash, parse_accounts, parse_quantity, parse_receipt,
    parse_response, receipt_params, request_body, send_params,
};
use crate::action::{ReadRequest, TxReceipt, WriteRequest};
use crate::config::PollConfig;
use crate::error::{TxError, TxResult};
use crate::wallet::WalletClient;

/// HTTP JSON-RPC wallet.
pub struct HttpRpcWallet {
    client: reqwest::Client,
    url: String,
    account: Option<Address>,
    poll: PollConfig,
    next_id: AtomicU64,
}

impl HttpRpcWallet {
    /// Read-only client with no signing account.
    pub fn new(url: impl Into<String>, poll: PollConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            account: None,
            poll,
            next_id: AtomicU64::new(1),
        }
    }

    /// Use the first account the node manages.
    pub async fn connect(url: impl Into<String>, poll: PollConfig) -> TxResult<Self> {
        let mut wallet = Self::new(url, poll);
        let accounts = parse_accounts(&wallet.request("eth_accounts", json!([])).await?)?;
        wallet.account = accounts.first().copied();

        match wallet.account {
            Some(account) => log::info!("Using node account {}", account),
            None => log::warn!("Node at {} manages no accounts; writes will fail", wallet.url),
        }
        Ok(wallet)
    }

    /// Sign with an explicit account.
    pub fn with_account(mut self, account: Address) -> Self {
        self.account = Some(account);
        self
    }

    pub async fn chain_id(&self) -> TxResult<u64> {
        let value = self.request("eth_chainId", json!([])).await?;
        parse_quantity(&value).ok_or_else(|| TxError::NetworkError(format!("invalid chain id: {}", value)))
    }

    async fn request(&self, method: &str, params: Value) -> TxResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        log::debug!("-> {} #{}", method, id);

        let response = self
            .client
            .post(&self.url)
            .json(&request_body(id, method, params))
            .send()
            .await
            .map_err(|e| TxError::NetworkError(format!("{} failed: {}", method, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TxError::NetworkError(format!("RPC HTTP {}: {}", status, text)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TxError::NetworkError(format!("invalid JSON from {}: {}", method, e)))?;
        parse_response(body)
    }
}

impl WalletClient for HttpRpcWallet {
    fn account(&self) -> Option<Address> {
        self.account
    }

    async fn call(&self, request: &ReadRequest) -> TxResult<Bytes> {
        let value = self.request("eth_call", call_params(request)).await?;
        decode_bytes(&value)
    }

    async fn send_transaction(&self, request: &WriteRequest) -> TxResult<TxHash> {
        let from = self
            .account
            .ok_or_else(|| TxError::NetworkError("no signing account".to_string()))?;
        let value = self.request("eth_sendTransaction", send_params(from, request)).await?;
        decode_hash(&value)
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> TxResult<TxReceipt> {
        for attempt in 1..=self.poll.max_attempts() {
            let value = self
                .request("eth_getTransactionReceipt", receipt_params(hash))
                .await?;
            if let Some(receipt) = parse_receipt(&value)? {
                return Ok(receipt);
            }
            log::debug!("Receipt for {} not yet available (attempt {})", hash, attempt);
            tokio::time::sleep(self.poll.interval).await;
        }

        Err(TxError::NetworkError(format!(
            "no receipt for {} after {:?}",
            hash, self.poll.timeout
        )))
    }
}
