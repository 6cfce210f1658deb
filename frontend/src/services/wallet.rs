//! Wallet connection flow: account access and network selection.

use flowmint::rpc::{parse_accounts, parse_quantity};
use serde_json::json;

use super::ethereum::{has_provider, request};
use crate::config::app_config;
use crate::types::{AppError, AppResult, WalletInfo};

/// Ask the provider for account access and make sure we are on the right chain.
pub async fn connect() -> AppResult<WalletInfo> {
    if !has_provider() {
        return Err(AppError::Wallet(
            "No injected wallet found. Please install MetaMask or a compatible extension.".to_string(),
        ));
    }

    log::info!("🔌 Connecting to wallet...");

    let accounts = request("eth_requestAccounts", json!([]))
        .await
        .and_then(|v| parse_accounts(&v))
        .map_err(AppError::Transaction)?;
    let address = accounts
        .first()
        .copied()
        .ok_or_else(|| AppError::Wallet("Wallet returned no accounts".to_string()))?;

    let chain_id = ensure_chain(app_config().contracts.chain_id).await?;

    log::info!("✅ Connected to wallet: {} (chain {})", address, chain_id);
    Ok(WalletInfo { address, chain_id })
}

/// Session already authorised in the extension, without prompting.
pub async fn restore() -> Option<WalletInfo> {
    if !has_provider() {
        return None;
    }
    let accounts = request("eth_accounts", json!([])).await.ok()?;
    let address = parse_accounts(&accounts).ok()?.first().copied()?;
    let chain_id = request("eth_chainId", json!([]))
        .await
        .ok()
        .and_then(|v| parse_quantity(&v))?;

    log::info!("🔁 Restored wallet session: {}", address);
    Some(WalletInfo { address, chain_id })
}

/// Switch to `expected` when the wallet is elsewhere. Returns the final chain id.
pub async fn ensure_chain(expected: u64) -> AppResult<u64> {
    let current = request("eth_chainId", json!([]))
        .await
        .map_err(AppError::Transaction)
        .map(|v| parse_quantity(&v))?
        .ok_or_else(|| AppError::Wallet("Invalid chain id from wallet".to_string()))?;

    if current == expected {
        return Ok(current);
    }

    log::warn!("⚠️ Wallet on chain {}, switching to {}", current, expected);
    request(
        "wallet_switchEthereumChain",
        json!([{ "chainId": format!("{:#x}", expected) }]),
    )
    .await
    .map_err(AppError::Transaction)?;
    Ok(expected)
}
