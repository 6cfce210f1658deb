//! # FlowMint - Revenue-sharing NFT client
//!
//! Creators tokenize future revenue as NFTs; investors mint them and claim a
//! share of the USDC revenue deposited into the `RevenueDistributor`.
//! This crate holds everything shared by the CLI and the web frontend.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  TxIntent   │────▶│ Dispatcher  │────▶│   Wallet    │────▶│   Receipt   │
//! │ (UI / CLI)  │     │ (validate)  │     │ (EIP-1193)  │     │  (polled)   │
//! └─────────────┘     └──────┬──────┘     └─────────────┘     └──────┬──────┘
//!                            │                                       │
//!                            ▼                                       ▼
//!                     ┌─────────────┐                         ┌─────────────┐
//!                     │   Tracker   │◀────────────────────────│  Refresher  │
//!                     │   (FSM)     │                         │ (re-reads)  │
//!                     └─────────────┘                         └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flowmint::{ActionDispatcher, AppConfig, HttpRpcWallet, StatusTracker, TxIntent};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::from_env().unwrap();
//!     let wallet = HttpRpcWallet::connect(&config.rpc_url, config.poll).await.unwrap();
//!     let dispatcher = ActionDispatcher::new(config.contracts, wallet);
//!
//!     let mut snapshot = dispatcher.reader().snapshot(None).await;
//!     let mut tracker = StatusTracker::new();
//!     dispatcher
//!         .dispatch(&mut tracker, TxIntent::mint(), &mut snapshot, |t| println!("{}", t.status().name()))
//!         .await
//!         .unwrap();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types and wallet error classification
//! - [`amount`] - Decimal string ↔ fixed-point token amounts
//! - [`config`] - Contract addresses, endpoints, polling
//! - [`abi`] - Contract bindings and the bundled ABI manifest
//! - [`action`] - Action kinds, intents, read/write requests
//! - [`wallet`] - The wallet boundary trait
//! - [`tracker`] - Transaction status state machine
//! - [`reads`] - Contract reads and the post-confirmation refresher
//! - [`dispatcher`] - Intent validation and lifecycle driving
//! - [`rpc`] - JSON-RPC payloads (and an HTTP wallet on native targets)
//! - [`api`] - REST backend types (and client on native targets)

// Core modules
pub mod error;
pub mod amount;
pub mod config;

// Contracts
pub mod abi;
pub mod action;
pub mod wallet;
pub mod rpc;

// Transaction lifecycle
pub mod tracker;
pub mod reads;
pub mod dispatcher;

// REST API
pub mod api;

// CLI logging
#[cfg(feature = "native")]
pub mod logging;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    AmountError,
    TxError,
    DispatchError,
    TrackerError,
    ApiError,
    ConfigError,
    ALERT_REJECTED,
    ALERT_INSUFFICIENT_FUNDS,
    ALERT_GENERIC,
};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{AppConfig, ContractConfig, PollConfig};

// =============================================================================
// Re-exports - Amounts
// =============================================================================

pub use amount::{parse_units, format_units, UsdcAmount, USDC_DECIMALS};

// =============================================================================
// Re-exports - Actions and lifecycle
// =============================================================================

pub use action::{ActionKind, TxIntent, ReadRequest, WriteRequest, TxReceipt};
pub use abi::AbiManifest;
pub use wallet::WalletClient;
pub use tracker::{StatusTracker, TxStatus, Dismissal};
pub use reads::{ContractReader, ContractSnapshot, RefreshReport};
pub use dispatcher::ActionDispatcher;

// =============================================================================
// Re-exports - Native clients
// =============================================================================

#[cfg(feature = "native")]
pub use rpc::HttpRpcWallet;

#[cfg(feature = "native")]
pub use api::ApiClient;
