//! Wallet, contract and backend services.
//!
//! # Services
//!
//! - [`ethereum`] - EIP-1193 provider bridge and `BrowserWallet`
//! - [`wallet`] - Connection flow (accounts, chain switch)
//! - [`actions`] - Contract reads and tracked writes
//! - [`api`] - FlowMint REST backend
//!
//! # JavaScript Bindings
//!
//! `src/js/ethereum.js` wraps `window.ethereum.request`.

pub mod ethereum;
pub mod wallet;
pub mod actions;
pub mod api;

pub use ethereum::BrowserWallet;
pub use actions::{follow_token, load_snapshot, run_intent};
