//! REST API module.
//!
//! Types for the FlowMint backend (projects, users, dashboards) and, on
//! native targets, a reqwest client for it.

pub mod types;

#[cfg(feature = "native")]
pub mod client;

pub use types::*;

#[cfg(feature = "native")]
pub use client::ApiClient;
