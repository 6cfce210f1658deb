//! Injected configuration.
//!
//! Contract addresses and endpoints are carried in explicit structs handed to
//! the dispatcher and clients at construction; nothing reads globals.

use std::time::Duration;

use alloy_primitives::{address, Address};

use crate::error::ConfigError;

/// Polygon Amoy testnet.
pub const DEFAULT_CHAIN_ID: u64 = 80002;

/// Deployed `RevenueDistributor`.
pub const DEFAULT_DISTRIBUTOR: Address = address!("3a4E9Fa1D8cE4Ee6b75Ef498903eBc8C1E92e507");

/// Deployed `FlowMintNFT`.
pub const DEFAULT_NFT: Address = address!("417D69F9E27e2184AC89C6Ef4206242E65A685FD");

/// Public Amoy RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "https://rpc-amoy.polygon.technology";

/// FlowMint REST backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Metadata URI prefix for newly minted tokens.
pub const DEFAULT_TOKEN_URI_BASE: &str = "https://example.com/nft";

/// On-chain contract coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractConfig {
    /// `RevenueDistributor` (mint, deposit, claim, supply reads).
    pub distributor_address: Address,
    /// `FlowMintNFT` collection.
    pub nft_address: Address,
    /// Chain the contracts are deployed on.
    pub chain_id: u64,
    /// Stablecoin decimals.
    pub token_decimals: u8,
    /// Prefix for `mint` token URIs.
    pub token_uri_base: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            distributor_address: DEFAULT_DISTRIBUTOR,
            nft_address: DEFAULT_NFT,
            chain_id: DEFAULT_CHAIN_ID,
            token_decimals: crate::amount::USDC_DECIMALS,
            token_uri_base: DEFAULT_TOKEN_URI_BASE.to_string(),
        }
    }
}

impl ContractConfig {
    /// Token URI for the NFT minted after `total_supply` existing ones.
    pub fn token_uri(&self, next_id: impl std::fmt::Display) -> String {
        format!("{}/{}.json", self.token_uri_base.trim_end_matches('/'), next_id)
    }

    /// Set the distributor address.
    pub fn with_distributor(mut self, address: Address) -> Self {
        self.distributor_address = address;
        self
    }
}

/// Receipt polling cadence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            timeout: Duration::from_secs(180),
        }
    }
}

impl PollConfig {
    /// Number of polls that fit in the timeout (at least one).
    pub fn max_attempts(&self) -> u32 {
        let interval = self.interval.as_millis().max(1);
        ((self.timeout.as_millis() / interval) as u32).max(1)
    }
}

/// Full client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub contracts: ContractConfig,
    pub rpc_url: String,
    pub api_url: String,
    pub poll: PollConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            contracts: ContractConfig::default(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            poll: PollConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build from a key lookup, falling back to defaults for absent keys.
    ///
    /// Keys: `FLOWMINT_RPC_URL`, `FLOWMINT_API_URL`, `FLOWMINT_DISTRIBUTOR`,
    /// `FLOWMINT_NFT`, `FLOWMINT_CHAIN_ID`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("FLOWMINT_RPC_URL") {
            config.rpc_url = url;
        }
        if let Some(url) = lookup("FLOWMINT_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(value) = lookup("FLOWMINT_DISTRIBUTOR") {
            config.contracts.distributor_address = parse_address("FLOWMINT_DISTRIBUTOR", &value)?;
        }
        if let Some(value) = lookup("FLOWMINT_NFT") {
            config.contracts.nft_address = parse_address("FLOWMINT_NFT", &value)?;
        }
        if let Some(value) = lookup("FLOWMINT_CHAIN_ID") {
            config.contracts.chain_id = value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                name: "FLOWMINT_CHAIN_ID",
                value: value.clone(),
            })?;
        }

        Ok(config)
    }

    /// Build from the process environment, loading `.env` first if present.
    #[cfg(feature = "native")]
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn parse_address(name: &'static str, value: &str) -> Result<Address, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidAddress {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_target_amoy() {
        let config = AppConfig::default();
        assert_eq!(config.contracts.chain_id, 80002);
        assert_eq!(config.contracts.distributor_address, DEFAULT_DISTRIBUTOR);
        assert_eq!(config.contracts.token_decimals, 6);
    }

    #[test]
    fn test_lookup_overrides() {
        let env: HashMap<&str, &str> = [
            ("FLOWMINT_API_URL", "http://api.local/"),
            ("FLOWMINT_CHAIN_ID", "31337"),
            ("FLOWMINT_NFT", "0x0000000000000000000000000000000000000001"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.api_url, "http://api.local");
        assert_eq!(config.contracts.chain_id, 31337);
        assert_eq!(config.contracts.nft_address, Address::with_last_byte(1));
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
    }

    #[test]
    fn test_lookup_rejects_bad_values() {
        let err = AppConfig::from_lookup(|k| (k == "FLOWMINT_DISTRIBUTOR").then(|| "0xnope".to_string()));
        assert!(matches!(err, Err(ConfigError::InvalidAddress { name: "FLOWMINT_DISTRIBUTOR", .. })));

        let err = AppConfig::from_lookup(|k| (k == "FLOWMINT_CHAIN_ID").then(|| "amoy".to_string()));
        assert!(matches!(err, Err(ConfigError::InvalidNumber { .. })));
    }

    #[test]
    fn test_token_uri() {
        let config = ContractConfig::default();
        assert_eq!(config.token_uri(4), "https://example.com/nft/4.json");
    }

    #[test]
    fn test_poll_attempts() {
        let poll = PollConfig {
            interval: Duration::from_millis(500),
            timeout: Duration::from_secs(3),
        };
        assert_eq!(poll.max_attempts(), 6);
    }
}
