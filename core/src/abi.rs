//! Contract interfaces and ABI presence checks.
//!
//! Calldata is produced with `alloy-sol-types`; the Hardhat artifact shipped
//! with the frontend is parsed into an [`AbiManifest`] so an outdated artifact
//! is caught before any dispatch.

use std::collections::BTreeSet;

use alloy_sol_types::{sol, SolCall};
use serde::Deserialize;
use serde_json::Value;

sol! {
    /// Revenue distributor: mints NFTs and splits deposited USDC across holders.
    interface IRevenueDistributor {
        function mint(string tokenUri) external returns (uint256);
        function depositRevenue(uint256 amount) external;
        function claimRevenue(uint256 tokenId) external;
        function usdcToken() external view returns (address);
        function totalSupply() external view returns (uint256);
        function maxSupply() external view returns (uint256);
        function getClaimableRevenue(uint256 tokenId) external view returns (uint256);
    }

    /// Minimal ERC-20 surface used for the approve/deposit flow.
    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
    }
}

/// Artifact compiled into the binary.
pub const BUNDLED_DISTRIBUTOR_ARTIFACT: &str = include_str!("../abi/RevenueDistributor.json");

/// Bare function name of a call type, e.g. `"depositRevenue"`.
pub fn function_name<C: SolCall>() -> &'static str {
    C::SIGNATURE.split('(').next().unwrap_or(C::SIGNATURE)
}

#[derive(Debug, Deserialize)]
struct AbiEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: Option<String>,
}

/// Function names declared by a contract ABI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbiManifest {
    functions: BTreeSet<String>,
}

impl AbiManifest {
    /// Parse either a Hardhat artifact (`{"abi": [...]}`) or a bare ABI array.
    pub fn from_artifact_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        let abi = match value {
            Value::Object(mut obj) => obj.remove("abi").unwrap_or(Value::Array(Vec::new())),
            other => other,
        };
        let entries: Vec<AbiEntry> = serde_json::from_value(abi)?;

        let functions = entries
            .into_iter()
            .filter(|e| e.kind == "function")
            .filter_map(|e| e.name)
            .collect();
        Ok(Self { functions })
    }

    /// The distributor artifact shipped with this crate.
    pub fn bundled() -> Self {
        Self::from_artifact_json(BUNDLED_DISTRIBUTOR_ARTIFACT).unwrap_or_else(|e| {
            log::error!("Bundled RevenueDistributor artifact is unreadable: {}", e);
            Self::default()
        })
    }

    /// Build from a list of names.
    pub fn from_functions<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            functions: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};

    #[test]
    fn test_bundled_manifest_has_every_distributor_function() {
        let manifest = AbiManifest::bundled();
        for name in [
            "mint",
            "depositRevenue",
            "claimRevenue",
            "usdcToken",
            "totalSupply",
            "maxSupply",
            "getClaimableRevenue",
        ] {
            assert!(manifest.has_function(name), "missing {}", name);
        }
        // Events and the constructor are not functions
        assert!(!manifest.has_function("RevenueDeposited"));
        assert_eq!(manifest.len(), 7);
    }

    #[test]
    fn test_stale_artifact_detected() {
        let stale = r#"{"abi": [
            {"type": "function", "name": "mint", "inputs": [], "outputs": []},
            {"type": "function", "name": "claimRevenue", "inputs": [], "outputs": []}
        ]}"#;
        let manifest = AbiManifest::from_artifact_json(stale).unwrap();
        assert!(manifest.has_function("mint"));
        assert!(!manifest.has_function("depositRevenue"));
    }

    #[test]
    fn test_bare_abi_array() {
        let manifest =
            AbiManifest::from_artifact_json(r#"[{"type": "function", "name": "totalSupply"}]"#).unwrap();
        assert!(manifest.has_function("totalSupply"));
    }

    #[test]
    fn test_function_names_and_selectors() {
        assert_eq!(function_name::<IRevenueDistributor::depositRevenueCall>(), "depositRevenue");
        assert_eq!(function_name::<IERC20::approveCall>(), "approve");
        // approve(address,uint256)
        assert_eq!(IERC20::approveCall::SELECTOR, [0x09, 0x5e, 0xa7, 0xb3]);
        // totalSupply()
        assert_eq!(IRevenueDistributor::totalSupplyCall::SELECTOR, [0x18, 0x16, 0x0d, 0xdd]);
    }

    #[test]
    fn test_approve_calldata_layout() {
        let call = IERC20::approveCall {
            spender: Address::with_last_byte(0xaa),
            amount: U256::from(25_500_000u64),
        };
        let data = call.abi_encode();
        assert_eq!(data.len(), 4 + 32 + 32);
        assert_eq!(&data[..4], &IERC20::approveCall::SELECTOR);
        assert_eq!(data[4 + 31], 0xaa);
        assert_eq!(U256::from_be_slice(&data[36..68]), U256::from(25_500_000u64));
    }
}
