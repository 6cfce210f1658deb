//! User intents and the outbound requests they become.

use std::fmt;

use alloy_primitives::{Address, Bytes, TxHash};
use serde::{Deserialize, Serialize};

/// The four contract writes a user can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Mint,
    ApproveToken,
    DepositRevenue,
    ClaimRevenue,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Mint,
        ActionKind::ApproveToken,
        ActionKind::DepositRevenue,
        ActionKind::ClaimRevenue,
    ];

    /// Gas ceiling sent with the write.
    pub fn gas_limit(&self) -> u64 {
        match self {
            ActionKind::Mint => 500_000,
            ActionKind::ApproveToken => 100_000,
            ActionKind::DepositRevenue => 300_000,
            ActionKind::ClaimRevenue => 200_000,
        }
    }

    /// Contract function invoked.
    pub fn function(&self) -> &'static str {
        match self {
            ActionKind::Mint => "mint",
            ActionKind::ApproveToken => "approve",
            ActionKind::DepositRevenue => "depositRevenue",
            ActionKind::ClaimRevenue => "claimRevenue",
        }
    }

    /// Whether the function lives on the distributor (and so in its ABI artifact).
    pub fn targets_distributor(&self) -> bool {
        !matches!(self, ActionKind::ApproveToken)
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Mint => "Mint NFT",
            ActionKind::ApproveToken => "Approve USDC",
            ActionKind::DepositRevenue => "Deposit Revenue",
            ActionKind::ClaimRevenue => "Claim Your Share",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function())
    }
}

/// A button press: action plus whatever the user typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxIntent {
    pub kind: ActionKind,
    /// Decimal amount (approve, deposit), token id (claim), ignored for mint.
    pub input: String,
}

impl TxIntent {
    pub fn mint() -> Self {
        Self { kind: ActionKind::Mint, input: String::new() }
    }

    pub fn approve(amount: impl Into<String>) -> Self {
        Self { kind: ActionKind::ApproveToken, input: amount.into() }
    }

    pub fn deposit(amount: impl Into<String>) -> Self {
        Self { kind: ActionKind::DepositRevenue, input: amount.into() }
    }

    pub fn claim(token_id: impl Into<String>) -> Self {
        Self { kind: ActionKind::ClaimRevenue, input: token_id.into() }
    }
}

/// A view call: `{address, function, calldata}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadRequest {
    pub to: Address,
    pub function: &'static str,
    pub calldata: Bytes,
}

/// A state-changing call: `{address, function, calldata, gas}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteRequest {
    pub to: Address,
    pub function: &'static str,
    pub calldata: Bytes,
    pub gas_limit: u64,
}

/// Terminal confirmation of a mined transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: Option<u64>,
    /// `false` when the transaction was mined but reverted.
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_ceilings() {
        assert_eq!(ActionKind::Mint.gas_limit(), 500_000);
        assert_eq!(ActionKind::ApproveToken.gas_limit(), 100_000);
        assert_eq!(ActionKind::DepositRevenue.gas_limit(), 300_000);
        assert_eq!(ActionKind::ClaimRevenue.gas_limit(), 200_000);
    }

    #[test]
    fn test_only_approve_targets_token() {
        let on_token: Vec<_> = ActionKind::ALL.iter().filter(|k| !k.targets_distributor()).collect();
        assert_eq!(on_token, vec![&ActionKind::ApproveToken]);
    }

    #[test]
    fn test_kind_serde_names() {
        let json = serde_json::to_string(&ActionKind::DepositRevenue).unwrap();
        assert_eq!(json, "\"depositRevenue\"");
    }
}
