//! Error types for the FlowMint transaction engine.
//!
//! - [`AmountError`] - user-entered amount parsing
//! - [`TxError`] - wallet/chain failures, classified once at the wallet boundary
//! - [`DispatchError`] - pre-dispatch validation and lifecycle failures
//! - [`TrackerError`] - illegal status transitions
//! - [`ApiError`] - REST backend failures
//! - [`ConfigError`] - invalid configuration values
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use alloy_primitives::U256;
use thiserror::Error;

use crate::amount::{format_units, USDC_DECIMALS};

// =============================================================================
// Amount Errors
// =============================================================================

/// Errors while turning user input into a fixed-point token amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Nothing was entered.
    #[error("Amount is empty")]
    Empty,

    /// Input is not a plain decimal number.
    #[error("Not a decimal number: '{0}'")]
    Malformed(String),

    /// More fractional digits than the token supports.
    #[error("At most {max} decimal places are allowed")]
    TooManyDecimals { max: u8 },

    /// Zero is not a valid amount.
    #[error("Amount must be greater than zero")]
    NotPositive,

    /// Does not fit in 256 bits.
    #[error("Amount is too large")]
    Overflow,
}

// =============================================================================
// Transaction Errors
// =============================================================================

/// Alert shown when the user cancels in the wallet.
pub const ALERT_REJECTED: &str = "Transaction cancelled in your wallet.";

/// Alert shown when the account cannot pay for gas or the transfer.
pub const ALERT_INSUFFICIENT_FUNDS: &str = "Insufficient funds to complete this transaction.";

/// Alert shown for every other failure.
pub const ALERT_GENERIC: &str = "Transaction failed. Please try again.";

/// EIP-1193 "user rejected request" error code.
pub const USER_REJECTED_CODE: i64 = 4001;

/// A wallet or chain failure.
///
/// Built once at the wallet boundary by [`TxError::classify`]; downstream code
/// matches on the variant and never re-parses message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    /// User declined the signature request.
    #[error("Rejected by user")]
    RejectedByUser,

    /// Account balance too low for gas or value.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Transport, node or provider failure.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The contract reverted, either at estimation or on-chain.
    #[error("Contract reverted{}", revert_suffix(.reason))]
    ContractReverted { reason: Option<String> },
}

impl TxError {
    /// Classify a raw provider error by code and message text.
    pub fn classify(code: Option<i64>, message: &str) -> Self {
        // ASCII folding keeps byte offsets aligned with `message`
        let lower = message.to_ascii_lowercase();

        if code == Some(USER_REJECTED_CODE)
            || lower.contains("user rejected")
            || lower.contains("user denied")
        {
            return TxError::RejectedByUser;
        }

        if lower.contains("insufficient funds") {
            return TxError::InsufficientFunds;
        }

        if let Some(idx) = lower.find("execution reverted") {
            let rest = message
                .get(idx + "execution reverted".len()..)
                .unwrap_or_default()
                .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
                .trim();
            let reason = (!rest.is_empty()).then(|| rest.to_string());
            return TxError::ContractReverted { reason };
        }

        TxError::NetworkError(message.to_string())
    }

    /// User-facing alert text (one of three).
    pub fn alert(&self) -> &'static str {
        match self {
            TxError::RejectedByUser => ALERT_REJECTED,
            TxError::InsufficientFunds => ALERT_INSUFFICIENT_FUNDS,
            TxError::NetworkError(_) | TxError::ContractReverted { .. } => ALERT_GENERIC,
        }
    }
}

fn revert_suffix(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(": {}", r)).unwrap_or_default()
}

// =============================================================================
// Dispatch Errors
// =============================================================================

/// Reasons a user intent did not turn into a confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Amount input failed validation.
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// Token id input is not a non-negative integer.
    #[error("Invalid token id: '{0}'")]
    InvalidTokenId(String),

    /// The bundled ABI lacks a function the action needs.
    #[error("ABI is missing function '{function}'")]
    StaleInterface { function: &'static str },

    /// Allowance is below the deposit amount.
    #[error("Allowance {allowance} is below required {required}")]
    ApprovalRequired { required: U256, allowance: U256 },

    /// No account available to sign.
    #[error("Wallet not connected")]
    WalletNotConnected,

    /// The stablecoin address has not been read yet.
    #[error("Token address unknown")]
    TokenAddressUnknown,

    /// Every NFT has been minted.
    #[error("Max supply of {max} reached")]
    SupplyExhausted { max: U256 },

    /// Another transaction is already tracked for this action.
    #[error("A transaction is already in progress")]
    Busy,

    /// A pre-dispatch read failed.
    #[error("Read failed: {0}")]
    Read(TxError),

    /// The write or its confirmation failed.
    #[error("Transaction failed: {0}")]
    Transaction(TxError),
}

impl DispatchError {
    /// Message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            DispatchError::InvalidAmount(_) => "Enter a valid USDC amount.".to_string(),
            DispatchError::InvalidTokenId(_) => "Enter a valid NFT token ID.".to_string(),
            DispatchError::StaleInterface { function } => format!(
                "Your frontend ABI is stale: '{}' is missing. Rebuild and replace RevenueDistributor.json.",
                function
            ),
            DispatchError::ApprovalRequired { required, allowance } => format!(
                "Please approve USDC first: allowance is {} USDC, deposit needs {} USDC.",
                format_units(*allowance, USDC_DECIMALS),
                format_units(*required, USDC_DECIMALS)
            ),
            DispatchError::WalletNotConnected => "Connect your wallet first.".to_string(),
            DispatchError::TokenAddressUnknown => {
                "USDC token address not loaded yet. Try again in a moment.".to_string()
            }
            DispatchError::SupplyExhausted { .. } => "All NFTs have been minted.".to_string(),
            DispatchError::Busy => "A transaction is already in progress.".to_string(),
            DispatchError::Read(e) | DispatchError::Transaction(e) => e.alert().to_string(),
        }
    }
}

// =============================================================================
// Tracker Errors
// =============================================================================

/// Illegal state machine transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("Cannot apply '{event}' while {from}")]
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },
}

// =============================================================================
// API Errors
// =============================================================================

/// Errors from the REST backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request could not be sent.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Non-2xx response.
    #[error("Server error ({status}): {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors while building configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid address for {name}: '{value}'")]
    InvalidAddress { name: &'static str, value: String },

    #[error("Invalid number for {name}: '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for amount parsing.
pub type AmountResult<T> = Result<T, AmountError>;

/// Result type for wallet operations.
pub type TxResult<T> = Result<T, TxError>;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Result type for REST calls.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_user_rejected() {
        let err = TxError::classify(None, "User rejected the request.");
        assert_eq!(err, TxError::RejectedByUser);
        assert_eq!(err.alert(), ALERT_REJECTED);
        assert_ne!(err.alert(), ALERT_GENERIC);
    }

    #[test]
    fn test_classify_by_code() {
        assert_eq!(TxError::classify(Some(4001), "whatever"), TxError::RejectedByUser);
        assert_eq!(
            TxError::classify(Some(-32000), "MetaMask Tx Signature: User denied transaction signature."),
            TxError::RejectedByUser
        );
    }

    #[test]
    fn test_classify_insufficient_funds() {
        let err = TxError::classify(Some(-32000), "insufficient funds for gas * price + value");
        assert_eq!(err, TxError::InsufficientFunds);
        assert_eq!(err.alert(), ALERT_INSUFFICIENT_FUNDS);
    }

    #[test]
    fn test_classify_revert_reason() {
        let err = TxError::classify(Some(3), "execution reverted: Max supply reached");
        assert_eq!(
            err,
            TxError::ContractReverted { reason: Some("Max supply reached".into()) }
        );
        assert_eq!(err.alert(), ALERT_GENERIC);

        let bare = TxError::classify(None, "execution reverted");
        assert_eq!(bare, TxError::ContractReverted { reason: None });
    }

    #[test]
    fn test_classify_revert_reason_after_non_ascii() {
        let err = TxError::classify(None, "İstanbul node: execution reverted: Not owner");
        assert_eq!(err, TxError::ContractReverted { reason: Some("Not owner".into()) });
    }

    #[test]
    fn test_classify_fallback_is_network() {
        let err = TxError::classify(None, "connection refused");
        assert!(matches!(err, TxError::NetworkError(ref m) if m == "connection refused"));
        assert_eq!(err.alert(), ALERT_GENERIC);
    }

    #[test]
    fn test_dispatch_error_conversion() {
        let err: DispatchError = AmountError::NotPositive.into();
        assert!(err.to_string().contains("greater than zero"));
        assert_eq!(err.user_message(), "Enter a valid USDC amount.");
    }

    #[test]
    fn test_approval_message_in_usdc() {
        let err = DispatchError::ApprovalRequired {
            required: U256::from(25_500_000u64),
            allowance: U256::from(10_000_000u64),
        };
        let msg = err.user_message();
        assert!(msg.contains("approve USDC first"));
        assert!(msg.contains("25.5"));
        assert!(msg.contains("10"));
    }
}
