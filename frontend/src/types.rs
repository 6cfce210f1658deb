//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Wallet Types** - Connected account info
//! - **Transaction Types** - Per-button transaction slots
//! - **Error Types** - Frontend error handling

use std::fmt;

use alloy_primitives::Address;
use flowmint::tracker::Dismissal;
use flowmint::{ApiError, StatusTracker, TxError};
use leptos::*;

// =============================================================================
// Wallet Types
// =============================================================================

/// Connected wallet information.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletInfo {
    /// Checksummed account address
    pub address: Address,
    /// Chain the wallet is on
    pub chain_id: u64,
}

impl WalletInfo {
    pub fn short_address(&self) -> String {
        short_address(&self.address.to_string())
    }
}

/// `0x1234...abcd`.
pub fn short_address(addr: &str) -> String {
    if addr.len() <= 10 {
        return addr.to_string();
    }
    format!("{}...{}", &addr[0..6], &addr[addr.len() - 4..])
}

// =============================================================================
// Transaction Types
// =============================================================================

/// Reactive state for one action button: its tracker plus modal bookkeeping.
///
/// The dispatcher owns a working copy of the tracker while a transaction runs
/// and mirrors every transition here through [`TxSlot::observe`].
#[derive(Clone, Copy)]
pub struct TxSlot {
    pub tracker: RwSignal<StatusTracker>,
    /// Closed by the user while the transaction was still in flight.
    pub hidden: RwSignal<bool>,
    /// Inline message (validation failure or in-flight notice).
    pub notice: RwSignal<Option<String>>,
    /// Set from click until the dispatch task returns, including pre-flight reads.
    pub in_flight: RwSignal<bool>,
}

impl TxSlot {
    pub fn new() -> Self {
        Self {
            tracker: create_rw_signal(StatusTracker::new()),
            hidden: create_rw_signal(false),
            notice: create_rw_signal(None),
            in_flight: create_rw_signal(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.get() || self.tracker.with(|t| t.is_busy())
    }

    /// Claim the slot for one dispatch. False when one is already running.
    pub fn try_claim(&self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.in_flight.set(true);
        true
    }

    pub fn release(&self) {
        self.in_flight.set(false);
    }

    /// Mirror a transition from the running dispatch.
    pub fn observe(&self, tracker: &StatusTracker) {
        if tracker.status().name() == "pending" {
            self.hidden.set(false);
            self.notice.set(None);
        }
        self.tracker.set(tracker.clone());
    }

    pub fn modal_visible(&self) -> bool {
        self.tracker
            .with(|t| t.modal_open() && (!self.hidden.get() || t.status().is_terminal()))
    }

    /// Close the modal. In flight, this only hides it.
    pub fn dismiss(&self) {
        let mut outcome = Dismissal::Noop;
        self.tracker.update(|t| outcome = t.dismiss());

        match outcome {
            Dismissal::StillInFlight { hash } => {
                log::info!("Modal closed while {:?} is still in flight", hash);
                self.hidden.set(true);
                self.notice.set(Some(Dismissal::IN_FLIGHT_NOTICE.to_string()));
            }
            Dismissal::Cleared => {
                self.hidden.set(false);
                self.notice.set(None);
            }
            Dismissal::Noop => {}
        }
    }
}

impl Default for TxSlot {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// Unified error type for all frontend operations.
#[derive(Clone, Debug)]
pub enum AppError {
    /// Wallet missing or connection refused.
    Wallet(String),
    /// Provider request failed.
    Transaction(TxError),
    /// Backend request failed.
    Api(ApiError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Wallet(msg) => write!(f, "Wallet error: {}", msg),
            AppError::Transaction(e) => write!(f, "{}", e.alert()),
            AppError::Api(e) => write!(f, "API error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        AppError::Api(e)
    }
}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::TxHash;
    use flowmint::{ActionKind, TxReceipt};

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("0x3a4E9Fa1D8cE4Ee6b75Ef498903eBc8C1E92e507"),
            "0x3a4E...e507"
        );
        assert_eq!(short_address("0x1234"), "0x1234");
    }

    #[test]
    fn test_slot_claimed_once_until_released() {
        let runtime = create_runtime();
        let slot = TxSlot::new();

        assert!(slot.try_claim());
        assert!(slot.is_busy());
        assert!(!slot.try_claim());

        slot.release();
        assert!(!slot.is_busy());
        runtime.dispose();
    }

    #[test]
    fn test_hidden_modal_returns_at_outcome() {
        let runtime = create_runtime();
        let slot = TxSlot::new();
        let mut working = StatusTracker::new();

        working.begin(ActionKind::DepositRevenue).unwrap();
        slot.observe(&working);
        assert!(slot.modal_visible());

        slot.dismiss();
        assert!(!slot.modal_visible());
        assert_eq!(slot.notice.get().as_deref(), Some(Dismissal::IN_FLIGHT_NOTICE));

        working.submitted(TxHash::with_last_byte(7)).unwrap();
        slot.observe(&working);
        assert!(!slot.modal_visible());

        working
            .confirmed(TxReceipt {
                hash: TxHash::with_last_byte(7),
                block_number: Some(1),
                gas_used: None,
                success: true,
            })
            .unwrap();
        slot.observe(&working);
        assert!(slot.modal_visible());
        runtime.dispose();
    }

    #[test]
    fn test_transaction_error_shows_alert() {
        let err = AppError::Transaction(TxError::RejectedByUser);
        assert_eq!(err.to_string(), flowmint::ALERT_REJECTED);
    }
}
