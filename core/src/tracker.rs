//! Transaction status state machine.
//!
//! ```text
//!  idle ──begin──▶ pending ──submitted──▶ confirming ──confirmed──▶ success
//!                     │                       │
//!                     └────────fail───────────┴──────────────────▶ error
//!  success | error ──dismiss / next begin──▶ idle
//! ```
//!
//! Illegal events are rejected and leave the state untouched, so `pending` is
//! always visited before `confirming` or `success`.

use alloy_primitives::TxHash;

use crate::action::{ActionKind, TxReceipt};
use crate::error::{TrackerError, TxError};

/// Where a tracked transaction currently is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TxStatus {
    #[default]
    Idle,
    /// Dispatched, waiting for the wallet signature.
    Pending { action: ActionKind },
    /// Signed and broadcast, waiting for a receipt.
    Confirming { action: ActionKind, hash: TxHash },
    Success { action: ActionKind, receipt: TxReceipt },
    Error { action: ActionKind, error: TxError },
}

impl TxStatus {
    pub fn name(&self) -> &'static str {
        match self {
            TxStatus::Idle => "idle",
            TxStatus::Pending { .. } => "pending",
            TxStatus::Confirming { .. } => "confirming",
            TxStatus::Success { .. } => "success",
            TxStatus::Error { .. } => "error",
        }
    }

    /// A write is in flight; the owning button must stay disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self, TxStatus::Pending { .. } | TxStatus::Confirming { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TxStatus::Success { .. } | TxStatus::Error { .. })
    }

    pub fn action(&self) -> Option<ActionKind> {
        match self {
            TxStatus::Idle => None,
            TxStatus::Pending { action }
            | TxStatus::Confirming { action, .. }
            | TxStatus::Success { action, .. }
            | TxStatus::Error { action, .. } => Some(*action),
        }
    }

    pub fn hash(&self) -> Option<TxHash> {
        match self {
            TxStatus::Confirming { hash, .. } => Some(*hash),
            TxStatus::Success { receipt, .. } => Some(receipt.hash),
            _ => None,
        }
    }

    /// Modal text.
    pub fn message(&self) -> &'static str {
        match self {
            TxStatus::Idle => "",
            TxStatus::Pending { .. } => "Check your wallet…",
            TxStatus::Confirming { .. } => "Waiting for confirmation…",
            TxStatus::Success { .. } => "Transaction successful!",
            TxStatus::Error { error, .. } => error.alert(),
        }
    }
}

/// Result of closing the status modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dismissal {
    /// Terminal state cleared back to idle.
    Cleared,
    /// Modal hidden while a transaction is still in flight. The transaction is
    /// not cancelled and will still be tracked to completion.
    StillInFlight { hash: Option<TxHash> },
    /// Nothing to dismiss.
    Noop,
}

impl Dismissal {
    /// Notice shown when the user closes the modal mid-flight.
    pub const IN_FLIGHT_NOTICE: &'static str =
        "Closing this dialog does not cancel the transaction; it will still complete on-chain.";
}

/// Status plus modal visibility for one action button.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusTracker {
    status: TxStatus,
    modal_open: bool,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &TxStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.status.is_busy()
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    /// Clear a terminal state before a new intent. No-op when idle.
    pub fn reset(&mut self) -> Result<(), TrackerError> {
        match self.status {
            TxStatus::Idle => Ok(()),
            TxStatus::Success { .. } | TxStatus::Error { .. } => {
                self.status = TxStatus::Idle;
                self.modal_open = false;
                Ok(())
            }
            _ => Err(self.invalid("reset")),
        }
    }

    /// `idle → pending`.
    pub fn begin(&mut self, action: ActionKind) -> Result<(), TrackerError> {
        match self.status {
            TxStatus::Idle => {
                self.status = TxStatus::Pending { action };
                self.modal_open = true;
                Ok(())
            }
            _ => Err(self.invalid("begin")),
        }
    }

    /// `pending → confirming`.
    pub fn submitted(&mut self, hash: TxHash) -> Result<(), TrackerError> {
        match self.status {
            TxStatus::Pending { action } => {
                self.status = TxStatus::Confirming { action, hash };
                Ok(())
            }
            _ => Err(self.invalid("submitted")),
        }
    }

    /// `confirming → success`, or `confirming → error` for a reverted receipt.
    pub fn confirmed(&mut self, receipt: TxReceipt) -> Result<(), TrackerError> {
        match self.status {
            TxStatus::Confirming { action, .. } => {
                self.status = if receipt.success {
                    TxStatus::Success { action, receipt }
                } else {
                    TxStatus::Error {
                        action,
                        error: TxError::ContractReverted { reason: None },
                    }
                };
                // Outcome is always shown, even after a mid-flight dismiss
                self.modal_open = true;
                Ok(())
            }
            _ => Err(self.invalid("confirmed")),
        }
    }

    /// `pending | confirming → error`.
    pub fn fail(&mut self, error: TxError) -> Result<(), TrackerError> {
        match self.status {
            TxStatus::Pending { action } | TxStatus::Confirming { action, .. } => {
                self.status = TxStatus::Error { action, error };
                self.modal_open = true;
                Ok(())
            }
            _ => Err(self.invalid("fail")),
        }
    }

    /// Close the modal.
    pub fn dismiss(&mut self) -> Dismissal {
        if self.status.is_terminal() {
            self.status = TxStatus::Idle;
            self.modal_open = false;
            return Dismissal::Cleared;
        }
        if self.status.is_busy() {
            self.modal_open = false;
            return Dismissal::StillInFlight { hash: self.status.hash() };
        }
        Dismissal::Noop
    }

    fn invalid(&self, event: &'static str) -> TrackerError {
        TrackerError::InvalidTransition {
            from: self.status.name(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;

    fn receipt(success: bool) -> TxReceipt {
        TxReceipt {
            hash: B256::with_last_byte(1),
            block_number: Some(10),
            gas_used: Some(50_000),
            success,
        }
    }

    #[test]
    fn test_terminal_state_reopens_hidden_modal() {
        let mut t = StatusTracker::new();
        t.begin(ActionKind::ClaimRevenue).unwrap();
        assert!(matches!(t.dismiss(), Dismissal::StillInFlight { .. }));
        t.submitted(B256::with_last_byte(1)).unwrap();
        assert!(!t.modal_open());

        t.confirmed(receipt(true)).unwrap();
        assert!(t.modal_open());

        let mut failed = StatusTracker::new();
        failed.begin(ActionKind::Mint).unwrap();
        failed.dismiss();
        failed.fail(TxError::RejectedByUser).unwrap();
        assert!(failed.modal_open());
    }

    #[test]
    fn test_happy_path() {
        let mut t = StatusTracker::new();
        t.begin(ActionKind::Mint).unwrap();
        assert_eq!(t.status().name(), "pending");
        assert!(t.is_busy());
        assert!(t.modal_open());

        t.submitted(B256::with_last_byte(1)).unwrap();
        assert_eq!(t.status().name(), "confirming");

        t.confirmed(receipt(true)).unwrap();
        assert_eq!(t.status().name(), "success");
        assert_eq!(t.status().message(), "Transaction successful!");
        assert!(!t.is_busy());
    }

    #[test]
    fn test_idle_cannot_skip_pending() {
        let mut t = StatusTracker::new();
        let err = t.submitted(B256::ZERO).unwrap_err();
        assert_eq!(
            err,
            TrackerError::InvalidTransition { from: "idle", event: "submitted" }
        );
        assert!(t.confirmed(receipt(true)).is_err());
        assert!(t.fail(TxError::RejectedByUser).is_err());
        assert_eq!(t.status(), &TxStatus::Idle);
    }

    #[test]
    fn test_pending_cannot_jump_to_success() {
        let mut t = StatusTracker::new();
        t.begin(ActionKind::ClaimRevenue).unwrap();
        assert!(t.confirmed(receipt(true)).is_err());
        assert_eq!(t.status().name(), "pending");
    }

    #[test]
    fn test_busy_rejects_second_begin() {
        let mut t = StatusTracker::new();
        t.begin(ActionKind::DepositRevenue).unwrap();
        assert!(t.begin(ActionKind::DepositRevenue).is_err());
        assert!(t.reset().is_err());
    }

    #[test]
    fn test_rejection_from_pending() {
        let mut t = StatusTracker::new();
        t.begin(ActionKind::ApproveToken).unwrap();
        t.fail(TxError::classify(Some(4001), "User rejected the request.")).unwrap();
        assert_eq!(t.status().message(), crate::error::ALERT_REJECTED);
    }

    #[test]
    fn test_reverted_receipt_is_error() {
        let mut t = StatusTracker::new();
        t.begin(ActionKind::ClaimRevenue).unwrap();
        t.submitted(B256::with_last_byte(1)).unwrap();
        t.confirmed(receipt(false)).unwrap();
        assert!(matches!(
            t.status(),
            TxStatus::Error { error: TxError::ContractReverted { .. }, .. }
        ));
    }

    #[test]
    fn test_terminal_states_return_to_idle() {
        let mut t = StatusTracker::new();
        t.begin(ActionKind::Mint).unwrap();
        t.fail(TxError::InsufficientFunds).unwrap();
        assert_eq!(t.dismiss(), Dismissal::Cleared);
        assert_eq!(t.status(), &TxStatus::Idle);

        t.begin(ActionKind::Mint).unwrap();
        t.fail(TxError::InsufficientFunds).unwrap();
        t.reset().unwrap();
        t.begin(ActionKind::Mint).unwrap();
        assert_eq!(t.status().name(), "pending");
    }

    #[test]
    fn test_dismiss_in_flight_keeps_tracking() {
        let mut t = StatusTracker::new();
        t.begin(ActionKind::Mint).unwrap();
        t.submitted(B256::with_last_byte(9)).unwrap();

        let outcome = t.dismiss();
        assert_eq!(outcome, Dismissal::StillInFlight { hash: Some(B256::with_last_byte(9)) });
        assert!(!t.modal_open());
        assert!(t.is_busy());

        // Confirmation still lands after the modal was closed
        t.confirmed(receipt(true)).unwrap();
        assert_eq!(t.status().name(), "success");
    }

    #[test]
    fn test_dismiss_idle_is_noop() {
        assert_eq!(StatusTracker::new().dismiss(), Dismissal::Noop);
    }
}
