//! Contract reads and tracked writes for the UI.

use alloy_primitives::U256;
use flowmint::{ActionDispatcher, ContractSnapshot, TxIntent};
use leptos::*;

use super::ethereum::BrowserWallet;
use crate::config::app_config;
use crate::types::{TxSlot, WalletInfo};

fn dispatcher(wallet: Option<&WalletInfo>) -> ActionDispatcher<BrowserWallet> {
    let config = app_config();
    let wallet = BrowserWallet::new(wallet.map(|w| w.address), config.poll);
    ActionDispatcher::new(config.contracts, wallet)
}

/// Copy freshly read values into the shared snapshot.
///
/// Claimable revenue is only taken when it belongs to the token currently
/// followed, since the input may have changed while the read was in flight.
pub fn merge_snapshot(current: &mut ContractSnapshot, fresh: &ContractSnapshot) {
    current.total_supply = fresh.total_supply;
    if !fresh.max_supply.is_zero() {
        current.max_supply = fresh.max_supply;
    }
    if fresh.usdc_token.is_some() {
        current.usdc_token = fresh.usdc_token;
    }
    if fresh.allowance.is_some() {
        current.allowance = fresh.allowance;
    }
    if fresh.claim_token_id == current.claim_token_id && fresh.claimable.is_some() {
        current.claimable = fresh.claimable;
    }
}

/// Initial load of every contract read.
pub fn load_snapshot(wallet: Option<WalletInfo>, snapshot: RwSignal<ContractSnapshot>) {
    spawn_local(async move {
        let claim_id = snapshot.with_untracked(|s| s.claim_token_id);
        let fresh = dispatcher(wallet.as_ref()).reader().snapshot(claim_id).await;
        log::info!("📊 Supply {}", fresh.supply_label());
        snapshot.update(|s| merge_snapshot(s, &fresh));
    });
}

/// Follow `token_id` and read its claimable revenue.
pub fn follow_token(token_id: Option<U256>, snapshot: RwSignal<ContractSnapshot>) {
    snapshot.update(|s| {
        s.claim_token_id = token_id;
        s.claimable = None;
    });

    let Some(id) = token_id else {
        return;
    };
    spawn_local(async move {
        match dispatcher(None).reader().claimable(id).await {
            Ok(value) => snapshot.update(|s| {
                if s.claim_token_id == Some(id) {
                    s.claimable = Some(value);
                }
            }),
            Err(e) => log::warn!("Read getClaimableRevenue({}) failed: {}", id, e),
        }
    });
}

/// Run `intent` through the dispatcher, mirroring its lifecycle into `slot`.
pub fn run_intent(
    slot: TxSlot,
    wallet: Option<WalletInfo>,
    intent: TxIntent,
    snapshot: RwSignal<ContractSnapshot>,
) {
    if !slot.try_claim() {
        log::warn!("⚠️ {} already in flight", intent.kind);
        return;
    }
    slot.notice.set(None);

    spawn_local(async move {
        let dispatcher = dispatcher(wallet.as_ref());
        let mut tracker = slot.tracker.get_untracked();
        let mut working = snapshot.get_untracked();

        let result = dispatcher
            .dispatch(&mut tracker, intent, &mut working, |t| slot.observe(t))
            .await;
        slot.release();

        snapshot.update(|s| merge_snapshot(s, &working));

        match result {
            Ok(receipt) => log::info!("✅ Confirmed: {}", receipt.hash),
            Err(e) => {
                log::error!("❌ {}", e);
                // Blocked before dispatch: no modal, show the reason inline
                if !slot.tracker.with_untracked(|t| t.status().is_terminal()) {
                    slot.notice.set(Some(e.user_message()));
                }
            }
        }
    });
}
