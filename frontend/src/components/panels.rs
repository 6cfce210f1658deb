//! Blockchain action panels: mint, creator (approve/deposit), investor (claim).
//!
//! Every button owns a [`TxSlot`], so an approval can be confirming while a
//! claim is pending. A button is disabled while its own slot is busy.

use flowmint::amount::parse_token_id;
use flowmint::{AbiManifest, ActionKind, ContractSnapshot, TxIntent};
use leptos::*;

use super::status_modal::{SlotNotice, SlotNoticeProps, StatusModal, StatusModalProps};
use crate::config::{app_config, PLACEHOLDER};
use crate::services::{follow_token, run_intent};
use crate::types::{TxSlot, WalletInfo};

#[component]
pub fn MintPanel(
    wallet_info: ReadSignal<Option<WalletInfo>>,
    snapshot: RwSignal<ContractSnapshot>,
) -> impl IntoView {
    let slot = TxSlot::new();

    let on_mint = move |_| {
        run_intent(slot, wallet_info.get_untracked(), TxIntent::mint(), snapshot);
    };

    let disabled = move || {
        wallet_info.get().is_none() || slot.is_busy() || snapshot.with(|s| s.is_sold_out())
    };

    view! {
        <section class="panel">
            <h2 class="panel-title">"Invest in a Creator"</h2>
            <div class="panel-row">
                <span>"NFTs Minted:"</span>
                <strong>{move || snapshot.with(|s| s.supply_label())}</strong>
            </div>
            <button class="btn btn-success" on:click=on_mint disabled=disabled>
                {move || if snapshot.with(|s| s.is_sold_out()) { "Sold out" } else { "Mint NFT (demo: free)" }}
            </button>
            {SlotNotice(SlotNoticeProps { slot: slot })}
            {StatusModal(StatusModalProps { slot: slot })}
        </section>
    }
}

#[component]
pub fn CreatorPanel(
    wallet_info: ReadSignal<Option<WalletInfo>>,
    snapshot: RwSignal<ContractSnapshot>,
) -> impl IntoView {
    let approve_slot = TxSlot::new();
    let deposit_slot = TxSlot::new();
    let (amount, set_amount) = create_signal(String::new());
    let has_deposit = AbiManifest::bundled().has_function(ActionKind::DepositRevenue.function());

    if !has_deposit {
        log::error!("ABI missing depositRevenue. Replace RevenueDistributor.json with the freshly compiled artifact.");
    }

    let on_approve = move |_| {
        run_intent(approve_slot, wallet_info.get_untracked(), TxIntent::approve(amount.get_untracked()), snapshot);
    };
    let on_deposit = move |_| {
        run_intent(deposit_slot, wallet_info.get_untracked(), TxIntent::deposit(amount.get_untracked()), snapshot);
    };

    let base_disabled = move || wallet_info.get().is_none() || amount.with(|a| a.trim().is_empty());
    let allowance_label = move || {
        let decimals = app_config().contracts.token_decimals;
        snapshot.with(|s| {
            s.allowance
                .map(|a| format!("{} USDC", flowmint::format_units(a, decimals)))
                .unwrap_or_else(|| PLACEHOLDER.to_string())
        })
    };

    view! {
        <section class="panel">
            <h2 class="panel-title">"For Creators (USDC)"</h2>
            {(!has_deposit).then(|| view! {
                <div class="alert alert-error">
                    "ABI missing " <code>"depositRevenue"</code> ". Replace "
                    <code>"RevenueDistributor.json"</code> " with the latest artifact."
                </div>
            })}
            <div class="panel-meta">
                "USDC token: "
                <span class="mono">
                    {move || snapshot.with(|s| s.usdc_token.map(|a| a.to_string()).unwrap_or_else(|| PLACEHOLDER.to_string()))}
                </span>
            </div>
            <div class="panel-meta">"Allowance: " {allowance_label}</div>
            <input
                type="text"
                inputmode="decimal"
                placeholder="Enter revenue amount in USDC (e.g., 25.5)"
                prop:value=amount
                on:input=move |ev| set_amount.set(event_target_value(&ev))
            />
            <div class="button-row">
                <button
                    class="btn btn-primary"
                    on:click=on_approve
                    disabled=move || base_disabled() || approve_slot.is_busy()
                >
                    {ActionKind::ApproveToken.label()}
                </button>
                <button
                    class="btn btn-warning"
                    on:click=on_deposit
                    disabled=move || base_disabled() || deposit_slot.is_busy() || !has_deposit
                >
                    {ActionKind::DepositRevenue.label()}
                </button>
            </div>
            {SlotNotice(SlotNoticeProps { slot: approve_slot })}
            {SlotNotice(SlotNoticeProps { slot: deposit_slot })}
            {StatusModal(StatusModalProps { slot: approve_slot })}
            {StatusModal(StatusModalProps { slot: deposit_slot })}
        </section>
    }
}

#[component]
pub fn InvestorPanel(
    wallet_info: ReadSignal<Option<WalletInfo>>,
    snapshot: RwSignal<ContractSnapshot>,
) -> impl IntoView {
    let slot = TxSlot::new();
    let (token_id, set_token_id) = create_signal(String::new());

    let on_input = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        follow_token(parse_token_id(&value), snapshot);
        set_token_id.set(value);
    };

    let on_claim = move |_| {
        run_intent(slot, wallet_info.get_untracked(), TxIntent::claim(token_id.get_untracked()), snapshot);
    };

    let claimable = move || {
        let decimals = app_config().contracts.token_decimals;
        snapshot.with(|s| s.claimable_label(decimals))
    };

    view! {
        <section class="panel">
            <h2 class="panel-title">"For Investors"</h2>
            <input
                type="text"
                inputmode="numeric"
                placeholder="Enter your NFT Token ID to claim"
                prop:value=token_id
                on:input=on_input
            />
            {move || claimable().map(|c| view! {
                <p class="claimable">"You can claim: " <strong>{c}</strong></p>
            })}
            <button
                class="btn btn-teal"
                on:click=on_claim
                disabled=move || wallet_info.get().is_none() || slot.is_busy() || token_id.with(|t| t.trim().is_empty())
            >
                {ActionKind::ClaimRevenue.label()}
            </button>
            {SlotNotice(SlotNoticeProps { slot: slot })}
            {StatusModal(StatusModalProps { slot: slot })}
        </section>
    }
}
