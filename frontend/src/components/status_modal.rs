//! Transaction status modal and inline notices.

use flowmint::TxStatus;
use leptos::*;

use crate::types::{short_address, TxSlot};

fn status_class(status: &TxStatus) -> &'static str {
    match status {
        TxStatus::Idle => "status",
        TxStatus::Pending { .. } => "status status-pending",
        TxStatus::Confirming { .. } => "status status-confirming",
        TxStatus::Success { .. } => "status status-success",
        TxStatus::Error { .. } => "status status-error",
    }
}

#[component]
pub fn StatusModal(slot: TxSlot) -> impl IntoView {
    let on_close = move |_| slot.dismiss();

    view! {
        <Show when=move || slot.modal_visible()>
            <div class="modal-backdrop">
                <div class="modal">
                    {move || {
                        let tracker = slot.tracker.get();
                        let status = tracker.status().clone();
                        let title = status.action().map(|a| a.label()).unwrap_or_default();
                        let hash = status.hash().map(|h| short_address(&h.to_string()));

                        view! {
                            <div class="modal-title">{title}</div>
                            <div class=status_class(&status)>{status.message()}</div>
                            {hash.map(|h| view! { <div class="modal-hash mono">"Tx: " {h}</div> })}
                        }
                    }}
                    <button class="btn btn-secondary" on:click=on_close>
                        {move || if slot.is_busy() { "Hide" } else { "Close" }}
                    </button>
                </div>
            </div>
        </Show>
    }
}

/// Inline message under an action button.
#[component]
pub fn SlotNotice(slot: TxSlot) -> impl IntoView {
    move || {
        slot.notice
            .get()
            .map(|msg| view! { <div class="notice">{msg}</div> })
    }
}
