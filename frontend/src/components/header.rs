use alloy_primitives::Address;
use leptos::*;
use leptos_router::A;
use wasm_bindgen::prelude::*;

use crate::config::{app_config, APP_NAME};
use crate::services::ethereum::on_accounts_changed;
use crate::services::wallet;
use crate::types::WalletInfo;

#[component]
pub fn Header(
    wallet_info: ReadSignal<Option<WalletInfo>>,
    set_wallet_info: WriteSignal<Option<WalletInfo>>,
) -> impl IntoView {
    let (error, set_error) = create_signal(None::<String>);
    let expected_chain = app_config().contracts.chain_id;

    // Follow account switches in the extension
    let listener = Closure::<dyn FnMut(String)>::new(move |accounts: String| {
        let first = serde_json::from_str::<Vec<String>>(&accounts)
            .ok()
            .and_then(|list| list.into_iter().next())
            .and_then(|a| a.parse::<Address>().ok());
        match first {
            Some(address) => {
                log::info!("🔁 Account changed: {}", address);
                set_wallet_info.update(|w| {
                    if let Some(info) = w {
                        info.address = address;
                    }
                });
            }
            None => {
                log::info!("🔌 Wallet disconnected");
                set_wallet_info.set(None);
            }
        }
    });
    on_accounts_changed(&listener);
    listener.forget();

    // Connect on click; no-op once connected
    let on_wallet_click = move |_| {
        if wallet_info.get().is_some() {
            return;
        }
        log::info!("🔑 Attempting to connect wallet...");
        set_error.set(None);

        spawn_local(async move {
            match wallet::connect().await {
                Ok(info) => set_wallet_info.set(Some(info)),
                Err(e) => {
                    log::error!("❌ Wallet connection failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <header>
            <div class="header-left">
                <A href="/" class="logo">{APP_NAME}</A>
                <nav class="nav-links">
                    <A href="/home" class="nav-link">"Browse Projects"</A>
                    <A href="/dashboard" class="nav-link">"Dashboard"</A>
                </nav>
            </div>
            <div class="header-right">
                {move || {
                    wallet_info
                        .get()
                        .filter(|w| w.chain_id != expected_chain)
                        .map(|w| view! {
                            <span class="badge badge-warning">
                                {format!("Wrong network ({})", w.chain_id)}
                            </span>
                        })
                }}
                <div
                    class="wallet-status"
                    class:connected=move || wallet_info.get().is_some()
                    on:click=on_wallet_click
                    style="cursor: pointer;"
                >
                    <span class="wallet-dot" class:connected=move || wallet_info.get().is_some()></span>
                    <span id="walletText">
                        {move || match wallet_info.get() {
                            Some(info) => info.short_address(),
                            None => "Connect Wallet".to_string(),
                        }}
                    </span>
                </div>
                {move || error.get().map(|e| view! { <span class="wallet-error">{e}</span> })}
            </div>
        </header>
    }
}
