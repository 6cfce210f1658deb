//! Landing page (`/`): wallet summary and the three action panels.

use flowmint::ContractSnapshot;
use leptos::*;

use super::hero::Hero;
use super::panels::{CreatorPanel, InvestorPanel, MintPanel};
use crate::types::WalletInfo;

#[component]
pub fn HomePage(
    wallet_info: ReadSignal<Option<WalletInfo>>,
    snapshot: RwSignal<ContractSnapshot>,
) -> impl IntoView {
    view! {
        <div class="container">
            <Hero/>

            {move || match wallet_info.get() {
                Some(info) => view! {
                    <div class="panel center">
                        <p class="muted">"Connected as:"</p>
                        <p class="mono">{info.address.to_string()}</p>
                    </div>
                }.into_view(),
                None => view! {
                    <div class="panel center">
                        <p class="muted">"Connect your wallet to interact with smart contracts"</p>
                    </div>
                }.into_view(),
            }}

            <MintPanel wallet_info=wallet_info snapshot=snapshot/>
            <CreatorPanel wallet_info=wallet_info snapshot=snapshot/>
            <InvestorPanel wallet_info=wallet_info snapshot=snapshot/>
        </div>
    }
}
