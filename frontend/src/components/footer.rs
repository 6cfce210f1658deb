//! Footer component

use leptos::*;

use crate::config::app_config;

#[component]
pub fn Footer() -> impl IntoView {
    let contracts = app_config().contracts;

    view! {
        <footer>
            <div>"FlowMint • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-links">
                <span class="footer-link mono" title="RevenueDistributor">
                    {contracts.distributor_address.to_string()}
                </span>
                <span class="footer-link mono" title="FlowMintNFT">
                    {contracts.nft_address.to_string()}
                </span>
                <span class="footer-link">{format!("Chain {}", contracts.chain_id)}</span>
            </div>
        </footer>
    }
}
