//! FlowMint - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for minting revenue-sharing NFTs, depositing
//! creator revenue and claiming investor shares.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (navigation, wallet connection)                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Routes                                                      │
//! │  ├── /           HomePage (Mint / Creator / Investor panels) │
//! │  ├── /home       ProjectsPage (search, categories, invest)   │
//! │  └── /dashboard  DashboardPage (login, role views, actions)  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every action button owns its own transaction tracker; the contract
//! snapshot is shared and only ever replaced by fresh reads.
//!
//! # Modules
//!
//! - [`types`] - Common types (WalletInfo, TxSlot, AppError)
//! - [`components`] - UI components (Header, panels, pages, StatusModal)
//! - [`services`] - Wallet, contract and backend communication

use flowmint::ContractSnapshot;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Wallet
    WalletInfo,
    // Transactions
    TxSlot,
    // Errors
    AppError, AppResult,
};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application
// =============================================================================

/// Root component, mounted by the `flowmint-frontend` binary.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Global state for the application
    let (wallet_info, set_wallet_info) = create_signal(None::<WalletInfo>);
    let snapshot = create_rw_signal(ContractSnapshot::default());

    // Pick up an already-authorised session
    spawn_local(async move {
        if let Some(info) = services::wallet::restore().await {
            set_wallet_info.set(Some(info));
        }
    });

    // Reload contract reads on start and whenever the account changes
    create_effect(move |_| {
        let wallet = wallet_info.get();
        load_snapshot(wallet, snapshot);
    });

    view! {
        <Title text=APP_NAME/>
        <Router>
            <Header wallet_info=wallet_info set_wallet_info=set_wallet_info/>
            <main>
                <Routes>
                    <Route
                        path="/"
                        view=move || view! { <HomePage wallet_info=wallet_info snapshot=snapshot/> }
                    />
                    <Route
                        path="/home"
                        view=move || view! { <ProjectsPage wallet_info=wallet_info snapshot=snapshot/> }
                    />
                    <Route
                        path="/dashboard"
                        view=move || view! {
                            <DashboardPage
                                wallet_info=wallet_info
                                set_wallet_info=set_wallet_info
                                snapshot=snapshot
                            />
                        }
                    />
                </Routes>
            </main>
            <Footer/>
        </Router>
    }
}
