//! Browser entry point, built by trunk through `data-bin="flowmint-frontend"`.
//!
//! This is the only place the app is mounted.

use frontend_rust::App;
use leptos::*;

pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 FlowMint - mounting app");
    mount_to_body(|| view! { <App/> })
}
