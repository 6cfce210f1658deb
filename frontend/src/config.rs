//! Application configuration.
//!
//! Values are baked in at compile time. Set `FLOWMINT_*` variables when
//! running `trunk build` to point the app at another deployment; anything
//! unset falls back to the core defaults (Polygon Amoy).

use flowmint::AppConfig;

/// Application name shown in the header and wallet prompts.
pub const APP_NAME: &str = "FlowMint";

/// Placeholder shown for unknown values.
pub const PLACEHOLDER: &str = "—";

fn build_time(key: &str) -> Option<String> {
    let value = match key {
        "FLOWMINT_RPC_URL" => option_env!("FLOWMINT_RPC_URL"),
        "FLOWMINT_API_URL" => option_env!("FLOWMINT_API_URL"),
        "FLOWMINT_DISTRIBUTOR" => option_env!("FLOWMINT_DISTRIBUTOR"),
        "FLOWMINT_NFT" => option_env!("FLOWMINT_NFT"),
        "FLOWMINT_CHAIN_ID" => option_env!("FLOWMINT_CHAIN_ID"),
        _ => None,
    };
    value.map(String::from)
}

/// Configuration for this build.
///
/// Invalid build-time values are logged and replaced by defaults.
pub fn app_config() -> AppConfig {
    AppConfig::from_lookup(build_time).unwrap_or_else(|e| {
        log::error!("❌ Invalid build configuration: {}", e);
        AppConfig::default()
    })
}
