//! FlowMint CLI - Revenue-sharing NFTs from the terminal
//!
//! # Contract Commands
//!
//! ```bash
//! flowmint status --token-id 1       # Supply, USDC token, claimable revenue
//! flowmint mint                      # Mint the next revenue-sharing NFT
//! flowmint approve 100               # Approve the distributor to pull 100 USDC
//! flowmint deposit 25.5              # Deposit revenue for holders
//! flowmint claim 1                   # Claim revenue accrued to token #1
//! ```
//!
//! # Backend Commands
//!
//! ```bash
//! flowmint projects --category music # Browse projects
//! flowmint dashboard creator 3       # Creator or investor dashboard
//! flowmint register investor         # Register the node account
//! flowmint user 0xabc...             # Look up a user by wallet
//! ```
//!
//! Configuration comes from `FLOWMINT_*` environment variables (or `.env`).

use alloy_primitives::{Address, U256};
use clap::{Parser, Subcommand};
use flowmint::{
    amount::parse_token_id,
    api::{found_label, format_usd, ApiClient, Dashboard, ProjectFilter, RegisterRequest, UserRole},
    logging, ActionDispatcher, AppConfig, ContractSnapshot, HttpRpcWallet, StatusTracker,
    TxIntent, TxStatus, WalletClient,
};

#[derive(Parser)]
#[command(name = "flowmint")]
#[command(about = "Tokenize future revenue with revenue-sharing NFTs", long_about = None)]
struct Cli {
    /// Override the RevenueDistributor address
    #[arg(long, global = true)]
    distributor: Option<String>,

    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show contract state
    Status {
        /// Token whose claimable revenue to show
        #[arg(short, long)]
        token_id: Option<String>,
    },

    /// Mint the next NFT
    Mint,

    /// Approve the distributor to spend USDC
    Approve {
        /// Amount in USDC (e.g. 100 or 25.5)
        amount: String,
    },

    /// Deposit USDC revenue into the distributor
    Deposit {
        /// Amount in USDC
        amount: String,
    },

    /// Claim revenue for a token
    Claim {
        /// Token id
        token_id: String,
    },

    /// List projects
    Projects {
        /// Filter by name or description
        #[arg(short, long, default_value = "")]
        search: String,

        /// all, art, music, tech or gaming
        #[arg(short, long, default_value = "all")]
        category: String,
    },

    /// Show a dashboard
    Dashboard {
        /// creator or investor
        role: UserRole,
        /// User id (or wallet address)
        id: String,
    },

    /// Register the node account with the backend
    Register {
        /// creator or investor
        role: UserRole,

        /// Wallet to register (default: node account)
        #[arg(short, long)]
        wallet: Option<String>,
    },

    /// Look up a user by wallet address
    User {
        wallet: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match load_config(cli.distributor.as_deref()) {
        Ok(config) => run(cli.command, config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(distributor: Option<&str>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config = AppConfig::from_env()?;
    if let Some(value) = distributor {
        let address: Address = value
            .trim()
            .parse()
            .map_err(|_| format!("invalid --distributor address '{}'", value))?;
        config.contracts = config.contracts.with_distributor(address);
    }
    Ok(config)
}

async fn run(command: Commands, config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Status { token_id } => cmd_status(config, token_id.as_deref()).await,
        Commands::Mint => cmd_transact(config, TxIntent::mint(), None).await,
        Commands::Approve { amount } => cmd_transact(config, TxIntent::approve(amount), None).await,
        Commands::Deposit { amount } => cmd_transact(config, TxIntent::deposit(amount), None).await,
        Commands::Claim { token_id } => {
            let followed = parse_token_id(&token_id);
            cmd_transact(config, TxIntent::claim(token_id), followed).await
        }
        Commands::Projects { search, category } => cmd_projects(config, search, category).await,
        Commands::Dashboard { role, id } => cmd_dashboard(config, role, &id).await,
        Commands::Register { role, wallet } => cmd_register(config, role, wallet).await,
        Commands::User { wallet } => cmd_user(config, &wallet).await,
    }
}

async fn connect(config: &AppConfig) -> Result<HttpRpcWallet, Box<dyn std::error::Error>> {
    let wallet = HttpRpcWallet::connect(&config.rpc_url, config.poll).await?;
    match wallet.chain_id().await {
        Ok(id) if id != config.contracts.chain_id => log::warn!(
            "Node is on chain {}, contracts are configured for chain {}",
            id,
            config.contracts.chain_id
        ),
        Ok(_) => {}
        Err(e) => log::warn!("Could not read chain id: {}", e),
    }
    Ok(wallet)
}

async fn cmd_status(config: AppConfig, token_id: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let claim_id = match token_id {
        Some(raw) => Some(parse_token_id(raw).ok_or_else(|| format!("invalid token id '{}'", raw))?),
        None => None,
    };

    eprintln!("🔗 RPC: {}", config.rpc_url);
    let wallet = connect(&config).await?;
    let dispatcher = ActionDispatcher::new(config.contracts.clone(), wallet);
    let snapshot = dispatcher.reader().snapshot(claim_id).await;

    print_snapshot(&dispatcher, &snapshot);
    Ok(())
}

fn print_snapshot(dispatcher: &ActionDispatcher<HttpRpcWallet>, snapshot: &ContractSnapshot) {
    let contracts = dispatcher.config();
    eprintln!("📊 Contracts (chain {})", contracts.chain_id);
    eprintln!("   Distributor: {}", contracts.distributor_address);
    eprintln!("   NFT: {}", contracts.nft_address);
    eprintln!(
        "   USDC: {}",
        snapshot.usdc_token.map(|a| a.to_string()).unwrap_or_else(|| "unknown".to_string())
    );
    eprintln!("   Supply: {}", snapshot.supply_label());
    if snapshot.is_sold_out() {
        eprintln!("   ⚠️ Sold out");
    }

    if let Some(account) = dispatcher.wallet().account() {
        eprintln!("👛 Account: {}", account);
        if let Some(allowance) = snapshot.allowance {
            eprintln!(
                "   Allowance: {} USDC",
                flowmint::amount::format_units(allowance, contracts.token_decimals)
            );
        }
    }

    if let (Some(id), Some(label)) = (snapshot.claim_token_id, snapshot.claimable_label(contracts.token_decimals)) {
        eprintln!("💰 Claimable for #{}: {}", id, label);
    }
}

async fn cmd_transact(
    config: AppConfig,
    intent: TxIntent,
    follow_token: Option<U256>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("🚀 {}", intent.kind.label());

    let wallet = connect(&config).await?;
    let dispatcher = ActionDispatcher::new(config.contracts.clone(), wallet);
    let mut snapshot = dispatcher.reader().snapshot(follow_token).await;
    let mut tracker = StatusTracker::new();

    let outcome = dispatcher
        .dispatch(&mut tracker, intent, &mut snapshot, |t| {
            let message = t.status().message();
            if !message.is_empty() {
                eprintln!("   [{}] {}", t.status().name(), message);
            }
        })
        .await;

    match outcome {
        Ok(receipt) => {
            eprintln!("   Hash: {}", receipt.hash);
            if let Some(block) = receipt.block_number {
                eprintln!("   Block: {}", block);
            }
            eprintln!("   Supply: {}", snapshot.supply_label());
            if let Some(label) = snapshot.claimable_label(config.contracts.token_decimals) {
                eprintln!("   Claimable: {}", label);
            }
            eprintln!("\n✨ Done!");
            Ok(())
        }
        Err(e) => {
            if let TxStatus::Error { error, .. } = tracker.status() {
                log::debug!("Underlying error: {}", error);
            }
            Err(e.user_message().into())
        }
    }
}

async fn cmd_projects(config: AppConfig, search: String, category: String) -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::new(&config.api_url);
    let projects = client.projects().await?;
    let filter = ProjectFilter { search, category };
    let shown = filter.apply(&projects);

    eprintln!("📁 {} ({})", filter.heading(), found_label(shown.len()));
    for project in shown {
        eprintln!(
            "\n   {} [{}]{}",
            project.name,
            project.category_label(),
            if project.is_active { "" } else { " (inactive)" }
        );
        eprintln!("   {}", project.description_or_default());
        eprintln!(
            "   {} / {} ({:.0}%)",
            format_usd(project.current_revenue),
            project.target_label(),
            project.progress_percent()
        );
    }
    Ok(())
}

async fn cmd_dashboard(config: AppConfig, role: UserRole, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::new(&config.api_url);

    match client.dashboard(role, id).await? {
        Dashboard::Creator(dash) => {
            eprintln!("🎨 {} ({})", dash.user.display_name(), dash.user.role.label());
            eprintln!("   Total revenue: {}", format_usd(dash.total_revenue));
            eprintln!("   Investors: {}", dash.total_investors);
            eprintln!("   Projects: {}", dash.projects.len());
            for project in &dash.projects {
                eprintln!("     - {} ({:.0}%)", project.name, project.progress_percent());
            }
            if !dash.recent_investments.is_empty() {
                eprintln!("   Recent investments:");
                for inv in &dash.recent_investments {
                    let date = inv
                        .created_date()
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    eprintln!("     - {} on {}", format_usd(inv.amount), date);
                }
            }
        }
        Dashboard::Investor(dash) => {
            let name = dash.user().map(|u| u.display_name()).unwrap_or_else(|| id.to_string());
            eprintln!("📈 {} (Investor)", name);
            for (label, value) in dash.summary() {
                eprintln!("   {}: {}", label, value);
            }
        }
    }
    Ok(())
}

async fn cmd_register(
    config: AppConfig,
    role: UserRole,
    wallet: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let wallet_address = match wallet {
        Some(w) => w,
        None => connect(&config)
            .await?
            .account()
            .map(|a| a.to_string())
            .ok_or("node manages no accounts; pass --wallet")?,
    };

    let client = ApiClient::new(&config.api_url);
    let response = client
        .register(&RegisterRequest { wallet_address: wallet_address.clone(), role })
        .await?;
    log::info!(target: logging::SUCCESS, "{}", response.message);
    eprintln!("✅ Registered {} as {}", wallet_address, role);
    Ok(())
}

async fn cmd_user(config: AppConfig, wallet: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::new(&config.api_url);
    let user = client.user(wallet).await?;
    eprintln!("👤 {} ({})", user.display_name(), user.role.label());
    eprintln!("   Wallet: {}", user.wallet_address);
    eprintln!("   Dashboard id: {}", user.dashboard_id());
    Ok(())
}
