//! Dashboard (`/dashboard`): wallet login, registration and role views.

use flowmint::api::{
    format_usd, CreatorDashboard, Dashboard, InvestorDashboard, RegisterRequest, User, UserRole,
};
use flowmint::{ApiError, ContractSnapshot};
use leptos::*;

use super::panels::{CreatorPanel, InvestorPanel, MintPanel};
use super::projects::ProjectCard;
use crate::services::api;
use crate::types::WalletInfo;

/// Where the login flow currently is.
#[derive(Clone, Debug, PartialEq)]
enum Session {
    Disconnected,
    Loading,
    /// Wallet known to the backend.
    LoggedIn(User),
    /// Wallet connected but not registered.
    Unregistered,
    Failed(String),
}

#[component]
pub fn DashboardPage(
    wallet_info: ReadSignal<Option<WalletInfo>>,
    set_wallet_info: WriteSignal<Option<WalletInfo>>,
    snapshot: RwSignal<ContractSnapshot>,
) -> impl IntoView {
    let (session, set_session) = create_signal(Session::Disconnected);
    let (dashboard, set_dashboard) = create_signal(None::<Dashboard>);

    let load_dashboard = move |user: User| {
        set_dashboard.set(None);
        spawn_local(async move {
            match api::fetch_dashboard(&user).await {
                Ok(data) => set_dashboard.set(Some(data)),
                Err(e) => log::error!("Error fetching dashboard data: {}", e),
            }
        });
    };

    let login = move |wallet: String| {
        set_session.set(Session::Loading);
        spawn_local(async move {
            match api::fetch_user(&wallet).await {
                Ok(user) => {
                    log::info!("👤 Logged in as {}", user.display_name());
                    load_dashboard(user.clone());
                    set_session.set(Session::LoggedIn(user));
                }
                Err(ApiError::NotFound(_)) => set_session.set(Session::Unregistered),
                Err(e) => set_session.set(Session::Failed(e.to_string())),
            }
        });
    };

    create_effect(move |_| match wallet_info.get() {
        Some(info) => login(info.address.to_string()),
        None => {
            set_session.set(Session::Disconnected);
            set_dashboard.set(None);
        }
    });

    let on_register = move |role: UserRole| {
        let Some(info) = wallet_info.get_untracked() else {
            return;
        };
        let wallet = info.address.to_string();
        set_session.set(Session::Loading);
        spawn_local(async move {
            let request = RegisterRequest { wallet_address: wallet.clone(), role };
            match api::register(&request).await {
                Ok(response) => {
                    log::info!("✅ {}", response.message);
                    login(wallet);
                }
                Err(e) => set_session.set(Session::Failed(e.to_string())),
            }
        });
    };

    let on_logout = move |_| {
        log::info!("👋 Logout");
        set_wallet_info.set(None);
    };

    let on_refresh = Callback::new(move |_: ()| {
        if let Session::LoggedIn(user) = session.get_untracked() {
            load_dashboard(user);
        }
    });

    view! {
        <div class="dashboard-page">
            {move || match session.get() {
                Session::Disconnected => view! {
                    <div class="panel center">
                        <h2>"Login"</h2>
                        <p class="muted">"Connect your wallet (top right) to access your dashboard."</p>
                    </div>
                }.into_view(),

                Session::Loading => view! { <div class="spinner">"Loading..."</div> }.into_view(),

                Session::Failed(msg) => view! {
                    <div class="alert alert-error">{msg}</div>
                }.into_view(),

                Session::Unregistered => view! {
                    <div class="panel center">
                        <h2>"Register"</h2>
                        <p class="muted">"This wallet is not registered yet. Join as:"</p>
                        <div class="button-row">
                            <button class="btn btn-primary" on:click=move |_| on_register(UserRole::Creator)>
                                "Creator"
                            </button>
                            <button class="btn btn-secondary" on:click=move |_| on_register(UserRole::Investor)>
                                "Investor"
                            </button>
                        </div>
                    </div>
                }.into_view(),

                Session::LoggedIn(user) => {
                    let role = user.role;
                    view! {
                        <div class="dashboard-header">
                            <span class="badge">{format!("{} Dashboard", role.label())}</span>
                            <div class="dashboard-user">
                                <div>
                                    <p class="muted">"Welcome back,"</p>
                                    <p><strong>{user.display_name()}</strong></p>
                                </div>
                                <div class="avatar">{user.initial().to_string()}</div>
                                <button class="btn btn-danger" on:click=on_logout>"Logout"</button>
                            </div>
                        </div>

                        <div class="dashboard-grid">
                            <div class="dashboard-main">
                                {move || match dashboard.get() {
                                    None => view! { <div class="spinner">"Loading dashboard..."</div> }.into_view(),
                                    Some(Dashboard::Creator(data)) => view! {
                                        <CreatorView data=data wallet_info=wallet_info snapshot=snapshot on_refresh=on_refresh/>
                                    }.into_view(),
                                    Some(Dashboard::Investor(data)) => view! {
                                        <InvestorView data=data on_refresh=on_refresh/>
                                    }.into_view(),
                                }}
                            </div>
                            <aside class="dashboard-sidebar">
                                <h2>"Blockchain Actions"</h2>
                                {match role {
                                    UserRole::Creator => view! {
                                        <CreatorPanel wallet_info=wallet_info snapshot=snapshot/>
                                    }.into_view(),
                                    UserRole::Investor => view! {
                                        <MintPanel wallet_info=wallet_info snapshot=snapshot/>
                                        <InvestorPanel wallet_info=wallet_info snapshot=snapshot/>
                                    }.into_view(),
                                }}
                            </aside>
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn StatsCard(title: &'static str, value: String, icon: &'static str) -> impl IntoView {
    view! {
        <div class="stats-card">
            <span class="stats-icon">{icon}</span>
            <div>
                <p class="muted">{title}</p>
                <p class="stats-value">{value}</p>
            </div>
        </div>
    }
}

#[component]
fn CreatorView(
    data: CreatorDashboard,
    wallet_info: ReadSignal<Option<WalletInfo>>,
    snapshot: RwSignal<ContractSnapshot>,
    on_refresh: Callback<()>,
) -> impl IntoView {
    let CreatorDashboard { user, projects, total_revenue, total_investors, recent_investments } = data;

    view! {
        <div class="panel">
            <h2>{format!("Welcome back, {}!", user.display_name())}</h2>
            <p class="muted">"Manage your creative projects and track your revenue"</p>
            <button class="btn btn-secondary" on:click=move |_| on_refresh.call(())>"Refresh"</button>
        </div>

        <div class="stats-grid">
            <StatsCard title="Total Revenue" value=format_usd(total_revenue) icon="💰"/>
            <StatsCard title="Active Projects" value=projects.len().to_string() icon="📁"/>
            <StatsCard title="Total Investors" value=total_investors.to_string() icon="👥"/>
        </div>

        <div class="panel">
            <h3>"Your Projects"</h3>
            {if projects.is_empty() {
                view! {
                    <div class="empty">
                        <h4>"No projects yet"</h4>
                        <p class="muted">"Create your first project to start earning revenue"</p>
                    </div>
                }.into_view()
            } else {
                view! {
                    <div class="project-grid">
                        {projects.into_iter().map(|project| view! {
                            <ProjectCard project=project wallet_info=wallet_info snapshot=snapshot is_owner=true/>
                        }).collect_view()}
                    </div>
                }.into_view()
            }}
        </div>

        {(!recent_investments.is_empty()).then(|| view! {
            <div class="panel">
                <h3>"Recent Investments"</h3>
                {recent_investments.into_iter().map(|inv| {
                    let token = inv.nft_token_id.as_ref().map(|t| t.to_string()).unwrap_or_else(|| "—".to_string());
                    let date = inv.created_date().map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
                    view! {
                        <div class="investment-row">
                            <div>
                                <p><strong>{format!("{} Investment", format_usd(inv.amount))}</strong></p>
                                <p class="muted">"Token ID: " {token}</p>
                            </div>
                            <div class="right">
                                <p class="positive">{format!("+{}", format_usd(inv.amount))}</p>
                                <p class="muted">{date}</p>
                            </div>
                        </div>
                    }
                }).collect_view()}
            </div>
        })}
    }
}

#[component]
fn InvestorView(data: InvestorDashboard, on_refresh: Callback<()>) -> impl IntoView {
    let name = data.user().map(|u| u.display_name()).unwrap_or_else(|| "Investor".to_string());
    let summary = data.summary();

    view! {
        <div class="panel">
            <h2>{format!("Welcome back, {}!", name)}</h2>
            <p class="muted">"Track your revenue-sharing NFTs"</p>
            <button class="btn btn-secondary" on:click=move |_| on_refresh.call(())>"Refresh"</button>
        </div>
        <div class="stats-grid">
            {summary.into_iter().map(|(label, value)| view! {
                <div class="stats-card">
                    <p class="muted">{label}</p>
                    <p class="stats-value">{value}</p>
                </div>
            }).collect_view()}
        </div>
    }
}
