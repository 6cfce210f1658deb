//! Project listing (`/home`) and project cards.

use flowmint::api::{found_label, format_usd, Project, ProjectFilter, CATEGORIES};
use flowmint::{ContractSnapshot, TxIntent};
use leptos::*;

use super::status_modal::{SlotNotice, SlotNoticeProps, StatusModal, StatusModalProps};
use crate::services::{api, run_intent};
use crate::types::{TxSlot, WalletInfo};

#[component]
pub fn ProjectsPage(
    wallet_info: ReadSignal<Option<WalletInfo>>,
    snapshot: RwSignal<ContractSnapshot>,
) -> impl IntoView {
    let (projects, set_projects) = create_signal(Vec::<Project>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);
    let (search, set_search) = create_signal(String::new());
    let (category, set_category) = create_signal("all".to_string());

    spawn_local(async move {
        match api::fetch_projects().await {
            Ok(list) => {
                log::info!("📁 Loaded {} projects", list.len());
                set_projects.set(list);
            }
            Err(e) => {
                log::error!("Error fetching projects: {}", e);
                set_error.set(Some(e.to_string()));
            }
        }
        set_loading.set(false);
    });

    let filter = move || ProjectFilter {
        search: search.get(),
        category: category.get(),
    };
    let filtered = move || {
        let filter = filter();
        projects.with(|list| filter.apply(list).into_iter().cloned().collect::<Vec<_>>())
    };

    view! {
        <div class="projects-page">
            <aside class="sidebar">
                <h2>"Categories"</h2>
                {CATEGORIES
                    .iter()
                    .map(|(id, label)| {
                        let id = id.to_string();
                        let selected = id.clone();
                        view! {
                            <button
                                class="category"
                                class:active=move || category.get() == selected
                                on:click=move |_| set_category.set(id.clone())
                            >
                                {*label}
                            </button>
                        }
                    })
                    .collect_view()}
            </aside>

            <div class="projects-main">
                <input
                    type="search"
                    class="search"
                    placeholder="Search projects..."
                    prop:value=search
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
                <h2>{move || filter().heading()}</h2>
                <p class="muted">{move || found_label(filtered().len())}</p>

                {move || error.get().map(|e| view! { <div class="alert alert-error">{e}</div> })}

                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <div class="spinner">"Loading projects..."</div> }
                >
                    <Show
                        when=move || !filtered().is_empty()
                        fallback=|| view! {
                            <div class="empty">
                                <h4>"No projects found"</h4>
                                <p>"Try adjusting your search or category."</p>
                            </div>
                        }
                    >
                        <div class="project-grid">
                            <For
                                each=filtered
                                key=|p| p.id.to_string()
                                children=move |project| view! {
                                    <ProjectCard
                                        project=project
                                        wallet_info=wallet_info
                                        snapshot=snapshot
                                    />
                                }
                            />
                        </div>
                    </Show>
                </Show>
            </div>
        </div>
    }
}

/// One project. Investing mints a revenue-sharing NFT.
#[component]
pub fn ProjectCard(
    project: Project,
    wallet_info: ReadSignal<Option<WalletInfo>>,
    snapshot: RwSignal<ContractSnapshot>,
    #[prop(optional)] is_owner: bool,
) -> impl IntoView {
    let slot = TxSlot::new();
    let progress = project.progress_percent();

    let on_invest = move |_| {
        if wallet_info.get_untracked().is_none() {
            slot.notice.set(Some("Please connect your wallet to invest".to_string()));
            return;
        }
        run_intent(slot, wallet_info.get_untracked(), TxIntent::mint(), snapshot);
    };

    let image = match project.image_url.clone() {
        Some(url) => view! { <img src=url alt=project.name.clone()/> }.into_view(),
        None => view! { <span class="project-emoji">"🎨"</span> }.into_view(),
    };

    view! {
        <div class="project-card">
            <div class="project-image">
                {image}
                <span class="project-category">{project.category_label().to_string()}</span>
            </div>
            <h3>{project.name.clone()}</h3>
            <p class="muted">{project.description_or_default().to_string()}</p>

            <div class="progress-row">
                <span>"Progress"</span>
                <strong>{format!("{:.1}%", progress)}</strong>
            </div>
            <div class="progress-bar">
                <div class="progress-fill" style=format!("width: {}%;", project.progress_width())></div>
            </div>
            <div class="progress-row muted">
                <span>{format_usd(project.current_revenue)}</span>
                <span>{project.target_label()}</span>
            </div>

            <div class="project-footer">
                <span class:active=project.is_active>
                    {if project.is_active { "Active" } else { "Inactive" }}
                </span>
                {if is_owner {
                    view! { <span class="badge">"Your project"</span> }.into_view()
                } else {
                    view! {
                        <button
                            class="btn btn-primary"
                            on:click=on_invest
                            disabled=move || slot.is_busy()
                        >
                            {move || if slot.is_busy() { "Processing..." } else { "Invest" }}
                        </button>
                    }
                    .into_view()
                }}
            </div>
            {SlotNotice(SlotNoticeProps { slot: slot })}
            {StatusModal(StatusModalProps { slot: slot })}
        </div>
    }
}
