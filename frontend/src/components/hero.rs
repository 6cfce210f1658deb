//! Hero section component

use leptos::*;
use leptos_router::A;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"FlowMint"</h1>
            <p class="subtitle">"Tokenize Your Future Revenue"</p>
            <div class="hero-actions">
                <A href="/dashboard" class="btn btn-primary">"Login / Register"</A>
                <A href="/home" class="btn btn-secondary">"Browse Projects"</A>
            </div>
        </div>
    }
}
