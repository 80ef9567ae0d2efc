//! Navigation Component
//!
//! Header bar with brand, page links and the theme toggle.

use leptos::*;
use leptos_router::*;

use crate::state::global::{DashboardState, Theme};

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    let state_for_click = state.clone();
    let on_toggle = move |_| state_for_click.toggle_theme();

    view! {
        <nav class="top-nav">
            <div class="nav-inner">
                <A href="/" class="brand">
                    <span class="brand-mark">"🎓"</span>
                    <span class="brand-name">"CampusHub"</span>
                </A>

                <div class="nav-links">
                    <NavLink href="/" label="Superadmin" />
                    <NavLink href="/attendance" label="Attendance" />
                    <NavLink href="/analytics" label="Analytics" />
                </div>

                <button class="theme-toggle" on:click=on_toggle>
                    {move || match state.theme.get() {
                        Theme::Light => "☀",
                        Theme::Dark => "🌙",
                    }}
                </button>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="nav-link"
            active_class="nav-link-active"
        >
            {label}
        </A>
    }
}
