//! Toast Notifications
//!
//! Stacked transient messages fed by `DashboardState::notify`. Concurrent
//! notifications stack; each dismisses itself after its display window.

use leptos::*;

use crate::state::global::{DashboardState, Severity, ToastMessage};

/// Toast stack container, mounted once at the app root
#[component]
pub fn ToastStack() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    view! {
        <div class="toast-stack">
            {move || {
                state.toasts.get()
                    .into_iter()
                    .map(|toast| view! { <ToastCard toast=toast /> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn ToastCard(toast: ToastMessage) -> impl IntoView {
    let (icon, class) = match toast.severity {
        Severity::Success => ("✓", "toast toast-success"),
        Severity::Error => ("✕", "toast toast-error"),
        Severity::Warning => ("⚠", "toast toast-warning"),
        Severity::Info => ("ℹ", "toast toast-info"),
    };

    view! {
        <div class=class>
            <span class="toast-icon">{icon}</span>
            <span class="toast-text">{toast.text}</span>
        </div>
    }
}
