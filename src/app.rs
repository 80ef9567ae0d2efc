//! App Root Component
//!
//! Routing, the shared dashboard context and the toast stack.

use leptos::*;
use leptos_router::*;

use crate::components::{Nav, ToastStack};
use crate::pages::{Analytics, StaffAttendance, Superadmin};
use crate::state::global::{apply_theme, provide_dashboard_state, DashboardState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide the dashboard context to all components
    provide_dashboard_state();

    // Restore the persisted theme before anything renders
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    apply_theme(state.theme.get_untracked());

    view! {
        <Router>
            <div class="app-shell">
                <Nav />

                <main class="app-main">
                    <Routes>
                        <Route path="/" view=Superadmin />
                        <Route path="/attendance" view=StaffAttendance />
                        <Route path="/analytics" view=Analytics />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Toast notifications
                <ToastStack />
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"Page Not Found"</h1>
            <p>"The page you're looking for doesn't exist."</p>
            <A href="/" class="nav-link">
                "Go to the dashboard"
            </A>
        </div>
    }
}
