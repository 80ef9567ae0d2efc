//! Staff Attendance Panel
//!
//! Filterable roster with summary counts, an export link and a per-staff
//! details modal. The panel is shared by the superadmin dashboard and the
//! standalone attendance page; it fetches on mount, whenever a filter
//! changes, and on explicit refresh. The roster cache is only trusted for
//! the currently selected query parameters.

use leptos::*;
use wasm_bindgen::JsCast;

use crate::api;
use crate::render;
use crate::state::global::DashboardState;
use crate::state::snapshot::{AttendanceRecord, AttendanceSnapshot};

/// Staff attendance panel component
#[component]
pub fn AttendancePanel() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let query = state.attendance_query;
    let attendance = state.attendance;

    let (loading, set_loading) = create_signal(false);
    let details = create_rw_signal(None::<AttendanceRecord>);

    // One fetch path for mount, filter changes and the refresh button.
    // User-initiated, so failures surface as a toast.
    let fetch_roster = {
        let state = state.clone();
        move || {
            let state = state.clone();
            spawn_local(async move {
                set_loading.set(true);
                let current = state.attendance_query.get_untracked();
                match api::fetch_attendance(&current).await {
                    Ok(records) => state.attendance.set(AttendanceSnapshot { records }),
                    Err(e) => {
                        state.notify_error("Failed to load attendance data. Please try again.");
                        web_sys::console::error_1(
                            &format!("attendance fetch failed: {}", e).into(),
                        );
                    }
                }
                set_loading.set(false);
            });
        }
    };

    // Initial load
    let initial_fetch = fetch_roster.clone();
    create_effect(move |_| {
        initial_fetch();
    });

    let fetch_for_date = fetch_roster.clone();
    let on_date = move |ev: web_sys::Event| {
        query.update(|q| q.date = event_target_value(&ev));
        fetch_for_date();
    };

    let fetch_for_dept = fetch_roster.clone();
    let on_department = move |ev: web_sys::Event| {
        query.update(|q| q.department = event_target_value(&ev));
        fetch_for_dept();
    };

    let fetch_for_days = fetch_roster.clone();
    let on_days = move |ev: web_sys::Event| {
        query.update(|q| q.days = event_target_value(&ev));
        fetch_for_days();
    };

    let fetch_for_refresh = fetch_roster.clone();
    let on_refresh = move |_| fetch_for_refresh();

    // Details clicks are delegated from the table body; rows come from
    // `inner_html`, so there is no per-row handler to attach.
    let state_for_details = state.clone();
    let on_roster_click = move |ev: web_sys::MouseEvent| {
        let Some(target) = ev.target() else {
            return;
        };
        let Ok(element) = target.dyn_into::<web_sys::Element>() else {
            return;
        };
        let Ok(Some(button)) = element.closest(".view-details") else {
            return;
        };
        let Some(staff_id) = button
            .get_attribute("data-staff-id")
            .and_then(|id| id.parse::<i64>().ok())
        else {
            return;
        };

        // Roster cache first, single-record fetch as the fallback
        if let Some(record) = attendance.get_untracked().find(staff_id).cloned() {
            details.set(Some(record));
            return;
        }

        let state = state_for_details.clone();
        spawn_local(async move {
            let current = state.attendance_query.get_untracked();
            match api::fetch_staff_details(&current, staff_id).await {
                Ok(Some(record)) => details.set(Some(record)),
                Ok(None) => state.notify_warning("Staff details not found"),
                Err(e) => {
                    state.notify_error("Failed to load staff details");
                    web_sys::console::error_1(
                        &format!("staff details fetch failed: {}", e).into(),
                    );
                }
            }
        });
    };

    view! {
        <section class="panel attendance-panel">
            <div class="panel-header">
                <h2>"Staff Attendance"</h2>

                <div class="attendance-filters">
                    <input
                        type="date"
                        prop:value=move || query.get().date
                        on:change=on_date
                    />
                    <input
                        type="text"
                        placeholder="Department"
                        prop:value=move || query.get().department
                        on:change=on_department
                    />
                    <select on:change=on_days prop:value=move || query.get().days>
                        <option value="7">"7 days"</option>
                        <option value="14">"14 days"</option>
                        <option value="30">"30 days"</option>
                    </select>

                    <button on:click=on_refresh disabled=move || loading.get()>
                        "Refresh"
                    </button>
                    <a
                        class="export-link"
                        href=move || api::attendance_export_url(&query.get())
                    >
                        "Export"
                    </a>

                    {move || {
                        if loading.get() {
                            view! { <span class="loading-spinner" /> }.into_view()
                        } else {
                            view! {}.into_view()
                        }
                    }}
                </div>
            </div>

            <div class="attendance-summary">
                <div class="summary-item">
                    <span class="summary-value">{move || attendance.get().total()}</span>
                    <span class="summary-label">"Total staff"</span>
                </div>
                <div class="summary-item">
                    <span class="summary-value">{move || attendance.get().present()}</span>
                    <span class="summary-label">"Present"</span>
                </div>
                <div class="summary-item">
                    <span class="summary-value">{move || attendance.get().absent()}</span>
                    <span class="summary-label">"Absent"</span>
                </div>
            </div>

            <table class="roster-table">
                <thead>
                    <tr>
                        <th>"Staff"</th>
                        <th>"Department"</th>
                        <th>"Position"</th>
                        <th>"Status"</th>
                        <th>"Last attendance"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody
                    on:click=on_roster_click
                    inner_html=move || render::attendance::roster_body(&attendance.get())
                />
            </table>

            {move || details.get().map(|record| view! { <DetailsModal record=record open=details /> })}
        </section>
    }
}

/// Per-staff details modal, fed from the roster cache
#[component]
fn DetailsModal(
    record: AttendanceRecord,
    open: RwSignal<Option<AttendanceRecord>>,
) -> impl IntoView {
    let title = render::attendance::details_title(&record);
    let body = render::attendance::details_body(&record);

    view! {
        <div class="modal-backdrop" on:click=move |_| open.set(None)>
            <div class="modal" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h5>{title}</h5>
                    <button class="modal-close" on:click=move |_| open.set(None)>
                        "×"
                    </button>
                </div>
                <div class="modal-body" inner_html=body />
            </div>
        </div>
    }
}
