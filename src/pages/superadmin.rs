//! Superadmin Dashboard Page
//!
//! Stat counters, signup chart and recent users kept fresh by a
//! 10-second poll, plus the staff attendance panel and the one-click
//! attendance action.

use leptos::*;
use std::rc::Rc;

use crate::api;
use crate::components::{AttendancePanel, BarChart, ChartSeries, StatCard};
use crate::render;
use crate::state::global::DashboardState;
use crate::state::scheduler::PollTask;

const POLL_INTERVAL_MS: u32 = 10_000;

/// Superadmin dashboard page component
#[component]
pub fn Superadmin() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let superadmin = state.superadmin;

    let task = PollTask::new("superadmin-updates", POLL_INTERVAL_MS, {
        let state = state.clone();
        move |cycle| {
            let state = state.clone();
            spawn_local(async move {
                match api::fetch_superadmin_updates().await {
                    Ok(snapshot) => {
                        if cycle.finish() {
                            state.superadmin.set(Some(snapshot));
                        }
                    }
                    Err(e) => {
                        let manual = cycle.is_manual();
                        cycle.finish();
                        if manual {
                            state.notify_error(&format!("Dashboard refresh failed: {}", e));
                        } else {
                            web_sys::console::warn_1(
                                &format!("superadmin updates failed: {}", e).into(),
                            );
                        }
                    }
                }
            });
        }
    });
    task.start();
    on_cleanup({
        let task = Rc::clone(&task);
        move || task.stop()
    });

    let students = Signal::derive(move || {
        superadmin.get().map(|s| s.total_students).unwrap_or(0)
    });
    let teachers = Signal::derive(move || {
        superadmin.get().map(|s| s.total_teachers).unwrap_or(0)
    });
    let courses = Signal::derive(move || {
        superadmin.get().map(|s| s.total_courses).unwrap_or(0)
    });
    let other = Signal::derive(move || {
        superadmin.get().map(|s| s.other_count).unwrap_or(0)
    });

    let chart_series = Signal::derive(move || {
        superadmin
            .get()
            .map(|s| {
                ChartSeries::new(s.signup_labels, s.signup_counts).unwrap_or_else(|err| {
                    web_sys::console::warn_1(&format!("signup series rejected: {}", err).into());
                    ChartSeries::empty()
                })
            })
            .unwrap_or_else(ChartSeries::empty)
    });

    let users_body = Signal::derive(move || {
        let snapshot = superadmin.get();
        let users = snapshot
            .as_ref()
            .map(|s| s.recent_users.as_slice())
            .unwrap_or(&[]);
        render::superadmin::recent_users_body(users, render::superadmin::REPORT_URL_TEMPLATE)
    });

    let on_mark_attendance = {
        let state = state.clone();
        let task = Rc::clone(&task);
        move |_| {
            if !confirm(
                "Mark attendance now for today using existing check-ins? \
                 This will update daily attendance for all staff. Proceed?",
            ) {
                return;
            }
            let state = state.clone();
            let task = Rc::clone(&task);
            spawn_local(async move {
                match api::mark_attendance_now().await {
                    Ok(response) if response.success => {
                        state.notify_success(&format!(
                            "Attendance marked. Present: {} | Absent: {}",
                            response.summary.present, response.summary.absent
                        ));
                        // pull the new counters right away
                        task.refresh();
                    }
                    Ok(_) => state.notify_error("Attendance endpoint returned an error"),
                    Err(e) => {
                        state.notify_error("Failed to mark attendance");
                        web_sys::console::error_1(
                            &format!("one-click attendance failed: {}", e).into(),
                        );
                    }
                }
            });
        }
    };

    view! {
        <div class="page superadmin-page">
            <div class="page-header">
                <div>
                    <h1>"Superadmin Dashboard"</h1>
                    <p class="page-subtitle">"Institute overview at a glance"</p>
                </div>
                <button class="primary-action" on:click=on_mark_attendance>
                    "One-click attendance"
                </button>
            </div>

            <section class="stat-grid">
                <StatCard label="Students" value=students />
                <StatCard label="Teachers" value=teachers />
                <StatCard label="Courses" value=courses />
                <StatCard label="Other accounts" value=other />
            </section>

            <section class="panel">
                <h2>"Signups (last 7 days)"</h2>
                <BarChart series=chart_series />
            </section>

            <section class="panel">
                <h2>"Recent Users"</h2>
                <table class="users-table">
                    <thead>
                        <tr>
                            <th>"Username"</th>
                            <th>"Email"</th>
                            <th>"Role"</th>
                            <th>"Joined"</th>
                            <th>"Report"</th>
                        </tr>
                    </thead>
                    <tbody inner_html=move || users_body.get() />
                </table>
            </section>

            <AttendancePanel />
        </div>
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
