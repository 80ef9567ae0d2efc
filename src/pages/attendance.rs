//! Staff Attendance Page
//!
//! Standalone host for the attendance panel.

use leptos::*;

use crate::components::AttendancePanel;

/// Staff attendance page component
#[component]
pub fn StaffAttendance() -> impl IntoView {
    view! {
        <div class="page attendance-page">
            <div class="page-header">
                <div>
                    <h1>"Staff Attendance"</h1>
                    <p class="page-subtitle">"Daily roster and recent history"</p>
                </div>
            </div>

            <AttendancePanel />
        </div>
    }
}
