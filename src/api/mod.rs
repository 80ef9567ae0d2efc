//! Portal API
//!
//! HTTP client and typed endpoint wrappers.

pub mod client;

pub use client::{
    attendance_export_url, build_url, csrf_token, fetch_analytics, fetch_attendance,
    fetch_live_updates, fetch_staff_details, fetch_superadmin_updates, mark_attendance_now,
    FetchError, MarkAttendanceResponse, MarkAttendanceSummary,
};
