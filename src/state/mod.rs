//! State Management
//!
//! Dashboard context, per-domain snapshots and the poll scheduler.

pub mod global;
pub mod scheduler;
pub mod snapshot;

pub use global::{provide_dashboard_state, DashboardState, Severity, Theme, ToastMessage};
pub use scheduler::{CycleHandle, PollState, PollTask};
pub use snapshot::{
    AnalyticsSnapshot, AttendanceQuery, AttendanceRecord, AttendanceSnapshot, AttendanceStatus,
    LiveFeed, LiveUpdate, SuperadminSnapshot,
};
