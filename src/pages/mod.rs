//! Pages
//!
//! Top-level page components for each route.

pub mod analytics;
pub mod attendance;
pub mod superadmin;

pub use analytics::Analytics;
pub use attendance::StaffAttendance;
pub use superadmin::Superadmin;
