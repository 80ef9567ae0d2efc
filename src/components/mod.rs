//! UI Components
//!
//! Reusable Leptos components for the dashboards.

pub mod attendance;
pub mod chart;
pub mod nav;
pub mod stat_card;
pub mod toast;

pub use attendance::AttendancePanel;
pub use chart::{BarChart, ChartHandle, ChartKind, ChartSeries, DoughnutChart};
pub use nav::Nav;
pub use stat_card::StatCard;
pub use toast::ToastStack;
