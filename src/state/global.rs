//! Dashboard State
//!
//! Reactive context shared by every page, owned by the app root: the
//! latest snapshot per domain, the toast stack, and the persisted user
//! preferences. No module-level globals; everything hangs off this
//! context struct.

use leptos::*;
use std::cell::Cell;
use std::rc::Rc;

use crate::state::snapshot::{
    AnalyticsSnapshot, AttendanceQuery, AttendanceSnapshot, LiveFeed, SuperadminSnapshot,
};

/// How long a toast stays on screen
pub const TOAST_DISPLAY_MS: u32 = 5000;

/// Toast severity, in escalating order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// One entry in the toast stack
#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: u64,
    pub text: String,
    pub severity: Severity,
}

/// Context provided to all components
#[derive(Clone)]
pub struct DashboardState {
    /// Latest analytics snapshot (None before the first successful fetch)
    pub analytics: RwSignal<Option<AnalyticsSnapshot>>,
    /// Latest roster for the selected attendance query
    pub attendance: RwSignal<AttendanceSnapshot>,
    /// Attendance filter parameters; changing them invalidates the roster
    pub attendance_query: RwSignal<AttendanceQuery>,
    /// Latest superadmin counters/users/signups snapshot
    pub superadmin: RwSignal<Option<SuperadminSnapshot>>,
    /// Live-updates feed region state
    pub live_feed: RwSignal<LiveFeed>,
    /// Stacked transient notifications
    pub toasts: RwSignal<Vec<ToastMessage>>,
    /// Light/dark theme, persisted
    pub theme: RwSignal<Theme>,
    /// Analytics auto-refresh preference, persisted
    pub auto_refresh: RwSignal<bool>,
    toast_seq: Rc<Cell<u64>>,
}

/// Provide the dashboard context to the component tree
pub fn provide_dashboard_state() {
    let state = DashboardState {
        analytics: create_rw_signal(None),
        attendance: create_rw_signal(AttendanceSnapshot::default()),
        attendance_query: create_rw_signal(AttendanceQuery::for_today()),
        superadmin: create_rw_signal(None),
        live_feed: create_rw_signal(LiveFeed::Loading),
        toasts: create_rw_signal(Vec::new()),
        theme: create_rw_signal(load_theme()),
        auto_refresh: create_rw_signal(load_auto_refresh()),
        toast_seq: Rc::new(Cell::new(0)),
    };

    provide_context(state);
}

impl DashboardState {
    /// Enqueue a transient notification. Messages stack and each
    /// auto-dismisses after [`TOAST_DISPLAY_MS`].
    pub fn notify(&self, message: &str, severity: Severity) {
        let id = self.toast_seq.get() + 1;
        self.toast_seq.set(id);

        self.toasts.update(|stack| {
            stack.push(ToastMessage {
                id,
                text: message.to_string(),
                severity,
            })
        });

        let toasts = self.toasts;
        gloo_timers::callback::Timeout::new(TOAST_DISPLAY_MS, move || {
            toasts.update(|stack| stack.retain(|t| t.id != id));
        })
        .forget();
    }

    pub fn notify_info(&self, message: &str) {
        self.notify(message, Severity::Info);
    }

    pub fn notify_success(&self, message: &str) {
        self.notify(message, Severity::Success);
    }

    pub fn notify_warning(&self, message: &str) {
        self.notify(message, Severity::Warning);
    }

    pub fn notify_error(&self, message: &str) {
        self.notify(message, Severity::Error);
    }

    /// Flip the theme, update `<body>` and persist the choice
    pub fn toggle_theme(&self) {
        let next = match self.theme.get_untracked() {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.theme.set(next);
        apply_theme(next);
        store_theme(next);
    }

    pub fn set_auto_refresh(&self, enabled: bool) {
        self.auto_refresh.set(enabled);
        store_auto_refresh(enabled);
    }
}

// ============ Persisted Preferences ============

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

const THEME_KEY: &str = "theme";
const AUTO_REFRESH_KEY: &str = "analyticsAutoRefresh";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Dark unless "light" was saved
pub fn load_theme() -> Theme {
    match local_storage()
        .and_then(|s| s.get_item(THEME_KEY).ok().flatten())
        .as_deref()
    {
        Some("light") => Theme::Light,
        _ => Theme::Dark,
    }
}

fn store_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        let value = match theme {
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        let _ = storage.set_item(THEME_KEY, value);
    }
}

/// The light theme is a `light-mode` class on `<body>`; dark is the bare body.
pub fn apply_theme(theme: Theme) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };

    let _ = match theme {
        Theme::Light => body.class_list().add_1("light-mode"),
        Theme::Dark => body.class_list().remove_1("light-mode"),
    };
}

/// Auto-refresh is on unless explicitly disabled
pub fn load_auto_refresh() -> bool {
    !matches!(
        local_storage()
            .and_then(|s| s.get_item(AUTO_REFRESH_KEY).ok().flatten())
            .as_deref(),
        Some("false")
    )
}

fn store_auto_refresh(enabled: bool) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(AUTO_REFRESH_KEY, if enabled { "true" } else { "false" });
    }
}
