//! CampusHub Dashboard
//!
//! Client-side dashboards for the CampusHub school administration portal,
//! built with Leptos (WASM).
//!
//! # Features
//!
//! - Superadmin overview with polled stat counters, signup chart and
//!   one-click attendance
//! - Staff attendance roster with filters, per-staff history and export
//! - Study analytics with change-aware refresh notifications and a
//!   live-updates feed
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles
//! to WebAssembly. Every dashboard keeps a canonical in-memory snapshot of
//! its domain; the DOM is a projection of the latest snapshot. Recurring
//! polls pause while the tab is hidden and catch up when it becomes
//! visible again.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod render;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
