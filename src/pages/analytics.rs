//! Study Analytics Page
//!
//! Learning-style distribution, AI study tips, achievements and the
//! live-updates feed. The analytics poll honors the persisted
//! auto-refresh preference and toasts only on meaningful change.

use leptos::*;
use std::rc::Rc;

use crate::api;
use crate::components::{ChartSeries, DoughnutChart};
use crate::render;
use crate::state::global::DashboardState;
use crate::state::scheduler::PollTask;
use crate::state::snapshot::{AnalyticsSnapshot, LiveFeed};

const ANALYTICS_POLL_MS: u32 = 45_000;
const FEED_POLL_MS: u32 = 60_000;

/// Study analytics page component
#[component]
pub fn Analytics() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let analytics = state.analytics;
    let live_feed = state.live_feed;
    let auto_refresh = state.auto_refresh;

    let analytics_task = PollTask::new("analytics", ANALYTICS_POLL_MS, {
        let state = state.clone();
        move |cycle| {
            // the auto-refresh preference gates timer cycles only
            if !cycle.is_manual() && !state.auto_refresh.get_untracked() {
                cycle.finish();
                return;
            }

            let state = state.clone();
            spawn_local(async move {
                match api::fetch_analytics().await {
                    Ok(next) => {
                        if cycle.finish() {
                            let changed = {
                                let previous = state.analytics.get_untracked();
                                AnalyticsSnapshot::has_meaningful_change(previous.as_ref(), &next)
                            };
                            state.analytics.set(Some(next));
                            if changed {
                                state.notify_info("Study analytics updated");
                            }
                        }
                    }
                    Err(e) => {
                        let manual = cycle.is_manual();
                        cycle.finish();
                        if manual {
                            state.notify_error(&format!("Analytics refresh failed: {}", e));
                        } else {
                            web_sys::console::warn_1(
                                &format!("analytics fetch failed: {}", e).into(),
                            );
                        }
                    }
                }
            });
        }
    });
    analytics_task.start();

    let feed_task = PollTask::new("live-updates", FEED_POLL_MS, {
        let state = state.clone();
        move |cycle| {
            let state = state.clone();
            spawn_local(async move {
                match api::fetch_live_updates().await {
                    Ok(updates) => {
                        if cycle.finish() {
                            state.live_feed.set(LiveFeed::Loaded(updates));
                        }
                    }
                    Err(e) => {
                        cycle.finish();
                        // the feed renders its own error state instead of toasting
                        state.live_feed.set(LiveFeed::Failed);
                        web_sys::console::error_1(
                            &format!("live updates fetch failed: {}", e).into(),
                        );
                    }
                }
            });
        }
    });
    feed_task.start();

    on_cleanup({
        let analytics_task = Rc::clone(&analytics_task);
        let feed_task = Rc::clone(&feed_task);
        move || {
            analytics_task.stop();
            feed_task.stop();
        }
    });

    let style_series = Signal::derive(move || {
        analytics
            .get()
            .map(|s| {
                ChartSeries::new(s.learning_style.labels, s.learning_style.values)
                    .unwrap_or_else(|err| {
                        web_sys::console::warn_1(
                            &format!("learning-style series rejected: {}", err).into(),
                        );
                        ChartSeries::empty()
                    })
            })
            .unwrap_or_else(ChartSeries::empty)
    });

    let tips_markup = Signal::derive(move || {
        let snapshot = analytics.get();
        let tips = snapshot.as_ref().map(|s| s.ai_tips.as_slice()).unwrap_or(&[]);
        render::analytics::tips_list(tips)
    });

    let achievements_markup = Signal::derive(move || {
        let snapshot = analytics.get();
        let items = snapshot
            .as_ref()
            .map(|s| s.achievements.as_slice())
            .unwrap_or(&[]);
        render::analytics::achievements_grid(items)
    });

    let feed_markup = Signal::derive(move || render::analytics::feed(&live_feed.get()));

    let on_toggle_auto = {
        let state = state.clone();
        move |_| {
            let enabled = !state.auto_refresh.get_untracked();
            state.set_auto_refresh(enabled);
        }
    };

    let refresh_analytics = {
        let task = Rc::clone(&analytics_task);
        move |_| task.refresh()
    };

    let refresh_feed = {
        let task = Rc::clone(&feed_task);
        move |_| task.refresh()
    };

    view! {
        <div class="page analytics-page">
            <div class="page-header">
                <div>
                    <h1>"Study Analytics"</h1>
                    <p class="page-subtitle">"Learning patterns and AI insights"</p>
                </div>

                <div class="analytics-controls">
                    <button class="auto-refresh-toggle" on:click=on_toggle_auto>
                        {move || {
                            if auto_refresh.get() {
                                "Auto-refresh: On"
                            } else {
                                "Auto-refresh: Off"
                            }
                        }}
                    </button>

                    // clicking the line is the manual refresh
                    <button class="last-updated" on:click=refresh_analytics>
                        {move || {
                            let raw = analytics
                                .get()
                                .map(|s| s.last_updated)
                                .unwrap_or_default();
                            render::analytics::last_updated_label(&raw)
                        }}
                    </button>
                </div>
            </div>

            <div class="analytics-grid">
                <section class="panel">
                    <h2>"Learning Style"</h2>
                    <DoughnutChart series=style_series />
                </section>

                <section class="panel">
                    <h2>"Study Summary"</h2>
                    <div class="study-metrics">
                        <div class="metric-row">
                            <span class="metric-label">"Most productive time"</span>
                            <span class="metric-value">
                                {move || {
                                    analytics
                                        .get()
                                        .map(|s| s.peak_hours)
                                        .unwrap_or_else(|| "-".to_string())
                                }}
                            </span>
                        </div>
                        <div class="metric-row">
                            <span class="metric-label">"Average session"</span>
                            <span class="metric-value">
                                {move || {
                                    analytics
                                        .get()
                                        .map(|s| render::analytics::hours_label(s.avg_session))
                                        .unwrap_or_else(|| "-".to_string())
                                }}
                            </span>
                        </div>
                        <div class="metric-row">
                            <span class="metric-label">"Weekly total"</span>
                            <span class="metric-value">
                                {move || {
                                    analytics
                                        .get()
                                        .map(|s| render::analytics::hours_label(s.weekly_total))
                                        .unwrap_or_else(|| "-".to_string())
                                }}
                            </span>
                        </div>
                    </div>
                </section>

                <section class="panel">
                    <h2>"AI Study Tips"</h2>
                    <div class="ai-tips" inner_html=move || tips_markup.get() />
                </section>

                <section class="panel">
                    <h2>"Achievements"</h2>
                    <div class="achievement-grid" inner_html=move || achievements_markup.get() />
                </section>

                <section class="panel">
                    <div class="panel-header">
                        <h2>"Live Updates"</h2>
                        <button class="feed-refresh" on:click=refresh_feed>
                            "Refresh"
                        </button>
                    </div>
                    <div
                        class="live-updates-container"
                        inner_html=move || feed_markup.get()
                    />
                </section>
            </div>
        </div>
    }
}
