//! Stat Card Component
//!
//! Numeric counter tiles that step toward a new value instead of jumping.

use leptos::*;
use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Interval;

/// Counter animation: 20 interpolation steps over 500 ms
const COUNTER_STEPS: u32 = 20;
const COUNTER_DURATION_MS: u32 = 500;

/// Displayed value at `step` of the interpolation from `from` to `to`.
/// The final step lands exactly on the target.
fn counter_value(from: i64, to: i64, step: u32) -> i64 {
    if step >= COUNTER_STEPS {
        return to;
    }
    from + ((to - from) * step as i64) / COUNTER_STEPS as i64
}

/// Animated counter tile. When the bound value changes, the displayed
/// number steps from its current value to the target; an unchanged value
/// runs no animation.
#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<i64>,
) -> impl IntoView {
    let displayed = create_rw_signal(0i64);
    let animation: StoredValue<Option<Interval>> = store_value(None);

    create_effect(move |_| {
        let target = value.get();
        let from = displayed.get_untracked();
        if from == target {
            return;
        }

        // restart from whatever is currently on screen
        animation.update_value(|slot| {
            slot.take();
        });

        let step = Rc::new(Cell::new(0u32));
        let interval = Interval::new(COUNTER_DURATION_MS / COUNTER_STEPS, move || {
            let current = step.get() + 1;
            step.set(current);
            displayed.set(counter_value(from, target, current));
            if current >= COUNTER_STEPS {
                animation.update_value(|slot| {
                    slot.take();
                });
            }
        });
        animation.set_value(Some(interval));
    });

    view! {
        <div class="stat-card">
            <div class="stat-value">{move || displayed.get()}</div>
            <div class="stat-label">{label}</div>
        </div>
    }
}
