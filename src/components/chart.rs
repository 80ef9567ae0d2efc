//! Chart Components
//!
//! Signup bar chart and learning-style doughnut drawn on HTML5 Canvas.
//! Polling-driven updates replace both the label and value sequences at
//! once and redraw without animation.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Segment colors for the doughnut chart
const SEGMENT_COLORS: [&str; 6] = [
    "#28a745", // Green
    "#007bff", // Blue
    "#ffc107", // Yellow
    "#dc3545", // Red
    "#9C27B0", // Purple
    "#00BCD4", // Cyan
];

/// Bar fill for the signups chart
const BAR_COLOR: &str = "#4F46E5";
const BACKGROUND_COLOR: &str = "#1f2937";
const GRID_COLOR: &str = "#374151";
const LABEL_COLOR: &str = "#9ca3af";

/// Labels paired 1:1 with numeric values. The pairing is enforced at
/// construction so a reader mid-render never observes mismatched lengths.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartSeries {
    labels: Vec<String>,
    values: Vec<f64>,
}

/// Rejected series construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("labels/values length mismatch: {labels} labels, {values} values")]
pub struct SeriesMismatch {
    pub labels: usize,
    pub values: usize,
}

impl ChartSeries {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Result<Self, SeriesMismatch> {
        if labels.len() != values.len() {
            return Err(SeriesMismatch {
                labels: labels.len(),
                values: values.len(),
            });
        }
        Ok(Self { labels, values })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().cloned().fold(0.0, f64::max)
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Doughnut,
}

/// Handle over one canvas chart.
///
/// `update` swaps in a new series and redraws; after `destroy` (or before
/// a canvas is bound) every call is a guarded no-op rather than an error.
pub struct ChartHandle {
    canvas: Option<HtmlCanvasElement>,
    kind: ChartKind,
    series: ChartSeries,
}

impl ChartHandle {
    pub fn init(canvas: HtmlCanvasElement, kind: ChartKind, series: ChartSeries) -> Self {
        let handle = Self {
            canvas: Some(canvas),
            kind,
            series,
        };
        handle.draw();
        handle
    }

    pub fn update(&mut self, series: ChartSeries) {
        let Some(canvas) = self.canvas.clone() else {
            return;
        };
        self.series = series;
        draw_chart(&canvas, self.kind, &self.series);
    }

    /// Release the canvas; later updates are no-ops.
    pub fn destroy(&mut self) {
        self.canvas = None;
    }

    pub fn is_destroyed(&self) -> bool {
        self.canvas.is_none()
    }

    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    fn draw(&self) {
        if let Some(canvas) = &self.canvas {
            draw_chart(canvas, self.kind, &self.series);
        }
    }

    #[cfg(test)]
    fn detached(kind: ChartKind, series: ChartSeries) -> Self {
        Self {
            canvas: None,
            kind,
            series,
        }
    }
}

/// Bar chart bound to a reactive series
#[component]
pub fn BarChart(#[prop(into)] series: Signal<ChartSeries>) -> impl IntoView {
    chart_canvas(series, ChartKind::Bar, "800", "360")
}

/// Doughnut chart with a legend naming each segment
#[component]
pub fn DoughnutChart(#[prop(into)] series: Signal<ChartSeries>) -> impl IntoView {
    view! {
        <div>
            {chart_canvas(series, ChartKind::Doughnut, "360", "360")}
            <ChartLegend series=series />
        </div>
    }
}

fn chart_canvas(
    series: Signal<ChartSeries>,
    kind: ChartKind,
    width: &'static str,
    height: &'static str,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let handle: StoredValue<Option<ChartHandle>> = store_value(None);

    // First run binds the handle; every later run is an atomic update.
    create_effect(move |_| {
        let series = series.get();
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        let canvas: HtmlCanvasElement = {
            let raw: &HtmlCanvasElement = &canvas;
            raw.clone()
        };

        handle.update_value(|slot| match slot {
            Some(chart) => chart.update(series),
            None => *slot = Some(ChartHandle::init(canvas, kind, series)),
        });
    });

    on_cleanup(move || {
        handle.update_value(|slot| {
            if let Some(chart) = slot {
                chart.destroy();
            }
        });
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width=width
            height=height
            class="chart-canvas"
        />
    }
}

/// Legend naming each doughnut segment
#[component]
fn ChartLegend(#[prop(into)] series: Signal<ChartSeries>) -> impl IntoView {
    view! {
        <div class="chart-legend">
            {move || {
                series.get()
                    .labels()
                    .iter()
                    .enumerate()
                    .map(|(idx, label)| {
                        let color = SEGMENT_COLORS[idx % SEGMENT_COLORS.len()];
                        view! {
                            <div class="legend-entry">
                                <span
                                    class="legend-swatch"
                                    style=format!("background-color: {}", color)
                                />
                                <span class="legend-label">{label.clone()}</span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, kind: ChartKind, series: &ChartSeries) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Clear canvas
    ctx.set_fill_style(&BACKGROUND_COLOR.into());
    ctx.fill_rect(0.0, 0.0, width, height);

    if series.is_empty() {
        ctx.set_fill_style(&LABEL_COLOR.into());
        ctx.set_font("14px sans-serif");
        let _ = ctx.fill_text("No data available", width / 2.0 - 55.0, height / 2.0);
        return;
    }

    match kind {
        ChartKind::Bar => draw_bars(&ctx, width, height, series),
        ChartKind::Doughnut => draw_doughnut(&ctx, width, height, series),
    }
}

fn draw_bars(ctx: &CanvasRenderingContext2d, width: f64, height: f64, series: &ChartSeries) {
    let margin_left = 40.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 36.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    let max = series.max_value().max(1.0);

    // Horizontal grid lines with y-axis labels
    ctx.set_stroke_style(&GRID_COLOR.into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");

    for i in 0..=4 {
        let y = margin_top + (i as f64 / 4.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = max - (i as f64 / 4.0) * max;
        ctx.set_fill_style(&LABEL_COLOR.into());
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    // Bars with their x-axis labels
    let slot = chart_width / series.len() as f64;
    let bar_width = slot * 0.6;

    for (i, (label, value)) in series
        .labels()
        .iter()
        .zip(series.values().iter())
        .enumerate()
    {
        let x = margin_left + i as f64 * slot + (slot - bar_width) / 2.0;
        let bar_height = (value / max) * chart_height;
        let y = margin_top + chart_height - bar_height;

        ctx.set_fill_style(&BAR_COLOR.into());
        ctx.fill_rect(x, y, bar_width, bar_height);

        ctx.set_fill_style(&LABEL_COLOR.into());
        let _ = ctx.fill_text(label, x, height - 10.0);
    }
}

fn draw_doughnut(ctx: &CanvasRenderingContext2d, width: f64, height: f64, series: &ChartSeries) {
    let total = series.total();
    if total <= 0.0 {
        ctx.set_fill_style(&LABEL_COLOR.into());
        ctx.set_font("14px sans-serif");
        let _ = ctx.fill_text("No data available", width / 2.0 - 55.0, height / 2.0);
        return;
    }

    let cx = width / 2.0;
    let cy = height / 2.0;
    let radius = (width.min(height) / 2.0) - 16.0;

    let mut start = -std::f64::consts::FRAC_PI_2;
    for (idx, value) in series.values().iter().enumerate() {
        let sweep = (value / total) * std::f64::consts::PI * 2.0;
        let color = SEGMENT_COLORS[idx % SEGMENT_COLORS.len()];

        ctx.set_fill_style(&color.into());
        ctx.begin_path();
        ctx.move_to(cx, cy);
        let _ = ctx.arc(cx, cy, radius, start, start + sweep);
        ctx.close_path();
        ctx.fill();

        start += sweep;
    }

    // Punch the hole
    ctx.set_fill_style(&BACKGROUND_COLOR.into());
    ctx.begin_path();
    let _ = ctx.arc(cx, cy, radius * 0.55, 0.0, std::f64::consts::PI * 2.0);
    ctx.fill();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn mismatched_series_is_rejected() {
        let err = ChartSeries::new(labels(&["Mon", "Tue"]), vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            SeriesMismatch {
                labels: 2,
                values: 1
            }
        );
    }

    #[test]
    fn matched_series_keeps_the_pairing() {
        let series = ChartSeries::new(labels(&["Mon", "Tue"]), vec![3.0, 5.0]).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.max_value(), 5.0);
        assert_eq!(series.total(), 8.0);
    }

    #[test]
    fn update_after_destroy_is_a_no_op() {
        let original = ChartSeries::new(labels(&["Visual"]), vec![100.0]).unwrap();
        let mut handle = ChartHandle::detached(ChartKind::Doughnut, original.clone());
        assert!(handle.is_destroyed());

        let replacement = ChartSeries::new(labels(&["Auditory"]), vec![40.0]).unwrap();
        handle.update(replacement);
        assert_eq!(handle.series(), &original);
    }
}
