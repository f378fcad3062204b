//! Trend chart component: renders the smoothed score history as SVG and
//! reveals the line by animating its dash offset from the measured path
//! length down to zero.

use dioxus::prelude::*;

use crate::core::history::{
    baseline_y, point_y, ChartGeometry, HistorySample, CHART_HEIGHT, CHART_PAD_X, CHART_WIDTH,
    GRID_SCORES,
};
use crate::core::motion::{MotionPolicy, CHART_REVEAL_MS};
use crate::core::{history, timing};

#[component]
pub fn TrendChart(samples: Vec<HistorySample>, motion: MotionPolicy) -> Element {
    let geometry = ChartGeometry::build(&samples);

    let mut dash_offset = use_signal(|| 0.0f64);
    // Keyed by the path string so a new history restarts the reveal exactly
    // once and re-renders never do.
    let mut revealed_path = use_signal(|| Option::<String>::None);

    if let Some(geometry) = &geometry {
        if revealed_path().as_deref() != Some(geometry.line_path.as_str()) {
            revealed_path.set(Some(geometry.line_path.clone()));
            let total = geometry.path_length;
            if motion.animations_enabled() {
                dash_offset.set(total);
                spawn(async move {
                    let started = timing::now_ms();
                    loop {
                        timing::frame_tick().await;
                        let progress =
                            ((timing::now_ms() - started) / CHART_REVEAL_MS).clamp(0.0, 1.0);
                        dash_offset.set(total * (1.0 - progress));
                        if progress >= 1.0 {
                            break;
                        }
                    }
                });
            } else {
                dash_offset.set(0.0);
            }
        }
    } else if revealed_path().is_some() {
        // History shrank below two points; clear any prior chart state.
        revealed_path.set(None);
        dash_offset.set(0.0);
    }

    let Some(geometry) = geometry else {
        return rsx! {
            div { class: "trend-chart trend-chart--empty",
                p { "Not enough history yet. Two scored scans are needed to draw a trend." }
            }
        };
    };

    let offset = dash_offset();

    rsx! {
        div { class: "trend-chart",
            svg {
                class: "trend-chart__svg",
                view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
                preserve_aspect_ratio: "xMidYMid meet",
                role: "img",
                "aria-label": "Score history",

                for score in GRID_SCORES {
                    line {
                        class: "trend-chart__grid",
                        x1: "{CHART_PAD_X}",
                        x2: "{CHART_WIDTH - CHART_PAD_X}",
                        y1: "{point_y(score)}",
                        y2: "{point_y(score)}",
                    }
                    text {
                        class: "trend-chart__axis-label",
                        x: "{CHART_PAD_X - 10.0}",
                        y: "{point_y(score) + 4.0}",
                        text_anchor: "end",
                        "{score}"
                    }
                }

                path { class: "trend-chart__area", d: "{geometry.area_path}" }
                path {
                    class: "trend-chart__line",
                    d: "{geometry.line_path}",
                    fill: "none",
                    stroke_dasharray: "{geometry.path_length}",
                    stroke_dashoffset: "{offset}",
                }

                for (i, point) in geometry.points.iter().enumerate() {
                    circle {
                        class: "trend-chart__marker",
                        cx: "{point.0}",
                        cy: "{point.1}",
                        r: "4",
                        title { "{history::tooltip(&samples[i])}" }
                    }
                    if geometry.labeled(i) {
                        text {
                            class: "trend-chart__x-label",
                            x: "{point.0}",
                            y: "{baseline_y() + 22.0}",
                            text_anchor: "middle",
                            "{x_label(&samples[i], i)}"
                        }
                    }
                }
            }
        }
    }
}

fn x_label(sample: &HistorySample, index: usize) -> String {
    sample
        .commit_short
        .clone()
        .unwrap_or_else(|| format!("#{}", index + 1))
}
