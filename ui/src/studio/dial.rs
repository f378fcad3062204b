//! Score dial: a circular gauge that counts up to the latest total score
//! with an ease-out sweep, pinning the exact target when the sweep ends.

use dioxus::prelude::*;

use crate::core::motion::{ease_out_cubic, MotionPolicy, DIAL_DURATION_MS};
use crate::core::timing;

const RADIUS: f64 = 52.0;

#[component]
pub fn ScoreDial(score: i64, motion: MotionPolicy) -> Element {
    let target = score.clamp(0, 100);

    let mut shown = use_signal(|| 0i64);
    let mut sweep = use_signal(|| 0.0f64);
    let mut animated_for = use_signal(|| Option::<i64>::None);

    if animated_for() != Some(target) {
        animated_for.set(Some(target));
        if motion.animations_enabled() {
            shown.set(0);
            sweep.set(0.0);
            spawn(async move {
                let started = timing::now_ms();
                loop {
                    timing::frame_tick().await;
                    let progress =
                        ((timing::now_ms() - started) / DIAL_DURATION_MS).clamp(0.0, 1.0);
                    let eased = ease_out_cubic(progress);
                    if progress >= 1.0 {
                        // Land on the exact target, not the last eased frame.
                        shown.set(target);
                        sweep.set(target as f64 / 100.0);
                        break;
                    }
                    shown.set((target as f64 * eased).round() as i64);
                    sweep.set(target as f64 / 100.0 * eased);
                }
            });
        } else {
            shown.set(target);
            sweep.set(target as f64 / 100.0);
        }
    }

    let circumference = 2.0 * std::f64::consts::PI * RADIUS;
    let dash = circumference * sweep();
    let gap = circumference - dash;

    rsx! {
        div { class: "score-dial score-dial--{grade(target)}",
            svg {
                class: "score-dial__svg",
                view_box: "0 0 128 128",
                role: "img",
                "aria-label": "Total score {target} out of 100",

                circle {
                    class: "score-dial__track",
                    cx: "64",
                    cy: "64",
                    r: "{RADIUS}",
                    fill: "none",
                }
                circle {
                    class: "score-dial__fill",
                    cx: "64",
                    cy: "64",
                    r: "{RADIUS}",
                    fill: "none",
                    transform: "rotate(-90 64 64)",
                    stroke_dasharray: "{dash} {gap}",
                }
            }
            span { class: "score-dial__value", "{shown()}" }
        }
    }
}

/// CSS modifier for the dial's color band. The 80/50 cut-offs are purely
/// presentational; the reporting service attaches no meaning to them.
fn grade(score: i64) -> &'static str {
    match score {
        80..=100 => "pass",
        50..=79 => "warn",
        _ => "fail",
    }
}
