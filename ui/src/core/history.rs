//! Score-history samples and the deterministic trend-chart geometry: point
//! mapping, the simplified cubic smoothing, grid/label placement, and a
//! numeric path-length measure for the animated reveal.

use serde::{Deserialize, Serialize};

/// One sample from `/api/repos/{owner}/{repo}/history`. Unknown fields are
/// ignored; everything except the score is optional metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    pub score_total: i64,
    #[serde(default)]
    pub commit_short: Option<String>,
    #[serde(default)]
    pub delta: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub commit_sha: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistorySample>,
}

pub const CHART_WIDTH: f64 = 1020.0;
pub const CHART_HEIGHT: f64 = 300.0;
pub const CHART_PAD_X: f64 = 42.0;
pub const CHART_PAD_Y: f64 = 32.0;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Grid lines and y-axis labels sit at these score values.
pub const GRID_SCORES: [i64; 5] = [0, 25, 50, 75, 100];

/// x position of sample `i` out of `n`, linear in index.
pub fn point_x(i: usize, n: usize) -> f64 {
    debug_assert!(n >= 2);
    CHART_PAD_X + i as f64 * (CHART_WIDTH - 2.0 * CHART_PAD_X) / (n as f64 - 1.0)
}

/// Inverted linear map: score 100 at the top, score 0 on the baseline.
pub fn point_y(score: i64) -> f64 {
    let clamped = (score as f64).clamp(SCORE_MIN, SCORE_MAX);
    CHART_HEIGHT
        - CHART_PAD_Y
        - (clamped - SCORE_MIN) * (CHART_HEIGHT - 2.0 * CHART_PAD_Y) / (SCORE_MAX - SCORE_MIN)
}

pub fn baseline_y() -> f64 {
    CHART_HEIGHT - CHART_PAD_Y
}

/// Computed geometry for one history. `None` when there are not enough
/// samples to draw a line (the view renders its fallback state instead).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub points: Vec<(f64, f64)>,
    pub line_path: String,
    pub area_path: String,
    pub path_length: f64,
    pub label_stride: usize,
}

impl ChartGeometry {
    pub fn build(samples: &[HistorySample]) -> Option<Self> {
        if samples.len() < 2 {
            return None;
        }
        let n = samples.len();
        let points: Vec<(f64, f64)> = samples
            .iter()
            .enumerate()
            .map(|(i, sample)| (point_x(i, n), point_y(sample.score_total)))
            .collect();

        let line_path = line_path(&points);
        let area_path = area_path(&points, &line_path);

        Some(Self {
            path_length: path_length(&points),
            line_path,
            area_path,
            label_stride: label_stride(n),
            points,
        })
    }

    /// Whether the x-axis label for sample `i` is drawn. One label per
    /// stride, and the most recent sample is always labeled.
    pub fn labeled(&self, i: usize) -> bool {
        i == self.points.len() - 1 || i % self.label_stride == 0
    }
}

/// Smoothed path: consecutive points joined by a cubic whose control points
/// sit at the horizontal midpoint, each keeping its own endpoint's y. A
/// deliberate simplification, not a spline fit.
fn line_path(points: &[(f64, f64)]) -> String {
    let (x0, y0) = points[0];
    let mut path = format!("M {} {}", fmt(x0), fmt(y0));
    for window in points.windows(2) {
        let (xa, ya) = window[0];
        let (xb, yb) = window[1];
        let mid = (xa + xb) / 2.0;
        path.push_str(&format!(
            " C {} {} {} {} {} {}",
            fmt(mid),
            fmt(ya),
            fmt(mid),
            fmt(yb),
            fmt(xb),
            fmt(yb)
        ));
    }
    path
}

/// The smoothed line closed down to the baseline and back.
fn area_path(points: &[(f64, f64)], line: &str) -> String {
    let first_x = points[0].0;
    let last_x = points[points.len() - 1].0;
    let base = baseline_y();
    format!(
        "{line} L {} {} L {} {} Z",
        fmt(last_x),
        fmt(base),
        fmt(first_x),
        fmt(base)
    )
}

/// Show one x label every `ceil(n / 9)` samples.
pub fn label_stride(n: usize) -> usize {
    n.div_ceil(9).max(1)
}

/// Total length of the smoothed line, measured by flattening each cubic.
/// Replaces the DOM's `getTotalLength` so the reveal animation stays
/// deterministic and testable off-browser.
fn path_length(points: &[(f64, f64)]) -> f64 {
    const STEPS: usize = 24;
    let mut total = 0.0;
    for window in points.windows(2) {
        let (xa, ya) = window[0];
        let (xb, yb) = window[1];
        let mid = (xa + xb) / 2.0;
        let mut prev = (xa, ya);
        for step in 1..=STEPS {
            let t = step as f64 / STEPS as f64;
            let point = cubic_at(t, (xa, ya), (mid, ya), (mid, yb), (xb, yb));
            total += ((point.0 - prev.0).powi(2) + (point.1 - prev.1).powi(2)).sqrt();
            prev = point;
        }
    }
    total
}

fn cubic_at(
    t: f64,
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
) -> (f64, f64) {
    let u = 1.0 - t;
    let coeff = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    (
        coeff.0 * p0.0 + coeff.1 * p1.0 + coeff.2 * p2.0 + coeff.3 * p3.0,
        coeff.0 * p0.1 + coeff.1 * p1.1 + coeff.2 * p2.1 + coeff.3 * p3.1,
    )
}

/// Marker tooltip: short commit, score, and the signed delta with an
/// explicit `+` for gains.
pub fn tooltip(sample: &HistorySample) -> String {
    let commit = sample.commit_short.as_deref().unwrap_or("n/a");
    format!(
        "{commit} · score {} · {}",
        sample.score_total,
        format_delta(sample.delta)
    )
}

pub fn format_delta(delta: i64) -> String {
    if delta > 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}

/// Coordinates keep at most two decimals, with trailing zeros trimmed, so
/// path strings stay stable and readable.
fn fmt(value: f64) -> String {
    let mut text = format!("{value:.2}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}
