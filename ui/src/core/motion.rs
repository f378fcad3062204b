//! Shared motion policy consulted by every animator, plus the easing curves
//! and fixed durations they use.

/// Whether animations run. One detection point instead of per-element
/// branching; components receive the policy at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPolicy {
    #[default]
    Full,
    Reduced,
}

impl MotionPolicy {
    /// Detect the host preference. On the web this reads the
    /// `prefers-reduced-motion` media query; native builds default to full
    /// motion.
    pub fn detect() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let reduced = web_sys::window()
                .and_then(|window| {
                    window
                        .match_media("(prefers-reduced-motion: reduce)")
                        .ok()
                        .flatten()
                })
                .map(|query| query.matches())
                .unwrap_or(false);
            if reduced {
                return MotionPolicy::Reduced;
            }
        }
        MotionPolicy::Full
    }

    pub fn animations_enabled(self) -> bool {
        self == MotionPolicy::Full
    }
}

/// Count-up window for the score dial.
pub const DIAL_DURATION_MS: f64 = 1200.0;

/// Stroke-reveal window for the trend chart.
pub const CHART_REVEAL_MS: f64 = 900.0;

/// `f(p) = 1 − (1−p)³`, the dial's cubic ease-out.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_cubic_hits_both_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert_eq!(ease_out_cubic(-1.0), 0.0);
    }

    #[test]
    fn ease_out_cubic_is_monotonic_and_front_loaded() {
        let quarter = ease_out_cubic(0.25);
        let half = ease_out_cubic(0.5);
        assert!(quarter < half);
        assert!(half > 0.5, "ease-out spends its speed early");
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-9);
    }

    #[test]
    fn reduced_policy_disables_animation() {
        assert!(MotionPolicy::Full.animations_enabled());
        assert!(!MotionPolicy::Reduced.animations_enabled());
    }
}
