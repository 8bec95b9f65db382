// extensions/easing.rs
//
// Easing curves for numeric count-ups, selectable from markup with `data-easing`.
// Pure math, no page state.

/// Easing curve applied to a normalized progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant rate.
    Linear,
    /// Fast start, long slow finish. Used by the stat counters.
    #[default]
    QuartOut,
    /// Slow at both ends.
    QuartInOut,
}

impl Easing {
    /// Apply the curve to `t`, clamped to [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
            Easing::QuartInOut => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
        }
    }

    /// Parse a curve name as used in markup (`linear`, `easeOutQuart`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "linear" => Some(Easing::Linear),
            "easeOutQuart" | "ease-out-quart" => Some(Easing::QuartOut),
            "easeInOutQuart" | "ease-in-out-quart" => Some(Easing::QuartInOut),
            _ => None,
        }
    }
}
