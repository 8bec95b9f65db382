//! Continuous scroll-driven effects: parallax, floating wave, progress bar.

use crate::api::ops::{css_number, OpBuffer, StyleProp};
use crate::api::types::ScrollMetrics;
use crate::core::registry::{TriggerKind, TriggerRegistry};

/// Coalesces scroll events into at most one pending frame update.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    pub fn new() -> Self {
        Self { pending: false }
    }

    /// Ask for a frame. True only if none is pending, i.e. the caller should
    /// schedule one.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// The scheduled frame ran.
    pub fn complete(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Vertical offset of a parallax element.
pub fn parallax_offset(scroll_y: f32, speed: f32) -> f32 {
    -(scroll_y * speed)
}

/// Vertical offset of the `index`-th floating element.
pub fn floating_offset(scroll_y: f32, index: usize) -> f32 {
    (scroll_y * 0.01 + index as f32).sin() * 10.0
}

/// Scroll progress in percent. A page that cannot scroll reports 0.
pub fn progress_percent(metrics: &ScrollMetrics) -> f32 {
    let scrollable = metrics.scrollable_height();
    if scrollable <= 0.0 || !scrollable.is_finite() {
        return 0.0;
    }
    metrics.scroll_y / scrollable * 100.0
}

pub fn translate_y(px: f32) -> String {
    format!("translateY({}px)", css_number(px))
}

/// Recompute every scroll-derived style for one frame.
/// Order is fixed: parallax, floating, progress.
pub fn update_scroll_effects(registry: &TriggerRegistry, metrics: &ScrollMetrics, ops: &mut OpBuffer) {
    let scroll_y = metrics.scroll_y;

    for (element, speed) in registry.parallax() {
        ops.set_style(element, StyleProp::Transform, translate_y(parallax_offset(scroll_y, speed)));
    }

    for (index, element) in registry.of_kind(TriggerKind::Floating).enumerate() {
        ops.set_style(element, StyleProp::Transform, translate_y(floating_offset(scroll_y, index)));
    }

    if let Some(bar) = registry.progress_bar() {
        ops.set_style(bar, StyleProp::Width, format!("{}%", css_number(progress_percent(metrics))));
    }
}
