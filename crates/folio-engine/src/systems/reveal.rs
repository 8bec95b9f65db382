//! Effect executors for one-shot reveals.
//!
//! These only write ops. Timing (delays, reduced motion) is decided by the
//! coordinator, which calls `prime` at startup and `apply_transition` /
//! `apply_terminal` when an element is revealed.

use crate::api::ops::{css_number, OpBuffer, StyleProp};
use crate::api::types::{Direction, ElementId, Family};
use crate::core::registry::RevealConfig;

/// Marker class added to generic scroll-reveal elements.
pub const REVEALED_CLASS: &str = "animate";

/// CSS timing function for a family's transform transition.
pub fn transform_timing(family: Family) -> &'static str {
    match family {
        // Overshoots past 1 and settles back.
        Family::Scale => "cubic-bezier(0.175, 0.885, 0.32, 1.275)",
        Family::Slide => "cubic-bezier(0.23, 1, 0.32, 1)",
        Family::Fade | Family::ScrollReveal => "ease-out",
    }
}

/// Full `transition` value for a family at the given duration.
pub fn transition_value(family: Family, duration_ms: u32) -> String {
    format!(
        "opacity {d}ms ease-out, transform {d}ms {timing}",
        d = duration_ms,
        timing = transform_timing(family)
    )
}

/// Resting transform once revealed.
pub fn terminal_transform(family: Family) -> &'static str {
    match family {
        Family::Fade | Family::ScrollReveal => "translateY(0)",
        Family::Scale => "scale(1)",
        Family::Slide => "translateX(0)",
    }
}

/// Hidden starting transform, applied at document-ready.
pub fn initial_transform(family: Family, direction: Direction) -> String {
    match family {
        Family::Fade | Family::ScrollReveal => "translateY(30px)".to_string(),
        Family::Scale => "scale(0.8)".to_string(),
        Family::Slide => format!("translateX({}px)", css_number(direction.start_offset_px())),
    }
}

/// Put an element in its hidden pre-reveal state.
pub fn prime(element: ElementId, family: Family, config: &RevealConfig, ops: &mut OpBuffer) {
    ops.set_style(element, StyleProp::Opacity, "0");
    ops.set_style(element, StyleProp::Transform, initial_transform(family, config.direction));
}

/// Jump straight to the resting state, with no transition.
pub fn apply_terminal(element: ElementId, family: Family, ops: &mut OpBuffer) {
    ops.set_style(element, StyleProp::Opacity, "1");
    ops.set_style(element, StyleProp::Transform, terminal_transform(family));
}

/// Set the transition, then flip to the resting state so the browser animates it.
pub fn apply_transition(element: ElementId, family: Family, duration_ms: u32, ops: &mut OpBuffer) {
    ops.set_style(element, StyleProp::Transition, transition_value(family, duration_ms));
    apply_terminal(element, family, ops);
}
