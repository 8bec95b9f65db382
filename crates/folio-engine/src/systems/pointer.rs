//! Hover micro-interactions: magnetic pull, 3D tilt, glow.

use glam::Vec2;

use crate::api::ops::css_number;
use crate::api::types::PointerSample;

pub const MAGNETIC_RESET: &str = "translate(0px, 0px)";
pub const TILT_RESET: &str = "perspective(1000px) rotateX(0deg) rotateY(0deg)";
pub const GLOW_CLASS: &str = "glowing";

/// How far a magnetic element follows the pointer.
pub fn magnetic_offset(sample: &PointerSample, strength: f32) -> Vec2 {
    sample.offset_from_center() * strength
}

pub fn magnetic_transform(sample: &PointerSample, strength: f32) -> String {
    let offset = magnetic_offset(sample, strength);
    format!("translate({}px, {}px)", css_number(offset.x), css_number(offset.y))
}

/// Tilt angles in degrees: `x` is the rotation about the X axis (pointer above
/// center tilts the top toward the viewer), `y` about the Y axis.
/// None for a zero-sized element.
pub fn tilt_angles(sample: &PointerSample, max_deg: f32) -> Option<Vec2> {
    let half = sample.rect.size() / 2.0;
    if half.x <= 0.0 || half.y <= 0.0 {
        return None;
    }
    let normalized = sample.offset_from_center() / half;
    Some(Vec2::new(-normalized.y, normalized.x) * max_deg)
}

pub fn tilt_transform(sample: &PointerSample, max_deg: f32) -> Option<String> {
    let angles = tilt_angles(sample, max_deg)?;
    Some(format!(
        "perspective(1000px) rotateX({}deg) rotateY({}deg)",
        css_number(angles.x),
        css_number(angles.y)
    ))
}
