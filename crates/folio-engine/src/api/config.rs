use serde::{Deserialize, Serialize};

use crate::api::types::Family;
use crate::extensions::nav::NavConfig;
use crate::extensions::particles::ParticleConfig;
use crate::extensions::typing::TypingTimings;

/// Which effect families are present on a page.
///
/// One coordinator serves every page; pages that lack a family switch it off
/// here instead of shipping their own copy of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// `data-animate` fade/scale/slide reveals.
    pub reveal: bool,
    /// `.scroll-animate*` class reveals.
    pub scroll_reveal: bool,
    /// Parallax, floating elements and the progress bar.
    pub scroll_effects: bool,
    /// Magnetic, tilt and glow hover effects.
    pub pointer: bool,
    /// Clip-path morphing shapes.
    pub morph: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            reveal: true,
            scroll_reveal: true,
            scroll_effects: true,
            pointer: true,
            morph: true,
        }
    }
}

impl Capabilities {
    /// Whether the watcher for `family` should exist at all.
    pub fn watches(&self, family: Family) -> bool {
        match family {
            Family::Fade | Family::Scale | Family::Slide => self.reveal,
            Family::ScrollReveal => self.scroll_reveal,
        }
    }
}

/// Activation condition of one visibility watcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherOptions {
    /// Fraction of the element that must be visible (0.0-1.0).
    pub threshold: f32,
    /// CSS margin applied to the viewport before intersecting.
    pub root_margin: String,
}

impl Default for WatcherOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px".to_string(),
        }
    }
}

impl WatcherOptions {
    pub fn new(threshold: f32, root_margin: &str) -> Self {
        Self {
            threshold,
            root_margin: root_margin.to_string(),
        }
    }

    /// Stock options for a family: fade and generic reveals pull the bottom edge in by 50px.
    pub fn for_family(family: Family) -> Self {
        match family {
            Family::Fade => Self::new(0.1, "0px 0px -50px 0px"),
            Family::Scale => Self::new(0.2, "0px"),
            Family::Slide => Self::new(0.15, "0px"),
            Family::ScrollReveal => Self::new(0.1, "0px 0px -50px 0px"),
        }
    }
}

/// Watcher options per family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    pub fade: WatcherOptions,
    pub scale: WatcherOptions,
    pub slide: WatcherOptions,
    pub scroll_reveal: WatcherOptions,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            fade: WatcherOptions::for_family(Family::Fade),
            scale: WatcherOptions::for_family(Family::Scale),
            slide: WatcherOptions::for_family(Family::Slide),
            scroll_reveal: WatcherOptions::for_family(Family::ScrollReveal),
        }
    }
}

impl WatcherConfig {
    pub fn get(&self, family: Family) -> &WatcherOptions {
        match family {
            Family::Fade => &self.fade,
            Family::Scale => &self.scale,
            Family::Slide => &self.slide,
            Family::ScrollReveal => &self.scroll_reveal,
        }
    }
}

/// Default reveal durations (ms) when an element carries no `data-duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealDefaults {
    pub fade_ms: u32,
    pub scale_ms: u32,
    pub slide_ms: u32,
}

impl Default for RevealDefaults {
    fn default() -> Self {
        Self {
            fade_ms: 800,
            scale_ms: 600,
            slide_ms: 700,
        }
    }
}

impl RevealDefaults {
    pub fn duration_for(&self, family: Family) -> u32 {
        match family {
            Family::Fade => self.fade_ms,
            Family::Scale => self.scale_ms,
            Family::Slide => self.slide_ms,
            Family::ScrollReveal => 0,
        }
    }
}

/// Hover effect constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Fraction of the pointer's offset from center that magnetic elements follow.
    pub magnetic_strength: f32,
    /// Tilt angle (degrees) at the element's edge.
    pub tilt_max_deg: f32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            magnetic_strength: 0.3,
            tilt_max_deg: 10.0,
        }
    }
}

/// Full per-page configuration, loaded from JSON at startup.
/// Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub capabilities: Capabilities,
    pub watchers: WatcherConfig,
    pub reveal: RevealDefaults,
    pub pointer: PointerConfig,
    /// Interval between shape-morph steps.
    pub morph_period_ms: u32,
    pub typing: TypingTimings,
    pub particles: ParticleConfig,
    pub nav: NavConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            capabilities: Capabilities::default(),
            watchers: WatcherConfig::default(),
            reveal: RevealDefaults::default(),
            pointer: PointerConfig::default(),
            morph_period_ms: 3000,
            typing: TypingTimings::default(),
            particles: ParticleConfig::default(),
            nav: NavConfig::default(),
        }
    }
}

impl PageConfig {
    /// Parse a config from JSON. Blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json)
    }
}
