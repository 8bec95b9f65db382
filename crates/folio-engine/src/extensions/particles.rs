// extensions/particles.rs
//
// Decorative floating particles behind the hero section.
// The engine rolls each particle's look; CSS keyframes do the moving.
//
// Usage:
//   let mut field = ParticleField::new(config, seed);
//   for spec in field.populate() { attach(spec.style()) }
//   // every `lifetime_ms`, per particle: detach it, attach field.spawn()

use serde::{Deserialize, Serialize};

use super::rng::Rng;
use crate::api::ops::css_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: u32,
    /// How long a particle lives before it is replaced by a fresh one.
    pub lifetime_ms: u32,
    /// Fixed RNG seed. 0 means seed from the clock.
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            lifetime_ms: 8000,
            seed: 0,
        }
    }
}

/// Look of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpec {
    /// Position inside the container, in percent.
    pub left_pct: f32,
    pub top_pct: f32,
    /// Width and height, 2-6px.
    pub size_px: f32,
    /// Keyframe animation length, 3-6s.
    pub duration_s: f32,
    /// Keyframe animation delay, 0-2s.
    pub delay_s: f32,
    /// 0.3-0.8.
    pub opacity: f32,
}

pub const PARTICLE_CLASS: &str = "particle";

impl ParticleSpec {
    /// Inline style properties as (name, value) pairs.
    pub fn style(&self) -> [(&'static str, String); 7] {
        [
            ("left", format!("{}%", css_number(self.left_pct))),
            ("top", format!("{}%", css_number(self.top_pct))),
            ("width", format!("{}px", css_number(self.size_px))),
            ("height", format!("{}px", css_number(self.size_px))),
            ("animation-duration", format!("{}s", css_number(self.duration_s))),
            ("animation-delay", format!("{}s", css_number(self.delay_s))),
            ("opacity", css_number(self.opacity)),
        ]
    }
}

pub struct ParticleField {
    config: ParticleConfig,
    rng: Rng,
}

impl ParticleField {
    /// `fallback_seed` is used when the config does not pin one.
    pub fn new(config: ParticleConfig, fallback_seed: u64) -> Self {
        let seed = if config.seed != 0 { config.seed } else { fallback_seed };
        Self {
            config,
            rng: Rng::new(seed),
        }
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn spawn(&mut self) -> ParticleSpec {
        let rng = &mut self.rng;
        ParticleSpec {
            left_pct: rng.range(0.0, 100.0),
            top_pct: rng.range(0.0, 100.0),
            size_px: rng.range(2.0, 6.0),
            duration_s: rng.range(3.0, 6.0),
            delay_s: rng.range(0.0, 2.0),
            opacity: rng.range(0.3, 0.8),
        }
    }

    /// The initial set of `count` particles.
    pub fn populate(&mut self) -> Vec<ParticleSpec> {
        (0..self.config.count).map(|_| self.spawn()).collect()
    }
}

/// Whether the field runs at all on this page.
pub fn particles_enabled(reduced_motion: bool, shows_particles: bool) -> bool {
    !reduced_motion && shows_particles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populates_configured_count() {
        let mut field = ParticleField::new(ParticleConfig::default(), 9);
        assert_eq!(field.populate().len(), 50);
    }

    #[test]
    fn specs_stay_in_range() {
        let mut field = ParticleField::new(ParticleConfig::default(), 12345);
        for spec in field.populate() {
            assert!((0.0..100.0).contains(&spec.left_pct));
            assert!((0.0..100.0).contains(&spec.top_pct));
            assert!((2.0..=6.0).contains(&spec.size_px));
            assert!((3.0..=6.0).contains(&spec.duration_s));
            assert!((0.0..=2.0).contains(&spec.delay_s));
            assert!((0.3..=0.8).contains(&spec.opacity));
        }
    }

    #[test]
    fn pinned_seed_overrides_fallback() {
        let config = ParticleConfig { seed: 77, ..ParticleConfig::default() };
        let a = ParticleField::new(config, 1).spawn();
        let b = ParticleField::new(config, 2).spawn();
        assert_eq!(a, b);
    }

    #[test]
    fn style_uses_css_units() {
        let spec = ParticleSpec {
            left_pct: 12.5,
            top_pct: 40.0,
            size_px: 3.0,
            duration_s: 4.25,
            delay_s: 0.0,
            opacity: 0.5,
        };
        let style = spec.style();
        assert_eq!(style[0], ("left", "12.5%".to_string()));
        assert_eq!(style[3], ("height", "3px".to_string()));
        assert_eq!(style[4], ("animation-duration", "4.25s".to_string()));
        assert_eq!(style[6], ("opacity", "0.5".to_string()));
    }

    #[test]
    fn disabled_under_reduced_motion_or_on_phones() {
        assert!(particles_enabled(false, true));
        assert!(!particles_enabled(true, true));
        assert!(!particles_enabled(false, false));
    }
}
