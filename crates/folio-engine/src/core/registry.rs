use crate::api::config::RevealDefaults;
use crate::api::types::{Direction, ElementId, Family};

/// Raw per-element override attributes, as read from the markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevealAttrs<'a> {
    pub delay: Option<&'a str>,
    pub duration: Option<&'a str>,
    pub direction: Option<&'a str>,
}

/// Typed reveal parameters, resolved once per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealConfig {
    pub delay_ms: u32,
    pub duration_ms: u32,
    pub direction: Direction,
}

impl RevealConfig {
    /// Family defaults: no delay, stock duration, slide from the right.
    pub fn defaults(family: Family, defaults: &RevealDefaults) -> Self {
        Self {
            delay_ms: 0,
            duration_ms: defaults.duration_for(family),
            direction: Direction::default(),
        }
    }

    /// Resolve overrides. Values that are not non-negative integers fall back
    /// to the family defaults without complaint.
    pub fn from_attrs(family: Family, attrs: &RevealAttrs<'_>, defaults: &RevealDefaults) -> Self {
        let base = Self::defaults(family, defaults);
        Self {
            delay_ms: parse_ms(attrs.delay).unwrap_or(base.delay_ms),
            duration_ms: parse_ms(attrs.duration).unwrap_or(base.duration_ms),
            direction: Direction::from_attr(attrs.direction),
        }
    }
}

fn parse_ms(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse().ok()
}

/// Parallax speed from a `data-parallax` value.
/// Missing, unparsable or zero speeds become 0.5.
pub fn parallax_speed(raw: Option<&str>) -> f32 {
    const FALLBACK: f32 = 0.5;
    match raw.and_then(|r| r.trim().parse::<f32>().ok()) {
        Some(speed) if speed.is_finite() && speed != 0.0 => speed,
        _ => FALLBACK,
    }
}

/// Speed assigned to the `index`-th layer of a parallax section.
pub fn layer_speed(index: usize) -> f32 {
    (index + 1) as f32 * 0.2
}

/// What an element is tagged for. One element may carry several triggers.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// One-shot reveal run by an effect executor.
    Reveal { family: Family, config: RevealConfig },
    /// One-shot reveal done by adding a marker class.
    ScrollReveal,
    /// Moves against the scroll at `speed`.
    Parallax { speed: f32 },
    /// Bobs in a sine wave; its phase is its position among floating elements.
    Floating,
    /// Scroll progress bar.
    Progress,
    Magnetic,
    Tilt,
    Glow,
    Morph,
}

/// Discriminant of a `Trigger`, for lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    Reveal,
    ScrollReveal,
    Parallax,
    Floating,
    Progress,
    Magnetic,
    Tilt,
    Glow,
    Morph,
}

impl Trigger {
    pub fn kind(&self) -> TriggerKind {
        match self {
            Trigger::Reveal { .. } => TriggerKind::Reveal,
            Trigger::ScrollReveal => TriggerKind::ScrollReveal,
            Trigger::Parallax { .. } => TriggerKind::Parallax,
            Trigger::Floating => TriggerKind::Floating,
            Trigger::Progress => TriggerKind::Progress,
            Trigger::Magnetic => TriggerKind::Magnetic,
            Trigger::Tilt => TriggerKind::Tilt,
            Trigger::Glow => TriggerKind::Glow,
            Trigger::Morph => TriggerKind::Morph,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    element: ElementId,
    trigger: Trigger,
}

/// Flat table of tagged elements, in registration (document) order.
/// Sized for a page's worth of elements, not thousands.
#[derive(Debug, Default)]
pub struct TriggerRegistry {
    entries: Vec<Entry>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(64),
        }
    }

    /// Tag an element. Re-registering the same kind replaces the earlier entry.
    /// Returns true if this is a new (element, kind) pair.
    pub fn register(&mut self, element: ElementId, trigger: Trigger) -> bool {
        let kind = trigger.kind();
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.element == element && e.trigger.kind() == kind)
        {
            entry.trigger = trigger;
            return false;
        }
        self.entries.push(Entry { element, trigger });
        true
    }

    pub fn has(&self, element: ElementId, kind: TriggerKind) -> bool {
        self.entries
            .iter()
            .any(|e| e.element == element && e.trigger.kind() == kind)
    }

    /// The reveal family and parameters of an element, if it has one.
    pub fn reveal(&self, element: ElementId) -> Option<(Family, RevealConfig)> {
        self.entries.iter().find_map(|e| match e.trigger {
            Trigger::Reveal { family, config } if e.element == element => Some((family, config)),
            _ => None,
        })
    }

    pub fn reveals(&self) -> impl Iterator<Item = (ElementId, Family, RevealConfig)> + '_ {
        self.entries.iter().filter_map(|e| match e.trigger {
            Trigger::Reveal { family, config } => Some((e.element, family, config)),
            _ => None,
        })
    }

    /// Every element carrying a trigger of `kind`, in registration order.
    pub fn of_kind(&self, kind: TriggerKind) -> impl Iterator<Item = ElementId> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.trigger.kind() == kind)
            .map(|e| e.element)
    }

    pub fn parallax(&self) -> impl Iterator<Item = (ElementId, f32)> + '_ {
        self.entries.iter().filter_map(|e| match e.trigger {
            Trigger::Parallax { speed } => Some((e.element, speed)),
            _ => None,
        })
    }

    /// The first registered progress bar. Only one is driven.
    pub fn progress_bar(&self) -> Option<ElementId> {
        self.of_kind(TriggerKind::Progress).next()
    }

    /// Every trigger of one element.
    pub fn triggers_of(&self, element: ElementId) -> impl Iterator<Item = &Trigger> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.element == element)
            .map(|e| &e.trigger)
    }

    /// Every (element, trigger) pair in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Trigger)> + '_ {
        self.entries.iter().map(|e| (e.element, &e.trigger))
    }

    /// Forget an element entirely. Returns how many triggers it had.
    pub fn remove_element(&mut self, element: ElementId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.element != element);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs<'a>(delay: Option<&'a str>, duration: Option<&'a str>, direction: Option<&'a str>) -> RevealAttrs<'a> {
        RevealAttrs { delay, duration, direction }
    }

    #[test]
    fn reveal_config_defaults_per_family() {
        let d = RevealDefaults::default();
        let none = RevealAttrs::default();
        assert_eq!(RevealConfig::from_attrs(Family::Fade, &none, &d).duration_ms, 800);
        assert_eq!(RevealConfig::from_attrs(Family::Scale, &none, &d).duration_ms, 600);
        assert_eq!(RevealConfig::from_attrs(Family::Slide, &none, &d).duration_ms, 700);
        assert_eq!(RevealConfig::from_attrs(Family::Slide, &none, &d).delay_ms, 0);
    }

    #[test]
    fn reveal_config_reads_overrides() {
        let d = RevealDefaults::default();
        let cfg = RevealConfig::from_attrs(Family::Slide, &attrs(Some("200"), Some(" 450 "), Some("left")), &d);
        assert_eq!(cfg.delay_ms, 200);
        assert_eq!(cfg.duration_ms, 450);
        assert_eq!(cfg.direction, Direction::Left);
    }

    #[test]
    fn malformed_overrides_fall_back() {
        let d = RevealDefaults::default();
        let cfg = RevealConfig::from_attrs(Family::Fade, &attrs(Some("soon"), Some("-5"), Some("")), &d);
        assert_eq!(cfg.delay_ms, 0);
        assert_eq!(cfg.duration_ms, 800);
        assert_eq!(cfg.direction, Direction::Right);
    }

    #[test]
    fn parallax_speed_fallbacks() {
        assert_eq!(parallax_speed(Some("0.8")), 0.8);
        assert_eq!(parallax_speed(Some("0")), 0.5);
        assert_eq!(parallax_speed(Some("fast")), 0.5);
        assert_eq!(parallax_speed(None), 0.5);
        assert_eq!(parallax_speed(Some("-0.3")), -0.3);
    }

    #[test]
    fn layer_speeds_step_by_a_fifth() {
        assert!((layer_speed(0) - 0.2).abs() < 1e-6);
        assert!((layer_speed(2) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn elements_can_carry_several_triggers() {
        let mut reg = TriggerRegistry::new();
        let el = ElementId(3);
        assert!(reg.register(el, Trigger::Magnetic));
        assert!(reg.register(el, Trigger::Glow));
        assert!(!reg.register(el, Trigger::Magnetic));
        assert_eq!(reg.len(), 2);
        assert!(reg.has(el, TriggerKind::Glow));
        assert!(!reg.has(el, TriggerKind::Tilt));
    }

    #[test]
    fn reregistering_replaces_parameters() {
        let mut reg = TriggerRegistry::new();
        let el = ElementId(1);
        reg.register(el, Trigger::Parallax { speed: 0.2 });
        reg.register(el, Trigger::Parallax { speed: 0.4 });
        let speeds: Vec<f32> = reg.parallax().map(|(_, s)| s).collect();
        assert_eq!(speeds, vec![0.4]);
    }

    #[test]
    fn floating_keeps_registration_order() {
        let mut reg = TriggerRegistry::new();
        reg.register(ElementId(9), Trigger::Floating);
        reg.register(ElementId(2), Trigger::Magnetic);
        reg.register(ElementId(4), Trigger::Floating);
        let order: Vec<ElementId> = reg.of_kind(TriggerKind::Floating).collect();
        assert_eq!(order, vec![ElementId(9), ElementId(4)]);
    }

    #[test]
    fn remove_element_drops_all_its_triggers() {
        let mut reg = TriggerRegistry::new();
        reg.register(ElementId(1), Trigger::Tilt);
        reg.register(ElementId(1), Trigger::Morph);
        reg.register(ElementId(2), Trigger::Progress);
        assert_eq!(reg.remove_element(ElementId(1)), 2);
        assert_eq!(reg.progress_bar(), Some(ElementId(2)));
        assert_eq!(reg.triggers_of(ElementId(1)).count(), 0);
    }
}
