use std::collections::{HashMap, HashSet};

use crate::api::config::PageConfig;
use crate::api::ops::{DomOp, OpBuffer, StyleProp};
use crate::api::types::{ElementId, Family, MotionPreference, PointerSample, Rect, ScrollMetrics};
use crate::core::registry::{RevealConfig, Trigger, TriggerKind, TriggerRegistry};
use crate::core::scheduler::{Scheduler, TimerId};
use crate::core::watcher::VisibilityWatcher;
use crate::systems::morph::MorphState;
use crate::systems::pointer::{self, GLOW_CLASS, MAGNETIC_RESET, TILT_RESET};
use crate::systems::reveal::{self, REVEALED_CLASS};
use crate::systems::scroll::{self, FrameGate};

/// Work the coordinator schedules on its own clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionTask {
    /// A delayed reveal transition.
    Reveal { element: ElementId, family: Family },
    /// One step of a shape morph.
    Morph { element: ElementId },
}

/// A running shape morph: its repeating timer and where it is in the cycle.
#[derive(Debug, Clone, Copy)]
struct MorphHandle {
    timer: TimerId,
    state: MorphState,
}

/// Owns every watcher and timer the page's effects create, and tears them all
/// down together.
///
/// Built once at document-ready with the page config and the reduced-motion
/// preference. The host registers tagged elements, calls `start()`, then
/// forwards events; after each call it drains `drain_ops()` into the document.
pub struct MotionCoordinator {
    config: PageConfig,
    preference: MotionPreference,
    registry: TriggerRegistry,
    watchers: HashMap<Family, VisibilityWatcher>,
    timers: Scheduler<MotionTask>,
    morphs: HashMap<ElementId, MorphHandle>,
    revealed: HashSet<ElementId>,
    frame: FrameGate,
    ops: OpBuffer,
    started: bool,
    destroyed: bool,
}

impl MotionCoordinator {
    pub fn new(config: PageConfig, preference: MotionPreference) -> Self {
        Self {
            config,
            preference,
            registry: TriggerRegistry::new(),
            watchers: HashMap::new(),
            timers: Scheduler::new(),
            morphs: HashMap::new(),
            revealed: HashSet::new(),
            frame: FrameGate::new(),
            ops: OpBuffer::new(),
            started: false,
            destroyed: false,
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn preference(&self) -> MotionPreference {
        self.preference
    }

    pub fn reduced_motion(&self) -> bool {
        self.preference.reduced_motion
    }

    pub fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    pub fn watcher(&self, family: Family) -> Option<&VisibilityWatcher> {
        self.watchers.get(&family)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Number of live timers (delayed reveals plus morphs).
    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn morph_count(&self) -> usize {
        self.morphs.len()
    }

    /// Whether an element has already been revealed (or is about to be).
    pub fn is_revealed(&self, element: ElementId) -> bool {
        self.revealed.contains(&element)
    }

    // -- Setup --

    /// Tag an element. Elements registered after `start()` are activated at once.
    pub fn register(&mut self, element: ElementId, trigger: Trigger) {
        if self.destroyed {
            return;
        }
        if self.registry.register(element, trigger.clone()) && self.started {
            self.activate(element, &trigger);
        }
    }

    /// Create the watchers, prime and observe reveal elements, start morphs.
    pub fn start(&mut self) {
        if self.started || self.destroyed {
            return;
        }
        self.started = true;

        for family in Family::ALL {
            if !self.config.capabilities.watches(family) {
                continue;
            }
            let options = self.config.watchers.get(family).clone();
            self.ops.push(DomOp::Connect {
                family,
                options: options.clone(),
            });
            self.watchers.insert(family, VisibilityWatcher::new(family, options));
        }

        let entries: Vec<(ElementId, Trigger)> = self
            .registry
            .iter()
            .map(|(element, trigger)| (element, trigger.clone()))
            .collect();
        for (element, trigger) in &entries {
            self.activate(*element, trigger);
        }

        log::info!(
            "motion: started with {} triggers, {} watchers, {} morphs (reduced motion: {})",
            self.registry.len(),
            self.watchers.len(),
            self.morphs.len(),
            self.preference.reduced_motion
        );
    }

    fn activate(&mut self, element: ElementId, trigger: &Trigger) {
        match *trigger {
            Trigger::Reveal { family, config } => {
                if !self.config.capabilities.reveal {
                    return;
                }
                reveal::prime(element, family, &config, &mut self.ops);
                self.observe(family, element);
            }
            Trigger::ScrollReveal => self.observe(Family::ScrollReveal, element),
            Trigger::Morph => self.start_morph(element),
            // Scroll and pointer triggers are driven by events; nothing to set up.
            _ => {}
        }
    }

    fn observe(&mut self, family: Family, element: ElementId) {
        if self.revealed.contains(&element) {
            return;
        }
        if let Some(watcher) = self.watchers.get_mut(&family) {
            if watcher.observe(element) {
                self.ops.push(DomOp::Observe { family, element });
            }
        }
    }

    fn stop_observing(&mut self, family: Family, element: ElementId) {
        if let Some(watcher) = self.watchers.get_mut(&family) {
            if watcher.unobserve(element) {
                self.ops.push(DomOp::Unobserve { family, element });
            }
        }
    }

    // -- Visibility --

    /// An intersection notification from the host. One-shot: the first
    /// intersecting notification reveals the element and stops watching it;
    /// later ones are ignored.
    pub fn on_intersection(&mut self, family: Family, element: ElementId, is_intersecting: bool) {
        if self.destroyed || !is_intersecting {
            return;
        }
        let watching = self
            .watchers
            .get(&family)
            .is_some_and(|w| w.is_observing(element));
        if !watching {
            return;
        }
        self.stop_observing(family, element);
        log::debug!("motion: {} reveal of {:?}", family.name(), element);
        self.animate(element, family);
    }

    /// The full-load catch-up pass. Reveals every not-yet-revealed element whose
    /// box already overlaps the viewport, since its watcher may never report it.
    pub fn catch_up_visible(&mut self, rects: &[(ElementId, Rect)], viewport_height: f32) {
        if self.destroyed || !self.config.capabilities.reveal {
            return;
        }
        let mut caught = 0;
        for &(element, rect) in rects {
            let Some((family, _)) = self.registry.reveal(element) else {
                continue;
            };
            if self.revealed.contains(&element) || !rect.overlaps_viewport(viewport_height) {
                continue;
            }
            self.stop_observing(family, element);
            self.animate(element, family);
            caught += 1;
        }
        if caught > 0 {
            log::debug!("motion: load pass revealed {} visible elements", caught);
        }
    }

    // -- Effect executors --

    /// Reveal an element with its family's effect.
    pub fn animate(&mut self, element: ElementId, family: Family) {
        match family {
            Family::Fade => self.animate_fade_in(element),
            Family::Scale => self.animate_scale_in(element),
            Family::Slide => self.animate_slide_in(element),
            Family::ScrollReveal => {
                self.revealed.insert(element);
                self.ops.add_class(element, REVEALED_CLASS);
            }
        }
    }

    pub fn animate_fade_in(&mut self, element: ElementId) {
        self.run_executor(element, Family::Fade);
    }

    pub fn animate_scale_in(&mut self, element: ElementId) {
        self.run_executor(element, Family::Scale);
    }

    pub fn animate_slide_in(&mut self, element: ElementId) {
        self.run_executor(element, Family::Slide);
    }

    fn reveal_config(&self, element: ElementId, family: Family) -> RevealConfig {
        self.registry
            .reveal(element)
            .map(|(_, config)| config)
            .unwrap_or_else(|| RevealConfig::defaults(family, &self.config.reveal))
    }

    fn run_executor(&mut self, element: ElementId, family: Family) {
        if self.destroyed {
            return;
        }
        self.revealed.insert(element);

        if self.preference.reduced_motion {
            reveal::apply_terminal(element, family, &mut self.ops);
            return;
        }

        let config = self.reveal_config(element, family);
        if config.delay_ms == 0 {
            reveal::apply_transition(element, family, config.duration_ms, &mut self.ops);
        } else {
            self.timers.after(
                Some(element),
                config.delay_ms as f64,
                MotionTask::Reveal { element, family },
            );
        }
    }

    // -- Clock --

    /// Move the logical clock to `now_ms` and run whatever came due.
    pub fn advance(&mut self, now_ms: f64) {
        if self.destroyed {
            return;
        }
        for (_, task) in self.timers.advance(now_ms) {
            match task {
                MotionTask::Reveal { element, family } => {
                    let config = self.reveal_config(element, family);
                    reveal::apply_transition(element, family, config.duration_ms, &mut self.ops);
                }
                MotionTask::Morph { element } => {
                    if let Some(handle) = self.morphs.get_mut(&element) {
                        let shape = handle.state.tick();
                        self.ops.set_style(element, StyleProp::ClipPath, shape);
                    }
                }
            }
        }
    }

    /// When the host should next call `advance`.
    pub fn next_deadline(&self) -> Option<f64> {
        self.timers.next_deadline()
    }

    // -- Shape morph --

    fn start_morph(&mut self, element: ElementId) {
        if self.preference.reduced_motion || !self.config.capabilities.morph {
            return;
        }
        if self.morphs.contains_key(&element) {
            return;
        }
        let period = self.config.morph_period_ms as f64;
        let timer = self.timers.every(Some(element), period, MotionTask::Morph { element });
        self.morphs.insert(
            element,
            MorphHandle {
                timer,
                state: MorphState::new(),
            },
        );
    }

    // -- Scroll --

    /// A scroll event. True when the host should request an animation frame
    /// and call `on_frame` from it; bursts of scroll events yield one frame.
    pub fn on_scroll(&mut self) -> bool {
        if self.destroyed || !self.config.capabilities.scroll_effects {
            return false;
        }
        self.frame.request()
    }

    /// The animation frame requested by `on_scroll`.
    pub fn on_frame(&mut self, metrics: &ScrollMetrics) {
        if !self.destroyed && self.config.capabilities.scroll_effects {
            scroll::update_scroll_effects(&self.registry, metrics, &mut self.ops);
        }
        self.frame.complete();
    }

    pub fn frame_pending(&self) -> bool {
        self.frame.is_pending()
    }

    // -- Pointer --

    fn pointer_active(&self) -> bool {
        !self.destroyed && self.config.capabilities.pointer
    }

    pub fn on_pointer_move(&mut self, element: ElementId, sample: &PointerSample) {
        if !self.pointer_active() || self.preference.reduced_motion {
            return;
        }
        let pointer_cfg = self.config.pointer;
        if self.registry.has(element, TriggerKind::Magnetic) {
            let transform = pointer::magnetic_transform(sample, pointer_cfg.magnetic_strength);
            self.ops.set_style(element, StyleProp::Transform, transform);
        }
        if self.registry.has(element, TriggerKind::Tilt) {
            if let Some(transform) = pointer::tilt_transform(sample, pointer_cfg.tilt_max_deg) {
                self.ops.set_style(element, StyleProp::Transform, transform);
            }
        }
    }

    pub fn on_pointer_enter(&mut self, element: ElementId) {
        if !self.pointer_active() || self.preference.reduced_motion {
            return;
        }
        if self.registry.has(element, TriggerKind::Glow) {
            self.ops.add_class(element, GLOW_CLASS);
        }
    }

    /// Resets always run, reduced motion or not.
    pub fn on_pointer_leave(&mut self, element: ElementId) {
        if !self.pointer_active() {
            return;
        }
        if self.registry.has(element, TriggerKind::Magnetic) {
            self.ops.set_style(element, StyleProp::Transform, MAGNETIC_RESET);
        }
        if self.registry.has(element, TriggerKind::Tilt) {
            self.ops.set_style(element, StyleProp::Transform, TILT_RESET);
        }
        if self.registry.has(element, TriggerKind::Glow) {
            self.ops.remove_class(element, GLOW_CLASS);
        }
    }

    // -- Teardown --

    /// An element left the document: cancel its pending reveal and morph,
    /// stop watching it, and forget it.
    pub fn release_element(&mut self, element: ElementId) {
        if let Some(handle) = self.morphs.remove(&element) {
            self.timers.cancel(handle.timer);
        }
        let cancelled = self.timers.cancel_owner(element);
        for family in Family::ALL {
            self.stop_observing(family, element);
        }
        self.registry.remove_element(element);
        self.revealed.remove(&element);
        if cancelled > 0 {
            log::debug!("motion: released {:?}, cancelled {} timers", element, cancelled);
        }
    }

    /// Cancel every timer, disconnect every watcher, clear bookkeeping.
    /// Safe to call more than once; every later event is ignored.
    pub fn destroy(&mut self) {
        self.timers.clear();

        for family in Family::ALL {
            if let Some(mut watcher) = self.watchers.remove(&family) {
                if watcher.is_connected() {
                    watcher.disconnect();
                    self.ops.push(DomOp::Disconnect { family });
                }
            }
        }

        self.morphs.clear();
        self.revealed.clear();
        self.frame.complete();
        if !self.destroyed {
            log::info!("motion: destroyed");
        }
        self.destroyed = true;
    }

    // -- Output --

    /// Take the ops produced since the last drain.
    pub fn drain_ops(&mut self) -> Vec<DomOp> {
        self.ops.drain()
    }

    pub fn has_pending_ops(&self) -> bool {
        !self.ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::Capabilities;
    use crate::core::registry::RevealAttrs;
    use crate::systems::morph::MORPH_SHAPES;

    fn reveal(family: Family, delay: Option<&str>, duration: Option<&str>, direction: Option<&str>) -> Trigger {
        let attrs = RevealAttrs { delay, duration, direction };
        Trigger::Reveal {
            family,
            config: RevealConfig::from_attrs(family, &attrs, &Default::default()),
        }
    }

    fn coordinator(reduced: bool) -> MotionCoordinator {
        let pref = if reduced { MotionPreference::reduced() } else { MotionPreference::full() };
        MotionCoordinator::new(PageConfig::default(), pref)
    }

    fn styles_for(ops: &[DomOp], target: ElementId) -> Vec<(StyleProp, String)> {
        ops.iter()
            .filter_map(|op| match op {
                DomOp::SetStyle { element, prop, value } if *element == target => Some((*prop, value.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn start_connects_one_watcher_per_family() {
        let mut c = coordinator(false);
        c.start();
        let ops = c.drain_ops();
        let connected: Vec<Family> = ops
            .iter()
            .filter_map(|op| match op {
                DomOp::Connect { family, .. } => Some(*family),
                _ => None,
            })
            .collect();
        assert_eq!(connected, Family::ALL.to_vec());
        assert_eq!(c.watcher(Family::Scale).unwrap().options().threshold, 0.2);
    }

    #[test]
    fn start_primes_and_observes_reveals() {
        let mut c = coordinator(false);
        let el = ElementId(1);
        c.register(el, reveal(Family::Fade, None, None, None));
        c.register(ElementId(2), Trigger::Magnetic);
        c.start();
        let ops = c.drain_ops();
        assert_eq!(
            styles_for(&ops, el),
            vec![
                (StyleProp::Opacity, "0".to_string()),
                (StyleProp::Transform, "translateY(30px)".to_string()),
            ]
        );
        assert!(ops.contains(&DomOp::Observe { family: Family::Fade, element: el }));
        assert!(!ops.iter().any(|op| op.element() == Some(ElementId(2))));
    }

    #[test]
    fn unmarked_elements_are_never_observed() {
        let mut c = coordinator(false);
        c.register(ElementId(5), Trigger::Glow);
        c.start();
        for family in Family::ALL {
            assert!(c.watcher(family).unwrap().is_empty());
        }
    }

    #[test]
    fn reduced_motion_short_circuits_every_executor() {
        for family in [Family::Fade, Family::Scale, Family::Slide] {
            let mut c = coordinator(true);
            let el = ElementId(1);
            c.register(el, reveal(family, Some("500"), Some("2000"), Some("left")));
            c.start();
            c.drain_ops();

            c.on_intersection(family, el, true);
            let ops = c.drain_ops();
            let styles = styles_for(&ops, el);
            assert!(styles.iter().all(|(p, _)| *p != StyleProp::Transition));
            assert!(styles.contains(&(StyleProp::Opacity, "1".to_string())));
            assert!(styles.contains(&(StyleProp::Transform, reveal::terminal_transform(family).to_string())));
            assert_eq!(c.timer_count(), 0, "no delay is scheduled under reduced motion");
        }
    }

    #[test]
    fn reveal_is_one_shot() {
        let mut c = coordinator(false);
        let el = ElementId(1);
        c.register(el, reveal(Family::Scale, None, None, None));
        c.start();
        c.drain_ops();

        c.on_intersection(Family::Scale, el, true);
        let first = c.drain_ops();
        assert!(first.contains(&DomOp::Unobserve { family: Family::Scale, element: el }));
        assert_eq!(styles_for(&first, el).len(), 3);

        c.on_intersection(Family::Scale, el, false);
        c.on_intersection(Family::Scale, el, true);
        assert!(c.drain_ops().is_empty());
    }

    #[test]
    fn non_intersecting_notifications_do_nothing() {
        let mut c = coordinator(false);
        let el = ElementId(1);
        c.register(el, reveal(Family::Fade, None, None, None));
        c.start();
        c.drain_ops();
        c.on_intersection(Family::Fade, el, false);
        assert!(c.drain_ops().is_empty());
        assert!(c.watcher(Family::Fade).unwrap().is_observing(el));
    }

    #[test]
    fn wrong_family_notification_is_ignored() {
        let mut c = coordinator(false);
        let el = ElementId(1);
        c.register(el, reveal(Family::Fade, None, None, None));
        c.start();
        c.drain_ops();
        c.on_intersection(Family::Slide, el, true);
        assert!(c.drain_ops().is_empty());
    }

    #[test]
    fn delay_defers_the_transition() {
        let mut c = coordinator(false);
        let el = ElementId(1);
        c.register(el, reveal(Family::Fade, Some("300"), Some("1000"), None));
        c.start();
        c.drain_ops();

        c.on_intersection(Family::Fade, el, true);
        let ops = c.drain_ops();
        assert!(styles_for(&ops, el).is_empty());
        assert_eq!(c.next_deadline(), Some(300.0));

        c.advance(299.0);
        assert!(c.drain_ops().is_empty());
        c.advance(300.0);
        let styles = styles_for(&c.drain_ops(), el);
        assert_eq!(styles[0].1, "opacity 1000ms ease-out, transform 1000ms ease-out");
        assert_eq!(styles[2].1, "translateY(0)");
    }

    #[test]
    fn slide_direction_mapping() {
        let mut c = coordinator(false);
        let left = ElementId(1);
        let other = ElementId(2);
        let missing = ElementId(3);
        c.register(left, reveal(Family::Slide, None, None, Some("left")));
        c.register(other, reveal(Family::Slide, None, None, Some("up")));
        c.register(missing, reveal(Family::Slide, None, None, None));
        c.start();
        let ops = c.drain_ops();
        assert_eq!(styles_for(&ops, left)[1].1, "translateX(-50px)");
        assert_eq!(styles_for(&ops, other)[1].1, "translateX(50px)");
        assert_eq!(styles_for(&ops, missing)[1].1, "translateX(50px)");

        for el in [left, other, missing] {
            c.animate_slide_in(el);
            let styles = styles_for(&c.drain_ops(), el);
            assert_eq!(styles.last().unwrap().1, "translateX(0)");
        }
    }

    #[test]
    fn scroll_reveal_adds_marker_class_once() {
        let mut c = coordinator(false);
        let el = ElementId(7);
        c.register(el, Trigger::ScrollReveal);
        c.start();
        c.drain_ops();
        c.on_intersection(Family::ScrollReveal, el, true);
        let ops = c.drain_ops();
        assert!(ops.contains(&DomOp::AddClass { element: el, class: REVEALED_CLASS }));
        c.on_intersection(Family::ScrollReveal, el, true);
        assert!(c.drain_ops().is_empty());
    }

    #[test]
    fn load_pass_reveals_only_visible_unrevealed_elements() {
        let mut c = coordinator(false);
        let visible = ElementId(1);
        let below = ElementId(2);
        let done = ElementId(3);
        for el in [visible, below, done] {
            c.register(el, reveal(Family::Fade, None, None, None));
        }
        c.start();
        c.on_intersection(Family::Fade, done, true);
        c.drain_ops();

        let rects = [
            (visible, Rect::new(0.0, 100.0, 300.0, 200.0)),
            (below, Rect::new(0.0, 1200.0, 300.0, 200.0)),
            (done, Rect::new(0.0, 50.0, 300.0, 200.0)),
        ];
        c.catch_up_visible(&rects, 800.0);
        let ops = c.drain_ops();
        assert_eq!(styles_for(&ops, visible).len(), 3);
        assert!(styles_for(&ops, below).is_empty());
        assert!(styles_for(&ops, done).is_empty());
        assert!(!c.watcher(Family::Fade).unwrap().is_observing(visible));
        assert!(c.watcher(Family::Fade).unwrap().is_observing(below));

        // The watcher firing later does not replay it.
        c.on_intersection(Family::Fade, visible, true);
        assert!(c.drain_ops().is_empty());
    }

    #[test]
    fn scroll_bursts_coalesce_into_one_frame() {
        let mut c = coordinator(false);
        c.register(ElementId(1), Trigger::Parallax { speed: 0.5 });
        c.start();
        c.drain_ops();

        let requested = (0..10).filter(|_| c.on_scroll()).count();
        assert_eq!(requested, 1);

        c.on_frame(&ScrollMetrics { scroll_y: 40.0, scroll_height: 2000.0, viewport_height: 800.0 });
        let ops = c.drain_ops();
        assert_eq!(ops.len(), 1);
        assert_eq!(styles_for(&ops, ElementId(1))[0].1, "translateY(-20px)");
        assert!(c.on_scroll());
    }

    #[test]
    fn morph_cycles_and_wraps() {
        let mut c = coordinator(false);
        let el = ElementId(4);
        c.register(el, Trigger::Morph);
        c.start();
        c.drain_ops();
        assert_eq!(c.morph_count(), 1);

        let mut applied = Vec::new();
        for tick in 1..=5 {
            c.advance(tick as f64 * 3000.0);
            for (prop, value) in styles_for(&c.drain_ops(), el) {
                assert_eq!(prop, StyleProp::ClipPath);
                applied.push(value);
            }
        }
        assert_eq!(applied.len(), 5);
        assert_eq!(applied[3], MORPH_SHAPES[0]);
        assert_eq!(applied[4], MORPH_SHAPES[0]);
        assert_eq!(applied[1], MORPH_SHAPES[1]);
    }

    #[test]
    fn morph_never_starts_under_reduced_motion() {
        let mut c = coordinator(true);
        c.register(ElementId(4), Trigger::Morph);
        c.start();
        assert_eq!(c.morph_count(), 0);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn morph_registered_twice_runs_one_timer() {
        let mut c = coordinator(false);
        c.start();
        c.register(ElementId(4), Trigger::Morph);
        c.register(ElementId(4), Trigger::Morph);
        assert_eq!(c.morph_count(), 1);
        assert_eq!(c.timer_count(), 1);
    }

    #[test]
    fn pointer_effects_follow_tags() {
        let mut c = coordinator(false);
        let button = ElementId(1);
        let card = ElementId(2);
        c.register(button, Trigger::Magnetic);
        c.register(button, Trigger::Glow);
        c.register(card, Trigger::Tilt);
        c.start();
        c.drain_ops();

        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        c.on_pointer_move(button, &PointerSample::new(100.0, 50.0, rect));
        c.on_pointer_move(card, &PointerSample::new(50.0, 0.0, rect));
        c.on_pointer_enter(button);
        let ops = c.drain_ops();
        assert_eq!(styles_for(&ops, button)[0].1, "translate(15px, 0px)");
        assert_eq!(
            styles_for(&ops, card)[0].1,
            "perspective(1000px) rotateX(10deg) rotateY(0deg)"
        );
        assert!(ops.contains(&DomOp::AddClass { element: button, class: GLOW_CLASS }));

        c.on_pointer_leave(button);
        c.on_pointer_leave(card);
        let ops = c.drain_ops();
        assert_eq!(styles_for(&ops, button)[0].1, MAGNETIC_RESET);
        assert_eq!(styles_for(&ops, card)[0].1, TILT_RESET);
        assert!(ops.contains(&DomOp::RemoveClass { element: button, class: GLOW_CLASS }));
    }

    #[test]
    fn reduced_motion_skips_hover_but_still_removes_glow() {
        let mut c = coordinator(true);
        let el = ElementId(1);
        c.register(el, Trigger::Magnetic);
        c.register(el, Trigger::Glow);
        c.start();
        c.drain_ops();

        c.on_pointer_move(el, &PointerSample::new(10.0, 10.0, Rect::new(0.0, 0.0, 100.0, 100.0)));
        c.on_pointer_enter(el);
        assert!(c.drain_ops().is_empty());

        c.on_pointer_leave(el);
        assert!(c.drain_ops().contains(&DomOp::RemoveClass { element: el, class: GLOW_CLASS }));
    }

    #[test]
    fn destroy_stops_everything() {
        let mut c = coordinator(false);
        let shape = ElementId(1);
        let delayed = ElementId(2);
        let pending = ElementId(3);
        c.register(shape, Trigger::Morph);
        c.register(delayed, reveal(Family::Fade, Some("1000"), None, None));
        c.register(pending, reveal(Family::Scale, None, None, None));
        c.start();
        c.on_intersection(Family::Fade, delayed, true);
        c.drain_ops();

        c.destroy();
        let ops = c.drain_ops();
        let disconnected = ops.iter().filter(|op| matches!(op, DomOp::Disconnect { .. })).count();
        assert_eq!(disconnected, Family::ALL.len());
        assert!(ops.iter().all(|op| !op.is_visual()));
        assert_eq!(c.timer_count(), 0);
        assert_eq!(c.next_deadline(), None);

        c.advance(60_000.0);
        c.on_intersection(Family::Scale, pending, true);
        c.catch_up_visible(&[(pending, Rect::new(0.0, 0.0, 10.0, 10.0))], 800.0);
        assert!(!c.on_scroll());
        c.on_pointer_leave(shape);
        assert!(c.drain_ops().is_empty());
    }

    #[test]
    fn destroy_is_idempotent() {
        let mut c = coordinator(false);
        c.start();
        c.destroy();
        c.drain_ops();
        c.destroy();
        assert!(c.drain_ops().is_empty());
        assert!(c.is_destroyed());
    }

    #[test]
    fn release_cancels_pending_work_for_that_element() {
        let mut c = coordinator(false);
        let gone = ElementId(1);
        let kept = ElementId(2);
        c.register(gone, reveal(Family::Fade, Some("500"), None, None));
        c.register(gone, Trigger::Morph);
        c.register(kept, Trigger::Morph);
        c.start();
        c.on_intersection(Family::Fade, gone, true);
        c.drain_ops();
        assert_eq!(c.timer_count(), 3);

        c.release_element(gone);
        assert_eq!(c.timer_count(), 1);
        assert_eq!(c.morph_count(), 1);

        c.advance(3000.0);
        let ops = c.drain_ops();
        assert!(styles_for(&ops, gone).is_empty());
        assert_eq!(styles_for(&ops, kept).len(), 1);
    }

    #[test]
    fn capabilities_switch_families_off() {
        let config = PageConfig {
            capabilities: Capabilities {
                reveal: false,
                morph: false,
                scroll_effects: false,
                ..Capabilities::default()
            },
            ..PageConfig::default()
        };
        let mut c = MotionCoordinator::new(config, MotionPreference::full());
        c.register(ElementId(1), reveal(Family::Fade, None, None, None));
        c.register(ElementId(2), Trigger::Morph);
        c.start();
        assert!(c.watcher(Family::Fade).is_none());
        assert!(c.watcher(Family::ScrollReveal).is_some());
        assert_eq!(c.morph_count(), 0);
        assert!(!c.on_scroll());
        let ops = c.drain_ops();
        assert!(ops.iter().all(|op| op.element().is_none()));
    }
}
