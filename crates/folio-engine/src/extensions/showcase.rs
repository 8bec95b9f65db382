// extensions/showcase.rs
//
// About-section and portfolio cards: skill bars that fill once they scroll
// into view, expertise cards that stagger in and lift on hover, and project
// cards reachable from the keyboard.
//
// Usage:
//   let mut showcase = Showcase::new(reduced_motion);
//   if showcase.add_skill_bar(bar, data_width) { observe(bar) }
//   showcase.add_expertise_cards(&cards);
//   // on intersection: if showcase.on_skill_bar_visible(bar) { unobserve(bar) }
//   showcase.advance(now);
//   apply(showcase.drain_ops());

use std::collections::{HashMap, HashSet};

use crate::api::config::WatcherOptions;
use crate::api::ops::{css_number, DomOp, OpBuffer, StyleProp};
use crate::api::types::ElementId;
use crate::core::scheduler::Scheduler;

pub const SKILL_BAR_SELECTOR: &str = ".skill-progress, .progress-fill";
pub const EXPERTISE_CARD_SELECTOR: &str = ".expertise-card";
pub const PROJECT_CARD_SELECTOR: &str = ".project-card.enhanced";
pub const PROJECT_LINK_SELECTOR: &str = ".project-link";

/// Wait between a bar coming into view and its fill starting.
pub const SKILL_BAR_DELAY_MS: f64 = 300.0;
/// Gap between consecutive expertise cards appearing.
pub const CARD_STAGGER_MS: f64 = 100.0;
/// How long a pressed project link stays pushed in.
pub const LINK_PULSE_MS: f64 = 100.0;

pub const CARD_TRANSITION: &str = "all 0.6s ease";
pub const CARD_HIDDEN_TRANSFORM: &str = "translateY(20px)";
pub const CARD_SHOWN_TRANSFORM: &str = "translateY(0)";
pub const CARD_HOVER_TRANSFORM: &str = "translateY(-10px) scale(1.02)";
pub const CARD_REST_TRANSFORM: &str = "translateY(0) scale(1)";
pub const PROJECT_FOCUS_TRANSFORM: &str = "translateY(-5px)";
pub const PROJECT_REST_TRANSFORM: &str = "translateY(0)";
pub const LINK_PRESS_TRANSFORM: &str = "scale(0.95)";
pub const LINK_RELEASE_TRANSFORM: &str = "scale(1.1)";

/// Skill bars fill once 30% of them is visible.
pub fn skill_bar_options() -> WatcherOptions {
    WatcherOptions::new(0.3, "0px")
}

/// `data-width` as a CSS width: `85` -> `85%`. None when missing or not a number.
pub fn bar_width(data_width: Option<&str>) -> Option<String> {
    let value: f32 = data_width?.trim().parse().ok()?;
    value
        .is_finite()
        .then(|| format!("{}%", css_number(value.max(0.0))))
}

/// Delay before the `index`-th expertise card (document order) appears.
pub fn stagger_delay_ms(index: usize) -> f64 {
    index as f64 * CARD_STAGGER_MS
}

/// Keys that open a focused project card's first link.
pub fn activates_card(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowcaseTask {
    FillBar(ElementId),
    RevealCard(ElementId),
    ReleaseLink(ElementId),
}

pub struct Showcase {
    reduced_motion: bool,
    timers: Scheduler<ShowcaseTask>,
    /// Bars still waiting to come into view, with their target width.
    bars: HashMap<ElementId, Option<String>>,
    /// Bars seen but not yet filled.
    fills: HashMap<ElementId, String>,
    cards: HashSet<ElementId>,
    projects: HashSet<ElementId>,
    ops: OpBuffer,
    destroyed: bool,
}

impl Showcase {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            reduced_motion,
            timers: Scheduler::new(),
            bars: HashMap::new(),
            fills: HashMap::new(),
            cards: HashSet::new(),
            projects: HashSet::new(),
            ops: OpBuffer::new(),
            destroyed: false,
        }
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    // -- Skill bars --

    /// Track a skill bar. True when the host should start observing it.
    pub fn add_skill_bar(&mut self, bar: ElementId, data_width: Option<&str>) -> bool {
        if self.destroyed || self.bars.contains_key(&bar) {
            return false;
        }
        self.bars.insert(bar, bar_width(data_width));
        true
    }

    /// A tracked bar intersected. One-shot: true only the first time, and the
    /// host then stops observing it.
    pub fn on_skill_bar_visible(&mut self, bar: ElementId) -> bool {
        if self.destroyed {
            return false;
        }
        let Some(width) = self.bars.remove(&bar) else {
            return false;
        };
        if let Some(width) = width {
            if self.reduced_motion {
                self.ops.set_style(bar, StyleProp::Width, width);
            } else {
                self.fills.insert(bar, width);
                self.timers
                    .after(Some(bar), SKILL_BAR_DELAY_MS, ShowcaseTask::FillBar(bar));
            }
        }
        true
    }

    // -- Expertise cards --

    /// Hide the cards and bring them in one after another, in the order given.
    /// Under reduced motion they are shown at once.
    pub fn add_expertise_cards(&mut self, cards: &[ElementId]) {
        if self.destroyed {
            return;
        }
        for (index, &card) in cards.iter().enumerate() {
            if !self.cards.insert(card) {
                continue;
            }
            if self.reduced_motion {
                self.ops.set_style(card, StyleProp::Opacity, "1");
                self.ops.set_style(card, StyleProp::Transform, CARD_SHOWN_TRANSFORM);
                continue;
            }
            self.ops.set_style(card, StyleProp::Opacity, "0");
            self.ops.set_style(card, StyleProp::Transform, CARD_HIDDEN_TRANSFORM);
            self.ops.set_style(card, StyleProp::Transition, CARD_TRANSITION);
            self.timers
                .after(Some(card), stagger_delay_ms(index), ShowcaseTask::RevealCard(card));
        }
    }

    pub fn on_card_enter(&mut self, card: ElementId) {
        if !self.destroyed && !self.reduced_motion && self.cards.contains(&card) {
            self.ops.set_style(card, StyleProp::Transform, CARD_HOVER_TRANSFORM);
        }
    }

    pub fn on_card_leave(&mut self, card: ElementId) {
        if !self.destroyed && self.cards.contains(&card) {
            self.ops.set_style(card, StyleProp::Transform, CARD_REST_TRANSFORM);
        }
    }

    // -- Project cards --

    /// Track a project card. True when the host should make it focusable.
    pub fn add_project_card(&mut self, card: ElementId) -> bool {
        !self.destroyed && self.projects.insert(card)
    }

    pub fn on_project_focus(&mut self, card: ElementId) {
        if !self.destroyed && !self.reduced_motion && self.projects.contains(&card) {
            self.ops.set_style(card, StyleProp::Transform, PROJECT_FOCUS_TRANSFORM);
        }
    }

    pub fn on_project_blur(&mut self, card: ElementId) {
        if !self.destroyed && self.projects.contains(&card) {
            self.ops.set_style(card, StyleProp::Transform, PROJECT_REST_TRANSFORM);
        }
    }

    /// A project link was clicked: push it in, then pop it out.
    pub fn on_link_press(&mut self, link: ElementId) {
        if self.destroyed || self.reduced_motion {
            return;
        }
        self.timers.cancel_owner(link);
        self.ops.set_style(link, StyleProp::Transform, LINK_PRESS_TRANSFORM);
        self.timers
            .after(Some(link), LINK_PULSE_MS, ShowcaseTask::ReleaseLink(link));
    }

    // -- Clock --

    pub fn advance(&mut self, now_ms: f64) {
        if self.destroyed {
            return;
        }
        for (_, task) in self.timers.advance(now_ms) {
            match task {
                ShowcaseTask::FillBar(bar) => {
                    if let Some(width) = self.fills.remove(&bar) {
                        self.ops.set_style(bar, StyleProp::Width, width);
                    }
                }
                ShowcaseTask::RevealCard(card) => {
                    self.ops.set_style(card, StyleProp::Opacity, "1");
                    self.ops.set_style(card, StyleProp::Transform, CARD_SHOWN_TRANSFORM);
                }
                ShowcaseTask::ReleaseLink(link) => {
                    self.ops.set_style(link, StyleProp::Transform, LINK_RELEASE_TRANSFORM);
                }
            }
        }
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.timers.next_deadline()
    }

    // -- Teardown --

    /// An element left the document: drop its pending fill, reveal or pulse.
    pub fn release(&mut self, element: ElementId) {
        self.timers.cancel_owner(element);
        self.bars.remove(&element);
        self.fills.remove(&element);
        self.cards.remove(&element);
        self.projects.remove(&element);
    }

    pub fn destroy(&mut self) {
        self.timers.clear();
        self.bars.clear();
        self.fills.clear();
        self.cards.clear();
        self.projects.clear();
        self.destroyed = true;
    }

    pub fn drain_ops(&mut self) -> Vec<DomOp> {
        self.ops.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles(ops: &[DomOp]) -> Vec<(ElementId, StyleProp, &str)> {
        ops.iter()
            .filter_map(|op| match op {
                DomOp::SetStyle { element, prop, value } => Some((*element, *prop, value.as_str())),
                _ => None,
            })
            .collect()
    }

    const BAR: ElementId = ElementId(1);

    #[test]
    fn bar_width_reads_percent() {
        assert_eq!(bar_width(Some("85")), Some("85%".to_string()));
        assert_eq!(bar_width(Some(" 62.5 ")), Some("62.5%".to_string()));
        assert_eq!(bar_width(Some("wide")), None);
        assert_eq!(bar_width(None), None);
        assert_eq!(skill_bar_options().threshold, 0.3);
    }

    #[test]
    fn skill_bar_fills_once_after_delay() {
        let mut s = Showcase::new(false);
        assert!(s.add_skill_bar(BAR, Some("85")));
        assert!(!s.add_skill_bar(BAR, Some("85")));

        assert!(s.on_skill_bar_visible(BAR));
        assert!(!s.on_skill_bar_visible(BAR));
        assert!(s.drain_ops().is_empty());

        s.advance(299.0);
        assert!(s.drain_ops().is_empty());
        s.advance(300.0);
        let ops = s.drain_ops();
        assert_eq!(styles(&ops), vec![(BAR, StyleProp::Width, "85%")]);

        s.advance(5000.0);
        assert!(s.drain_ops().is_empty());
        assert_eq!(s.timer_count(), 0);
    }

    #[test]
    fn reduced_motion_fills_at_once() {
        let mut s = Showcase::new(true);
        s.add_skill_bar(BAR, Some("40"));
        assert!(s.on_skill_bar_visible(BAR));
        assert_eq!(styles(&s.drain_ops()), vec![(BAR, StyleProp::Width, "40%")]);
        assert_eq!(s.timer_count(), 0);
    }

    #[test]
    fn bar_without_width_is_still_one_shot() {
        let mut s = Showcase::new(false);
        s.add_skill_bar(BAR, None);
        assert!(s.on_skill_bar_visible(BAR));
        assert_eq!(s.timer_count(), 0);
        assert!(!s.on_skill_bar_visible(BAR));
    }

    #[test]
    fn removed_bar_never_fills() {
        let mut s = Showcase::new(false);
        s.add_skill_bar(BAR, Some("70"));
        s.on_skill_bar_visible(BAR);
        s.release(BAR);
        s.advance(1000.0);
        assert!(s.drain_ops().is_empty());
    }

    #[test]
    fn expertise_cards_stagger_by_100ms() {
        assert_eq!(stagger_delay_ms(0), 0.0);
        assert_eq!(stagger_delay_ms(3), 300.0);

        let cards = [ElementId(10), ElementId(11), ElementId(12)];
        let mut s = Showcase::new(false);
        s.add_expertise_cards(&cards);
        let primed = s.drain_ops();
        assert_eq!(primed.len(), 9);
        assert!(styles(&primed).contains(&(cards[2], StyleProp::Transition, CARD_TRANSITION)));
        assert!(styles(&primed).contains(&(cards[0], StyleProp::Transform, CARD_HIDDEN_TRANSFORM)));

        s.advance(0.0);
        let first = s.drain_ops();
        assert!(first.iter().all(|op| op.element() == Some(cards[0])));
        assert_eq!(first.len(), 2);

        s.advance(150.0);
        let second = s.drain_ops();
        assert!(second.iter().all(|op| op.element() == Some(cards[1])));

        s.advance(200.0);
        assert_eq!(
            styles(&s.drain_ops()),
            vec![
                (cards[2], StyleProp::Opacity, "1"),
                (cards[2], StyleProp::Transform, CARD_SHOWN_TRANSFORM)
            ]
        );
    }

    #[test]
    fn reduced_motion_shows_cards_without_transition() {
        let card = ElementId(5);
        let mut s = Showcase::new(true);
        s.add_expertise_cards(&[card]);
        let ops = s.drain_ops();
        assert!(styles(&ops).iter().all(|(_, prop, _)| *prop != StyleProp::Transition));
        assert!(styles(&ops).contains(&(card, StyleProp::Opacity, "1")));
        assert_eq!(s.timer_count(), 0);

        s.on_card_enter(card);
        assert!(s.drain_ops().is_empty());
        s.on_card_leave(card);
        assert_eq!(styles(&s.drain_ops()), vec![(card, StyleProp::Transform, CARD_REST_TRANSFORM)]);
    }

    #[test]
    fn hover_lifts_only_expertise_cards() {
        let card = ElementId(5);
        let mut s = Showcase::new(false);
        s.add_expertise_cards(&[card]);
        s.drain_ops();
        s.on_card_enter(card);
        s.on_card_enter(ElementId(99));
        assert_eq!(styles(&s.drain_ops()), vec![(card, StyleProp::Transform, CARD_HOVER_TRANSFORM)]);
    }

    #[test]
    fn project_card_focus_and_link_pulse() {
        let card = ElementId(20);
        let link = ElementId(21);
        let mut s = Showcase::new(false);
        assert!(s.add_project_card(card));
        assert!(!s.add_project_card(card));

        s.on_project_focus(card);
        s.on_project_blur(card);
        assert_eq!(
            styles(&s.drain_ops()),
            vec![
                (card, StyleProp::Transform, PROJECT_FOCUS_TRANSFORM),
                (card, StyleProp::Transform, PROJECT_REST_TRANSFORM)
            ]
        );

        s.on_link_press(link);
        assert_eq!(styles(&s.drain_ops()), vec![(link, StyleProp::Transform, LINK_PRESS_TRANSFORM)]);
        s.advance(99.0);
        assert!(s.drain_ops().is_empty());
        s.advance(100.0);
        assert_eq!(styles(&s.drain_ops()), vec![(link, StyleProp::Transform, LINK_RELEASE_TRANSFORM)]);
    }

    #[test]
    fn repeated_press_restarts_the_pulse() {
        let link = ElementId(21);
        let mut s = Showcase::new(false);
        s.on_link_press(link);
        s.advance(60.0);
        s.on_link_press(link);
        assert_eq!(s.timer_count(), 1);
        s.advance(120.0);
        assert_eq!(s.drain_ops().len(), 2);
        s.advance(160.0);
        assert_eq!(styles(&s.drain_ops()), vec![(link, StyleProp::Transform, LINK_RELEASE_TRANSFORM)]);
    }

    #[test]
    fn activation_keys() {
        assert!(activates_card("Enter"));
        assert!(activates_card(" "));
        assert!(!activates_card("Tab"));
    }

    #[test]
    fn destroy_silences_everything() {
        let mut s = Showcase::new(false);
        s.add_skill_bar(BAR, Some("50"));
        s.on_skill_bar_visible(BAR);
        s.add_expertise_cards(&[ElementId(2)]);
        s.drain_ops();
        s.destroy();
        s.advance(10_000.0);
        s.on_link_press(ElementId(3));
        assert!(!s.add_skill_bar(ElementId(4), Some("10")));
        assert!(s.drain_ops().is_empty());
        assert_eq!(s.timer_count(), 0);
    }
}
