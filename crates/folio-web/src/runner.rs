use std::collections::HashMap;

use folio_engine::extensions::showcase::{activates_card, skill_bar_options, PROJECT_LINK_SELECTOR};
use folio_engine::{
    DomOp, ElementId, MotionCoordinator, MotionPreference, PageConfig, PointerSample, Rect, Showcase,
    Trigger,
};
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent, MutationObserver,
    MutationObserverInit, MutationRecord, Window,
};

use crate::clock::Clock;
use crate::dom::{self, ElementTable, ID_ATTR};
use crate::listeners::Listener;
use crate::observers::{counter_options, ObserverSet, WatchKey};
use crate::page::{self, PageExtras};
use crate::scan;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Log a failed DOM call from an event handler. Handlers never throw.
pub(crate) fn report(context: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("{}: {:?}", context, err);
    }
}

/// Watches the body for removed subtrees.
struct RemovalWatch {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(Array, MutationObserver)>,
}

impl Drop for RemovalWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Connects the engine to the live page.
///
/// Owns the element table, the real observers, the clock and every listener.
/// Each event handler follows the same shape: bring every logical clock up to
/// the current time, hand the event to the engine, then apply the resulting
/// DOM ops and re-arm the clock for the next deadline.
pub struct PageRunner {
    window: Window,
    document: Document,
    elements: ElementTable,
    observers: ObserverSet,
    motion: MotionCoordinator,
    page: PageExtras,
    showcase: Showcase,
    clock: Clock,
    listeners: Vec<Listener>,
    element_listeners: HashMap<ElementId, Vec<Listener>>,
    removals: Option<RemovalWatch>,
    loaded: bool,
    destroyed: bool,
}

impl PageRunner {
    pub fn new(config: PageConfig) -> Result<Self, JsValue> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let reduced = window
            .match_media(REDUCED_MOTION_QUERY)?
            .map(|query| query.matches())
            .unwrap_or(false);
        let preference = if reduced {
            MotionPreference::reduced()
        } else {
            MotionPreference::full()
        };

        let page = PageExtras::new(&window, &document, &config, reduced);
        Ok(Self {
            clock: Clock::new(&window),
            elements: ElementTable::new(),
            observers: ObserverSet::new(),
            motion: MotionCoordinator::new(config, preference),
            page,
            showcase: Showcase::new(reduced),
            listeners: Vec::new(),
            element_listeners: HashMap::new(),
            removals: None,
            loaded: false,
            destroyed: false,
            window,
            document,
        })
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Scan the page, register every trigger, and attach every listener.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.destroyed {
            return Ok(());
        }
        self.begin();

        let found = scan::scan(&self.document, &mut self.elements, self.motion.config())?;
        for (id, trigger) in found {
            self.attach_pointer(id, &trigger)?;
            self.motion.register(id, trigger);
        }
        self.motion.start();

        let counters = self.page.start(&mut self.elements)?;
        if !counters.is_empty() {
            self.observers.connect(WatchKey::Counters, &counter_options())?;
            for id in counters {
                if let Some(el) = self.elements.get(id) {
                    self.observers.observe(WatchKey::Counters, el);
                }
            }
        }

        self.start_showcase()?;
        self.attach_page_listeners()?;
        self.watch_removals()?;

        // Draw scroll-driven state for wherever the page was restored to.
        self.motion.on_scroll();
        self.request_frame();
        self.flush();
        log::info!("runner: started with {} elements", self.elements.len());
        Ok(())
    }

    // -- Event plumbing --

    /// Bring the logical clocks to now and run whatever came due.
    fn begin(&mut self) -> f64 {
        let now = self.clock.now();
        self.motion.advance(now);
        self.showcase.advance(now);
        report("page timers", self.page.advance(now));
        now
    }

    /// Apply pending ops and re-arm the timeout.
    fn flush(&mut self) {
        self.apply_ops();
        let deadline = [
            self.motion.next_deadline(),
            self.page.next_deadline(),
            self.showcase.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min_by(|a, b| a.total_cmp(b));
        if self.destroyed {
            self.clock.cancel();
        } else {
            report("arm timeout", self.clock.arm(deadline));
        }
    }

    fn apply_ops(&mut self) {
        let mut ops = self.motion.drain_ops();
        ops.extend(self.showcase.drain_ops());
        for op in ops {
            report("apply op", self.apply(op));
        }
    }

    fn apply(&mut self, op: DomOp) -> Result<(), JsValue> {
        match op {
            DomOp::SetStyle { element, prop, value } => {
                if let Some(el) = self.elements.get(element) {
                    el.style().set_property(prop.css_name(), &value)?;
                }
            }
            DomOp::AddClass { element, class } => {
                if let Some(el) = self.elements.get(element) {
                    el.class_list().add_1(class)?;
                }
            }
            DomOp::RemoveClass { element, class } => {
                if let Some(el) = self.elements.get(element) {
                    el.class_list().remove_1(class)?;
                }
            }
            DomOp::Connect { family, options } => {
                self.observers.connect(WatchKey::Motion(family), &options)?;
            }
            DomOp::Observe { family, element } => {
                if let Some(el) = self.elements.live(element) {
                    self.observers.observe(WatchKey::Motion(family), el);
                }
            }
            DomOp::Unobserve { family, element } => {
                if let Some(el) = self.elements.get(element) {
                    self.observers.unobserve(WatchKey::Motion(family), el);
                }
            }
            DomOp::Disconnect { family } => self.observers.disconnect(WatchKey::Motion(family)),
        }
        Ok(())
    }

    fn request_frame(&mut self) {
        if !self.destroyed {
            report("request frame", self.clock.request_frame());
        }
    }

    // -- Listeners --

    fn attach_pointer(&mut self, id: ElementId, trigger: &Trigger) -> Result<(), JsValue> {
        if !matches!(trigger, Trigger::Magnetic | Trigger::Tilt | Trigger::Glow) {
            return Ok(());
        }
        let Some(el) = self.elements.get(id) else {
            return Ok(());
        };
        let target: &EventTarget = el.as_ref();
        let attached = self.element_listeners.entry(id).or_default();
        if !attached.is_empty() {
            return Ok(());
        }
        attached.push(Listener::passive(target, "mousemove", move |event: Event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let (x, y) = (mouse.client_x() as f32, mouse.client_y() as f32);
                crate::with_runner(|runner| runner.on_pointer_move(id, x, y));
            }
        })?);
        attached.push(Listener::passive(target, "mouseenter", move |_| {
            crate::with_runner(|runner| runner.on_pointer_enter(id));
        })?);
        attached.push(Listener::passive(target, "mouseleave", move |_| {
            crate::with_runner(|runner| runner.on_pointer_leave(id));
        })?);
        Ok(())
    }

    /// Attach a listener to a tracked element, dropped with it.
    fn listen(
        &mut self,
        id: ElementId,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let Some(el) = self.elements.get(id) else {
            return Ok(());
        };
        let target: &EventTarget = el.as_ref();
        let listener = if passive {
            Listener::passive(target, event, handler)?
        } else {
            Listener::new(target, event, handler)?
        };
        self.element_listeners.entry(id).or_default().push(listener);
        Ok(())
    }

    /// Skill bars, expertise cards and project cards.
    fn start_showcase(&mut self) -> Result<(), JsValue> {
        let found = scan::scan_showcase(&self.document, &mut self.elements)?;

        let bars: Vec<ElementId> = found
            .bars
            .iter()
            .filter(|(id, width)| self.showcase.add_skill_bar(*id, width.as_deref()))
            .map(|(id, _)| *id)
            .collect();
        if !bars.is_empty() {
            self.observers.connect(WatchKey::SkillBars, &skill_bar_options())?;
            for id in bars {
                if let Some(el) = self.elements.get(id) {
                    self.observers.observe(WatchKey::SkillBars, el);
                }
            }
        }

        self.showcase.add_expertise_cards(&found.cards);
        for &card in &found.cards {
            self.listen(card, "mouseenter", true, move |_| {
                crate::with_runner(|runner| runner.on_card_enter(card));
            })?;
            self.listen(card, "mouseleave", true, move |_| {
                crate::with_runner(|runner| runner.on_card_leave(card));
            })?;
        }

        for (card, links) in found.projects {
            if !self.showcase.add_project_card(card) {
                continue;
            }
            if let Some(el) = self.elements.get(card) {
                el.set_attribute("tabindex", "0")?;
            }
            self.listen(card, "keydown", false, move |event: Event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>().map(|k| k.key()) else {
                    return;
                };
                if !activates_card(&key) {
                    return;
                }
                event.prevent_default();
                // Clicked outside the runner borrow so the link's own handler can run.
                if let Some(link) = crate::with_runner(|runner| runner.project_link(card)).flatten() {
                    link.click();
                }
            })?;
            self.listen(card, "focus", true, move |_| {
                crate::with_runner(|runner| runner.on_project_focus(card));
            })?;
            self.listen(card, "blur", true, move |_| {
                crate::with_runner(|runner| runner.on_project_blur(card));
            })?;
            for link in links {
                self.listen(link, "click", false, move |event: Event| {
                    event.stop_propagation();
                    crate::with_runner(|runner| runner.on_link_press(link));
                })?;
            }
        }
        Ok(())
    }

    fn attach_page_listeners(&mut self) -> Result<(), JsValue> {
        let window: &EventTarget = self.window.as_ref();
        self.listeners.push(Listener::passive(window, "scroll", |_| {
            crate::with_runner(|runner| runner.on_scroll());
        })?);
        for event in ["resize", "orientationchange"] {
            self.listeners.push(Listener::passive(window, event, |_| {
                crate::with_runner(|runner| runner.on_resize());
            })?);
        }

        if let Some(form) = self.page.contact_form() {
            self.listeners.push(Listener::new(form.as_ref(), "submit", |event: Event| {
                event.prevent_default();
                crate::with_runner(|runner| runner.on_contact_submit());
            })?);
        }
        if let Some(button) = self.document.get_element_by_id(page::SCROLL_TOP_ID) {
            self.listeners.push(Listener::new(button.as_ref(), "click", |event: Event| {
                event.prevent_default();
                crate::with_runner(|runner| runner.on_scroll_top());
            })?);
        }
        if let Some(toggle) = self.document.get_element_by_id(page::LANG_TOGGLE_ID) {
            self.listeners.push(Listener::new(toggle.as_ref(), "click", |_| {
                crate::with_runner(|runner| runner.toggle_language());
            })?);
        }
        for anchor in dom::query_all(&self.document, page::ANCHOR_SELECTOR)? {
            self.listeners.push(Listener::new(anchor.as_ref(), "click", |event: Event| {
                let href = event
                    .current_target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .and_then(|el| el.get_attribute("href"));
                let Some(href) = href else {
                    return;
                };
                if crate::with_runner(|runner| runner.on_anchor_click(&href)) == Some(true) {
                    event.prevent_default();
                }
            })?);
        }
        Ok(())
    }

    /// Release engine state for tagged elements whose subtree left the document.
    fn watch_removals(&mut self) -> Result<(), JsValue> {
        let Some(body) = self.document.body() else {
            return Ok(());
        };
        let callback = Closure::<dyn FnMut(Array, MutationObserver)>::new(
            |records: Array, _observer: MutationObserver| {
                let mut ids = Vec::new();
                for record in records.iter().filter_map(|r| r.dyn_into::<MutationRecord>().ok()) {
                    let removed = record.removed_nodes();
                    for node in (0..removed.length()).filter_map(|i| removed.item(i)) {
                        if node.is_connected() {
                            continue;
                        }
                        if let Ok(el) = node.dyn_into::<Element>() {
                            collect_ids(&el, &mut ids);
                        }
                    }
                }
                if !ids.is_empty() {
                    crate::with_runner(|runner| runner.release_nodes(&ids));
                }
            },
        );
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer.observe_with_options(&body, &init)?;
        self.removals = Some(RemovalWatch {
            observer,
            _callback: callback,
        });
        Ok(())
    }

    // -- Handlers --

    /// The window finished loading: reveal whatever is already on screen.
    pub fn on_load(&mut self) {
        if self.destroyed || self.loaded {
            return;
        }
        self.loaded = true;
        self.begin();
        let reveal_ids: Vec<ElementId> = self.motion.registry().reveals().map(|(id, _, _)| id).collect();
        let rects: Vec<(ElementId, Rect)> = reveal_ids
            .into_iter()
            .filter_map(|id| self.elements.live(id).map(|el| (id, dom::client_rect(el))))
            .collect();
        self.motion
            .catch_up_visible(&rects, dom::viewport_height(&self.window));
        self.flush();
    }

    pub fn on_intersections(&mut self, key: WatchKey, batch: Vec<(Element, bool)>) {
        if self.destroyed {
            return;
        }
        self.begin();
        for (element, is_intersecting) in batch {
            let Some(id) = dom::id_of(&element) else {
                continue;
            };
            match key {
                WatchKey::Motion(family) => self.motion.on_intersection(family, id, is_intersecting),
                WatchKey::Counters => {
                    if !is_intersecting {
                        continue;
                    }
                    self.observers.unobserve(WatchKey::Counters, &element);
                    if self.page.start_counter(id) {
                        self.request_frame();
                    }
                }
                WatchKey::SkillBars => {
                    if !is_intersecting {
                        continue;
                    }
                    self.observers.unobserve(WatchKey::SkillBars, &element);
                    self.showcase.on_skill_bar_visible(id);
                }
            }
        }
        self.flush();
    }

    pub fn on_scroll(&mut self) {
        if self.destroyed {
            return;
        }
        self.begin();
        self.motion.on_scroll();
        self.request_frame();
        self.flush();
    }

    pub fn on_animation_frame(&mut self) {
        self.clock.frame_ran();
        if self.destroyed {
            return;
        }
        let now = self.begin();
        let metrics = dom::scroll_metrics(&self.window, &self.document);
        if self.motion.frame_pending() {
            self.motion.on_frame(&metrics);
        }
        match self.page.on_frame(now, metrics.scroll_y) {
            Ok(true) => self.request_frame(),
            Ok(false) => {}
            Err(err) => log::warn!("page frame: {:?}", err),
        }
        self.flush();
    }

    pub fn on_timeout(&mut self) {
        self.clock.fired();
        if self.destroyed {
            return;
        }
        self.begin();
        self.flush();
    }

    pub fn on_pointer_move(&mut self, id: ElementId, client_x: f32, client_y: f32) {
        if self.destroyed {
            return;
        }
        let Some(rect) = self.elements.live(id).map(|el| dom::client_rect(el)) else {
            return;
        };
        self.begin();
        self.motion
            .on_pointer_move(id, &PointerSample::new(client_x, client_y, rect));
        self.flush();
    }

    pub fn on_pointer_enter(&mut self, id: ElementId) {
        if self.destroyed {
            return;
        }
        self.begin();
        self.motion.on_pointer_enter(id);
        self.flush();
    }

    pub fn on_pointer_leave(&mut self, id: ElementId) {
        if self.destroyed {
            return;
        }
        self.begin();
        self.motion.on_pointer_leave(id);
        self.flush();
    }

    pub fn on_card_enter(&mut self, card: ElementId) {
        if self.destroyed {
            return;
        }
        self.begin();
        self.showcase.on_card_enter(card);
        self.flush();
    }

    pub fn on_card_leave(&mut self, card: ElementId) {
        if self.destroyed {
            return;
        }
        self.begin();
        self.showcase.on_card_leave(card);
        self.flush();
    }

    pub fn on_project_focus(&mut self, card: ElementId) {
        if self.destroyed {
            return;
        }
        self.begin();
        self.showcase.on_project_focus(card);
        self.flush();
    }

    pub fn on_project_blur(&mut self, card: ElementId) {
        if self.destroyed {
            return;
        }
        self.begin();
        self.showcase.on_project_blur(card);
        self.flush();
    }

    pub fn on_link_press(&mut self, link: ElementId) {
        if self.destroyed {
            return;
        }
        self.begin();
        self.showcase.on_link_press(link);
        self.flush();
    }

    /// First link of a live project card.
    pub fn project_link(&self, card: ElementId) -> Option<HtmlElement> {
        let el = self.elements.live(card)?;
        el.query_selector(PROJECT_LINK_SELECTOR)
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    pub fn on_resize(&mut self) {
        if self.destroyed {
            return;
        }
        self.begin();
        self.page.on_resize();
        self.flush();
    }

    pub fn on_contact_submit(&mut self) {
        if self.destroyed {
            return;
        }
        self.begin();
        report("contact form", self.page.submit_contact());
        self.flush();
    }

    pub fn on_scroll_top(&mut self) {
        self.page.scroll_to_top();
    }

    /// True when the click was turned into a smooth scroll.
    pub fn on_anchor_click(&mut self, href: &str) -> bool {
        self.page.follow_anchor(href)
    }

    pub fn toggle_language(&mut self) {
        if self.destroyed {
            return;
        }
        self.begin();
        report("language toggle", self.page.toggle_language());
        self.flush();
    }

    /// Elements left the document: cancel their timers and stop watching them.
    pub fn release_nodes(&mut self, ids: &[ElementId]) {
        if self.destroyed {
            return;
        }
        self.begin();
        for &id in ids {
            self.motion.release_element(id);
            self.page.release(id);
            self.showcase.release(id);
            self.element_listeners.remove(&id);
        }
        self.apply_ops();
        for &id in ids {
            if let Some(el) = self.elements.remove(id) {
                self.observers.unobserve(WatchKey::Counters, &el);
                self.observers.unobserve(WatchKey::SkillBars, &el);
            }
        }
        log::debug!("runner: released {} removed elements", ids.len());
        self.flush();
    }

    /// Tear everything down. Safe to call twice.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.motion.destroy();
        self.page.destroy();
        self.showcase.destroy();
        self.apply_ops();
        self.destroyed = true;

        self.removals = None;
        self.observers.disconnect_all();
        self.listeners.clear();
        self.element_listeners.clear();
        self.clock.cancel();
        self.elements.clear();
        log::info!("runner: destroyed");
    }
}

/// Engine ids of `root` and every tagged element below it.
fn collect_ids(root: &Element, ids: &mut Vec<ElementId>) {
    ids.extend(dom::id_of(root));
    let selector = format!("[{}]", ID_ATTR);
    if let Ok(tagged) = root.query_selector_all(&selector) {
        for node in (0..tagged.length()).filter_map(|i| tagged.item(i)) {
            if let Ok(el) = node.dyn_into::<Element>() {
                ids.extend(dom::id_of(&el));
            }
        }
    }
}
