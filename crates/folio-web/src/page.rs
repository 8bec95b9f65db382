//! Page furniture beside the motion coordinator: typing text, language
//! toggle, contact form, device fixups, particles, navigation and counters.
//!
//! The engine's extension modules decide what to show; this writes it into
//! the document. Delayed work runs on its own logical clock, advanced by the
//! runner alongside the coordinator's.

use std::collections::HashMap;

use folio_engine::extensions::contact::{
    notice_html, notice_style, sending_label, success_notice, NOTICE_ENTER_MS,
    NOTICE_HIDDEN_TRANSFORM, NOTICE_LEAVE_MS, NOTICE_REMOVE_MS, NOTICE_SHOWN_TRANSFORM, SUBMIT_MS,
};
use folio_engine::extensions::device::{classify, MOBILE_FIXUPS, RESIZE_SETTLE_MS, VIEWPORT_SELECTOR};
use folio_engine::extensions::i18n::{with_icon, TYPING_RESTART_MS};
use folio_engine::extensions::nav::{anchor_id, ACTIVE_CLASS, SCROLLED_CLASS, SHOW_CLASS};
use folio_engine::extensions::particles::{particles_enabled, PARTICLE_CLASS};
use folio_engine::{
    ContactForm, CountUp, DeviceClass, DeviceProbe, ElementId, Language, NavConfig, NoticeKind,
    PageConfig, ParticleField, Scheduler, SectionPos, TimerId, Typewriter,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, ScrollBehavior, ScrollToOptions, Window,
};

use crate::dom::{self, ElementTable};

pub const TYPING_TARGET_ID: &str = "typingText";
pub const LANG_TOGGLE_ID: &str = "langToggle";
pub const CONTACT_FORM_ID: &str = "contactForm";
pub const NAVBAR_ID: &str = "mainNav";
pub const SCROLL_TOP_ID: &str = "scrollToTop";
pub const PARTICLES_ID: &str = "particles";
pub const COUNTER_SELECTOR: &str = ".stat-number";
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
const NAV_LINK_SELECTOR: &str = ".nav-link";
const SECTION_SELECTOR: &str = "section[id]";
const CONTACT_FIELDS: [&str; 4] = ["name", "email", "subject", "message"];
const LANG_ICON: &str = "<i class=\"fas fa-language\"></i>";
const SPINNER_ICON: &str = "<i class=\"fas fa-spinner fa-spin\"></i>";

/// Delayed page work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTask {
    TypeStep,
    RestartTyping,
    SubmitDone,
    NoticeEnter(u32),
    NoticeLeave(u32),
    NoticeRemove(u32),
    ParticleRespawn(u32),
    ResizeSettled,
}

/// Submit button state saved while a submission is in flight.
struct Submission {
    form: HtmlFormElement,
    button: Option<(HtmlButtonElement, String)>,
}

struct Counter {
    element: HtmlElement,
    count: CountUp,
    running: bool,
}

pub struct PageExtras {
    window: Window,
    document: Document,
    reduced_motion: bool,
    nav: NavConfig,
    timers: Scheduler<PageTask>,

    language: Language,
    typewriter: Typewriter,
    typing_timer: Option<TimerId>,

    submission: Option<Submission>,
    notices: HashMap<u32, Element>,
    next_notice: u32,

    device: Option<DeviceClass>,
    resize_timer: Option<TimerId>,

    field: ParticleField,
    /// Live particles and their respawn timers.
    particles: HashMap<u32, (Element, TimerId)>,

    counters: HashMap<ElementId, Counter>,
    destroyed: bool,
}

impl PageExtras {
    pub fn new(window: &Window, document: &Document, config: &PageConfig, reduced_motion: bool) -> Self {
        let language = document
            .document_element()
            .and_then(|root| root.get_attribute("lang"))
            .map(|tag| Language::from_tag(&tag))
            .unwrap_or_default();
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64 + 1;
        Self {
            window: window.clone(),
            document: document.clone(),
            reduced_motion,
            nav: config.nav,
            timers: Scheduler::new(),
            language,
            typewriter: Typewriter::new(language.typing_phrases(), config.typing),
            typing_timer: None,
            submission: None,
            notices: HashMap::new(),
            next_notice: 1,
            device: None,
            resize_timer: None,
            field: ParticleField::new(config.particles, seed),
            particles: HashMap::new(),
            counters: HashMap::new(),
            destroyed: false,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Apply the device fixups, start the typewriter and particles, and
    /// collect the statistic counters. Returns the counter ids to observe.
    pub fn start(&mut self, table: &mut ElementTable) -> Result<Vec<ElementId>, JsValue> {
        self.apply_device()?;
        self.start_typing();
        let counters = self.collect_counters(table)?;
        log::info!(
            "page: started ({:?}, {:?}, {} counters)",
            self.language,
            self.device,
            counters.len()
        );
        Ok(counters)
    }

    // -- Clock --

    /// Move the page clock to `now_ms` and run whatever came due.
    pub fn advance(&mut self, now_ms: f64) -> Result<(), JsValue> {
        if self.destroyed {
            return Ok(());
        }
        for (_, task) in self.timers.advance(now_ms) {
            self.run(task)?;
        }
        Ok(())
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.timers.next_deadline()
    }

    fn run(&mut self, task: PageTask) -> Result<(), JsValue> {
        match task {
            PageTask::TypeStep => self.type_step(),
            PageTask::RestartTyping => {
                self.typing_timer = None;
                self.typewriter.restart(self.language.typing_phrases());
                self.set_typing_text("");
                self.start_typing();
                Ok(())
            }
            PageTask::SubmitDone => self.finish_submission(),
            PageTask::NoticeEnter(id) => {
                if let Some(notice) = self.notices.get(&id) {
                    set_transform(notice, NOTICE_SHOWN_TRANSFORM)?;
                }
                Ok(())
            }
            PageTask::NoticeLeave(id) => {
                if let Some(notice) = self.notices.get(&id) {
                    set_transform(notice, NOTICE_HIDDEN_TRANSFORM)?;
                }
                Ok(())
            }
            PageTask::NoticeRemove(id) => {
                if let Some(notice) = self.notices.remove(&id) {
                    notice.remove();
                }
                Ok(())
            }
            PageTask::ParticleRespawn(id) => self.respawn_particle(id),
            PageTask::ResizeSettled => {
                self.resize_timer = None;
                self.apply_device()
            }
        }
    }

    // -- Typing --

    fn start_typing(&mut self) {
        if self.typewriter.is_empty() || self.typing_target().is_none() {
            return;
        }
        let delay = self.typewriter.start_delay_ms() as f64;
        self.typing_timer = Some(self.timers.after(None, delay, PageTask::TypeStep));
    }

    fn typing_target(&self) -> Option<HtmlElement> {
        dom::by_id(&self.document, TYPING_TARGET_ID)
    }

    fn set_typing_text(&self, text: &str) {
        if let Some(target) = self.typing_target() {
            target.set_text_content(Some(text));
        }
    }

    fn type_step(&mut self) -> Result<(), JsValue> {
        self.typing_timer = None;
        let Some(step) = self.typewriter.step() else {
            return Ok(());
        };
        self.set_typing_text(&step.text);
        let delay = step.next_delay_ms as f64;
        self.typing_timer = Some(self.timers.after(None, delay, PageTask::TypeStep));
        Ok(())
    }

    // -- Language --

    /// Switch language, rewrite the translated text, and restart typing.
    pub fn toggle_language(&mut self) -> Result<(), JsValue> {
        if self.destroyed {
            return Ok(());
        }
        let lang = self.language.toggled();
        self.language = lang;

        if let Some(root) = self.document.document_element() {
            root.set_attribute("lang", lang.tag())?;
            root.set_attribute("dir", lang.dir())?;
        }
        if let Some(toggle) = dom::by_id::<HtmlElement>(&self.document, LANG_TOGGLE_ID) {
            toggle.set_inner_html(&format!("{} {}", LANG_ICON, lang.toggle_label()));
        }
        self.relabel(NAV_LINK_SELECTOR, lang.nav_labels())?;
        self.relabel(".section-title", lang.section_titles())?;
        for title in dom::query_all(&self.document, ".hero-title")? {
            title.set_inner_html(lang.hero_title_html());
        }
        for description in dom::query_all(&self.document, ".hero-description")? {
            description.set_text_content(Some(lang.hero_description()));
        }

        if let Some(timer) = self.typing_timer.take() {
            self.timers.cancel(timer);
        }
        self.typing_timer = Some(self.timers.after(
            None,
            TYPING_RESTART_MS as f64,
            PageTask::RestartTyping,
        ));
        log::info!("page: language switched to {}", lang.tag());
        Ok(())
    }

    /// Replace the text of each match, keeping a leading icon if it has one.
    fn relabel(&self, selector: &str, labels: &[&str]) -> Result<(), JsValue> {
        for (element, label) in dom::query_all(&self.document, selector)?.iter().zip(labels) {
            let icon = element.query_selector("i")?.map(|i| i.outer_html());
            element.set_inner_html(&with_icon(icon.as_deref(), label));
        }
        Ok(())
    }

    // -- Contact form --

    pub fn contact_form(&self) -> Option<HtmlFormElement> {
        dom::by_id(&self.document, CONTACT_FORM_ID)
    }

    fn field_value(&self, id: &str) -> String {
        let Some(element) = self.document.get_element_by_id(id) else {
            return String::new();
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return input.value();
        }
        if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            return area.value();
        }
        String::new()
    }

    /// Validate the form and start a simulated submission.
    pub fn submit_contact(&mut self) -> Result<(), JsValue> {
        if self.destroyed || self.submission.is_some() {
            return Ok(());
        }
        let Some(form) = self.contact_form() else {
            return Ok(());
        };
        let [name, email, subject, message] = CONTACT_FIELDS.map(|id| self.field_value(id));
        let contact = ContactForm {
            name,
            email,
            subject,
            message,
        };
        if let Err(err) = contact.validate() {
            log::debug!("page: contact form rejected: {}", err);
            return self.show_notice(NoticeKind::Error, err.notice(self.language));
        }

        let button = form
            .query_selector("button[type=\"submit\"]")?
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            .map(|button| {
                let label = button.inner_html();
                button.set_inner_html(&format!("{} {}", SPINNER_ICON, sending_label(self.language)));
                button.set_disabled(true);
                (button, label)
            });
        self.submission = Some(Submission { form, button });
        self.timers.after(None, SUBMIT_MS as f64, PageTask::SubmitDone);
        Ok(())
    }

    fn finish_submission(&mut self) -> Result<(), JsValue> {
        let Some(submission) = self.submission.take() else {
            return Ok(());
        };
        if let Some((button, label)) = submission.button {
            button.set_inner_html(&label);
            button.set_disabled(false);
        }
        submission.form.reset();
        self.show_notice(NoticeKind::Success, success_notice(self.language))
    }

    /// Attach a toast to the body and schedule its slide in, out and removal.
    pub fn show_notice(&mut self, kind: NoticeKind, message: &str) -> Result<(), JsValue> {
        let Some(body) = self.document.body() else {
            return Ok(());
        };
        let notice = self.document.create_element("div")?;
        notice.set_class_name(&format!("notification {}", kind.class_name()));
        notice.set_attribute("style", &notice_style(kind))?;
        notice.set_inner_html(&notice_html(kind, message));
        body.append_child(&notice)?;

        let id = self.next_notice;
        self.next_notice += 1;
        self.notices.insert(id, notice);
        self.timers.after(None, NOTICE_ENTER_MS as f64, PageTask::NoticeEnter(id));
        self.timers.after(None, NOTICE_LEAVE_MS as f64, PageTask::NoticeLeave(id));
        self.timers.after(
            None,
            (NOTICE_LEAVE_MS + NOTICE_REMOVE_MS) as f64,
            PageTask::NoticeRemove(id),
        );
        Ok(())
    }

    // -- Device --

    fn probe(&self) -> DeviceProbe {
        DeviceProbe {
            user_agent: self.window.navigator().user_agent().unwrap_or_default(),
            width: dom::viewport_width(&self.window),
            has_orientation: js_sys::Reflect::has(&self.window, &JsValue::from_str("orientation"))
                .unwrap_or(false),
        }
    }

    /// Resize or orientation change: re-evaluate once things settle.
    pub fn on_resize(&mut self) {
        if self.destroyed {
            return;
        }
        if let Some(timer) = self.resize_timer.take() {
            self.timers.cancel(timer);
        }
        self.resize_timer = Some(self.timers.after(
            None,
            RESIZE_SETTLE_MS as f64,
            PageTask::ResizeSettled,
        ));
    }

    fn apply_device(&mut self) -> Result<(), JsValue> {
        let class = classify(&self.probe());
        if let Some(root) = self.document.document_element() {
            mark_device(&root, class)?;
            if let Some(root) = root.dyn_ref::<HtmlElement>() {
                let style = root.style();
                style.set_property("--section-padding", class.section_padding())?;
                if let Some(padding) = class.container_padding() {
                    style.set_property("--container-padding", padding)?;
                } else {
                    style.remove_property("--container-padding")?;
                }
            }
        }
        if let Some(body) = self.document.body() {
            mark_device(&body, class)?;
        }

        if let Some(content) = class.viewport_content() {
            if let Some(viewport) = self.document.query_selector(VIEWPORT_SELECTOR)? {
                viewport.set_attribute("content", content)?;
            }
        }

        let mobile = class == DeviceClass::Mobile;
        for (selector, fixup) in MOBILE_FIXUPS {
            for element in dom::query_all(&self.document, selector)? {
                element.class_list().toggle_with_force(fixup, mobile)?;
            }
        }

        if let Some(container) = dom::by_id::<HtmlElement>(&self.document, PARTICLES_ID) {
            let display = if class.shows_particles() { "" } else { "none" };
            container.style().set_property("display", display)?;
        }
        self.set_particles(particles_enabled(self.reduced_motion, class.shows_particles()))?;

        if self.device != Some(class) {
            log::debug!("page: device is {:?}", class);
        }
        self.device = Some(class);
        Ok(())
    }

    // -- Particles --

    fn set_particles(&mut self, enabled: bool) -> Result<(), JsValue> {
        if !enabled {
            self.clear_particles();
            return Ok(());
        }
        if !self.particles.is_empty() {
            return Ok(());
        }
        let Some(container) = self.document.get_element_by_id(PARTICLES_ID) else {
            return Ok(());
        };
        for id in 0..self.field.config().count {
            self.attach_particle(&container, id)?;
        }
        Ok(())
    }

    fn attach_particle(&mut self, container: &Element, id: u32) -> Result<(), JsValue> {
        let spec = self.field.spawn();
        let particle = self.document.create_element("div")?;
        particle.set_class_name(PARTICLE_CLASS);
        if let Some(html) = particle.dyn_ref::<HtmlElement>() {
            let style = html.style();
            for (name, value) in spec.style() {
                style.set_property(name, &value)?;
            }
        }
        container.append_child(&particle)?;
        let lifetime = self.field.config().lifetime_ms as f64;
        let timer = self.timers.after(None, lifetime, PageTask::ParticleRespawn(id));
        self.particles.insert(id, (particle, timer));
        Ok(())
    }

    fn respawn_particle(&mut self, id: u32) -> Result<(), JsValue> {
        let Some((old, _)) = self.particles.remove(&id) else {
            return Ok(());
        };
        old.remove();
        match self.document.get_element_by_id(PARTICLES_ID) {
            Some(container) => self.attach_particle(&container, id),
            None => Ok(()),
        }
    }

    fn clear_particles(&mut self) {
        for (_, (particle, timer)) in self.particles.drain() {
            self.timers.cancel(timer);
            particle.remove();
        }
    }

    // -- Navigation --

    fn sections(&self) -> Result<Vec<SectionPos>, JsValue> {
        Ok(dom::query_all(&self.document, SECTION_SELECTOR)?
            .into_iter()
            .map(|section| SectionPos {
                id: section.id(),
                top: section.offset_top() as f32,
            })
            .collect())
    }

    fn update_nav(&self, scroll_y: f32) -> Result<(), JsValue> {
        let state = self.nav.state(scroll_y, &self.sections()?);
        if let Some(navbar) = self.document.get_element_by_id(NAVBAR_ID) {
            navbar.class_list().toggle_with_force(SCROLLED_CLASS, state.scrolled)?;
        }
        for link in dom::query_all(&self.document, NAV_LINK_SELECTOR)? {
            let is_active = link
                .get_attribute("href")
                .is_some_and(|href| state.is_active_link(&href));
            link.class_list().toggle_with_force(ACTIVE_CLASS, is_active)?;
        }
        if let Some(button) = self.document.get_element_by_id(SCROLL_TOP_ID) {
            button.class_list().toggle_with_force(SHOW_CLASS, state.show_scroll_top)?;
        }
        Ok(())
    }

    fn smooth_scroll_to(&self, top: f32) {
        let options = ScrollToOptions::new();
        options.set_top(top as f64);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    pub fn scroll_to_top(&self) {
        if !self.destroyed {
            self.smooth_scroll_to(0.0);
        }
    }

    /// Smooth-scroll to the section an in-page link points at. True when the
    /// link was handled and its default jump should be suppressed.
    pub fn follow_anchor(&self, href: &str) -> bool {
        if self.destroyed {
            return false;
        }
        let Some(target) = anchor_id(href).and_then(|id| dom::by_id::<HtmlElement>(&self.document, id))
        else {
            return false;
        };
        self.smooth_scroll_to(self.nav.anchor_target(target.offset_top() as f32));
        true
    }

    // -- Counters --

    fn collect_counters(&mut self, table: &mut ElementTable) -> Result<Vec<ElementId>, JsValue> {
        let mut ids = Vec::new();
        for element in dom::query_all(&self.document, COUNTER_SELECTOR)? {
            let text = element.text_content().unwrap_or_default();
            let target = element.get_attribute("data-target");
            let easing = element.get_attribute("data-easing");
            let Some(count) = CountUp::from_markup(&text, target.as_deref(), easing.as_deref()) else {
                log::debug!("page: counter text {:?} is not a number", text);
                continue;
            };
            let id = table.intern(&element)?;
            self.counters.insert(
                id,
                Counter {
                    element,
                    count,
                    running: false,
                },
            );
            ids.push(id);
        }
        Ok(ids)
    }

    /// A counter came half into view. True when it needs animation frames.
    pub fn start_counter(&mut self, id: ElementId) -> bool {
        if self.destroyed {
            return false;
        }
        let reduced = self.reduced_motion;
        let Some(counter) = self.counters.get_mut(&id) else {
            return false;
        };
        if reduced {
            counter.element.set_text_content(Some(&counter.count.final_text()));
            self.counters.remove(&id);
            return false;
        }
        counter.element.set_text_content(Some("0"));
        counter.running = true;
        true
    }

    /// One animation frame: navigation chrome and running counters.
    /// True while a counter still needs frames.
    pub fn on_frame(&mut self, now_ms: f64, scroll_y: f32) -> Result<bool, JsValue> {
        if self.destroyed {
            return Ok(false);
        }
        self.update_nav(scroll_y)?;

        let mut finished = Vec::new();
        for (id, counter) in self.counters.iter_mut().filter(|(_, c)| c.running) {
            let (text, done) = counter.count.frame(now_ms);
            counter.element.set_text_content(Some(&text));
            if done {
                finished.push(*id);
            }
        }
        for id in finished {
            self.counters.remove(&id);
        }
        Ok(self.counters.values().any(|c| c.running))
    }

    /// Forget an element that left the document.
    pub fn release(&mut self, id: ElementId) {
        self.counters.remove(&id);
    }

    // -- Teardown --

    /// Cancel every pending page task and detach toasts and particles.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.timers.clear();
        self.typing_timer = None;
        self.resize_timer = None;
        self.submission = None;
        for (_, notice) in self.notices.drain() {
            notice.remove();
        }
        self.clear_particles();
        self.counters.clear();
        self.destroyed = true;
        log::info!("page: destroyed");
    }
}

fn set_transform(element: &Element, value: &str) -> Result<(), JsValue> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        html.style().set_property("transform", value)?;
    }
    Ok(())
}

/// Put exactly one device class on `element`.
fn mark_device(element: &Element, class: DeviceClass) -> Result<(), JsValue> {
    let list = element.class_list();
    for other in DeviceClass::ALL {
        if other != class {
            list.remove_1(other.class_name())?;
        }
    }
    list.add_1(class.class_name())
}
