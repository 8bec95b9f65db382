//! Document scan: find every marked element and turn its markup into a trigger.

use folio_engine::extensions::showcase::{
    EXPERTISE_CARD_SELECTOR, PROJECT_CARD_SELECTOR, PROJECT_LINK_SELECTOR, SKILL_BAR_SELECTOR,
};
use folio_engine::{
    layer_speed, parallax_speed, ElementId, Family, PageConfig, RevealAttrs, RevealConfig, Trigger,
};
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlElement};

use crate::dom::{self, ElementTable};

pub const REVEAL_SELECTOR: &str = "[data-animate]";
pub const SCROLL_REVEAL_SELECTOR: &str =
    ".scroll-animate, .scroll-animate-left, .scroll-animate-right, .scroll-animate-scale";
pub const PARALLAX_SECTION_SELECTOR: &str = ".parallax-section";
pub const PARALLAX_LAYER_SELECTOR: &str = ".parallax-layer";
pub const PARALLAX_SELECTOR: &str = "[data-parallax]";
pub const FLOATING_SELECTOR: &str = ".floating-element";
pub const PROGRESS_SELECTOR: &str = ".scroll-progress";
pub const MAGNETIC_SELECTOR: &str = ".magnetic";
pub const TILT_SELECTOR: &str = ".tilt-effect";
pub const GLOW_SELECTOR: &str = ".glow-effect";
pub const MORPH_SELECTOR: &str = ".morphing-shape";

/// The trigger a `[data-animate]` element asks for, or None for an unknown family.
pub fn reveal_trigger(element: &HtmlElement, config: &PageConfig) -> Option<Trigger> {
    let family = Family::from_marker(&element.get_attribute("data-animate")?)?;
    let delay = element.get_attribute("data-delay");
    let duration = element.get_attribute("data-duration");
    let direction = element.get_attribute("data-direction");
    let attrs = RevealAttrs {
        delay: delay.as_deref(),
        duration: duration.as_deref(),
        direction: direction.as_deref(),
    };
    Some(Trigger::Reveal {
        family,
        config: RevealConfig::from_attrs(family, &attrs, &config.reveal),
    })
}

/// Give each layer of a parallax section a `data-parallax` speed by its position.
fn assign_layer_speeds(document: &Document) -> Result<(), JsValue> {
    for section in dom::query_all(document, PARALLAX_SECTION_SELECTOR)? {
        for (index, layer) in dom::query_all_in(&section, PARALLAX_LAYER_SELECTOR)?
            .iter()
            .enumerate()
        {
            layer.set_attribute("data-parallax", &layer_speed(index).to_string())?;
        }
    }
    Ok(())
}

/// Scan the document. Elements get ids in the table; the result lists every
/// (element, trigger) pair in document order, family by family.
pub fn scan(
    document: &Document,
    table: &mut ElementTable,
    config: &PageConfig,
) -> Result<Vec<(ElementId, Trigger)>, JsValue> {
    let caps = config.capabilities;
    let mut found = Vec::new();

    if caps.reveal {
        for el in dom::query_all(document, REVEAL_SELECTOR)? {
            match reveal_trigger(&el, config) {
                Some(trigger) => found.push((table.intern(&el)?, trigger)),
                None => log::debug!("scan: ignoring unknown data-animate value"),
            }
        }
    }

    if caps.scroll_reveal {
        for el in dom::query_all(document, SCROLL_REVEAL_SELECTOR)? {
            found.push((table.intern(&el)?, Trigger::ScrollReveal));
        }
    }

    if caps.scroll_effects {
        assign_layer_speeds(document)?;
        for el in dom::query_all(document, PARALLAX_SELECTOR)? {
            let speed = parallax_speed(el.get_attribute("data-parallax").as_deref());
            found.push((table.intern(&el)?, Trigger::Parallax { speed }));
        }
        for el in dom::query_all(document, FLOATING_SELECTOR)? {
            found.push((table.intern(&el)?, Trigger::Floating));
        }
        if let Some(el) = dom::query_all(document, PROGRESS_SELECTOR)?.into_iter().next() {
            found.push((table.intern(&el)?, Trigger::Progress));
        }
    }

    if caps.pointer {
        let pointer = [
            (MAGNETIC_SELECTOR, Trigger::Magnetic),
            (TILT_SELECTOR, Trigger::Tilt),
            (GLOW_SELECTOR, Trigger::Glow),
        ];
        for (selector, trigger) in pointer {
            for el in dom::query_all(document, selector)? {
                found.push((table.intern(&el)?, trigger.clone()));
            }
        }
    }

    if caps.morph {
        for el in dom::query_all(document, MORPH_SELECTOR)? {
            found.push((table.intern(&el)?, Trigger::Morph));
        }
    }

    log::info!("scan: {} triggers on {} elements", found.len(), table.len());
    Ok(found)
}

/// Skill bars, expertise cards and project cards found on the page.
#[derive(Default)]
pub struct ShowcaseScan {
    /// Each bar with its raw `data-width`.
    pub bars: Vec<(ElementId, Option<String>)>,
    /// Expertise cards in document order.
    pub cards: Vec<ElementId>,
    /// Each project card with its links.
    pub projects: Vec<(ElementId, Vec<ElementId>)>,
}

pub fn scan_showcase(document: &Document, table: &mut ElementTable) -> Result<ShowcaseScan, JsValue> {
    let mut found = ShowcaseScan::default();
    for el in dom::query_all(document, SKILL_BAR_SELECTOR)? {
        found.bars.push((table.intern(&el)?, el.get_attribute("data-width")));
    }
    for el in dom::query_all(document, EXPERTISE_CARD_SELECTOR)? {
        found.cards.push(table.intern(&el)?);
    }
    for card in dom::query_all(document, PROJECT_CARD_SELECTOR)? {
        let links = dom::query_all_in(&card, PROJECT_LINK_SELECTOR)?
            .iter()
            .map(|link| table.intern(link))
            .collect::<Result<Vec<_>, _>>()?;
        found.projects.push((table.intern(&card)?, links));
    }
    log::debug!(
        "scan: {} skill bars, {} expertise cards, {} project cards",
        found.bars.len(),
        found.cards.len(),
        found.projects.len()
    );
    Ok(found)
}
