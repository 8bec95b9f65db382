//! Thin helpers over `web-sys` plus the table that maps engine ids to live elements.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use folio_engine::{ElementId, Rect, ScrollMetrics};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList, Window};

/// Attribute carrying an element's engine id.
pub const ID_ATTR: &str = "data-folio-id";

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub fn document(window: &Window) -> Result<Document, JsValue> {
    window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

fn html_elements(list: NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Every element matching `selector` that is an `HtmlElement`, in document order.
pub fn query_all(root: &Document, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    Ok(html_elements(root.query_selector_all(selector)?))
}

/// Same as `query_all`, scoped to a subtree.
pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    Ok(html_elements(root.query_selector_all(selector)?))
}

pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn client_rect(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
}

pub fn viewport_height(window: &Window) -> f32 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32
}

pub fn viewport_width(window: &Window) -> f32 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32
}

pub fn scroll_y(window: &Window) -> f32 {
    window.scroll_y().unwrap_or(0.0) as f32
}

pub fn scroll_metrics(window: &Window, document: &Document) -> ScrollMetrics {
    let scroll_height = document
        .document_element()
        .map(|root| root.scroll_height() as f32)
        .unwrap_or(0.0);
    ScrollMetrics {
        scroll_y: scroll_y(window),
        scroll_height,
        viewport_height: viewport_height(window),
    }
}

/// Parse the value of `ID_ATTR`.
pub fn parse_id(raw: &str) -> Option<ElementId> {
    raw.trim().parse().ok().map(ElementId)
}

/// Engine id stamped on an element, if any.
pub fn id_of(element: &Element) -> Option<ElementId> {
    parse_id(&element.get_attribute(ID_ATTR)?)
}

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

/// A fresh element id. Ids are never reused for the life of the page, so a
/// stamp left behind by an earlier runner can never name a newer element.
pub fn allocate_id() -> ElementId {
    ElementId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Live elements known to the coordinator, by id.
///
/// Ids are stamped on the element itself so removal notifications (which only
/// hand back nodes) can be mapped back to engine ids.
pub struct ElementTable {
    elements: HashMap<ElementId, HtmlElement>,
}

impl ElementTable {
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
        }
    }

    /// The element's id, assigning one on first sight.
    pub fn intern(&mut self, element: &HtmlElement) -> Result<ElementId, JsValue> {
        if let Some(id) = id_of(element) {
            if self.elements.contains_key(&id) {
                return Ok(id);
            }
        }
        let id = allocate_id();
        element.set_attribute(ID_ATTR, &id.0.to_string())?;
        self.elements.insert(id, element.clone());
        Ok(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&HtmlElement> {
        self.elements.get(&id)
    }

    /// The element, only if it is still attached to the document.
    pub fn live(&self, id: ElementId) -> Option<&HtmlElement> {
        self.get(id).filter(|el| el.is_connected())
    }

    pub fn remove(&mut self, id: ElementId) -> Option<HtmlElement> {
        self.elements.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Forget every element and take the id stamps off them.
    pub fn clear(&mut self) {
        for (_, element) in self.elements.drain() {
            let _ = element.remove_attribute(ID_ATTR);
        }
    }
}

impl Default for ElementTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stamped_ids() {
        assert_eq!(parse_id("12"), Some(ElementId(12)));
        assert_eq!(parse_id(" 3 "), Some(ElementId(3)));
        assert_eq!(parse_id("x"), None);
        assert_eq!(parse_id("-1"), None);
    }

    #[test]
    fn ids_keep_counting_across_tables() {
        let first = allocate_id();
        let _table = ElementTable::new();
        let second = allocate_id();
        assert!(second > first);
        assert_ne!(second, ElementId(1));
    }
}
