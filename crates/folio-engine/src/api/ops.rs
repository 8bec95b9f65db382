use crate::api::config::WatcherOptions;
use crate::api::types::{ElementId, Family};

/// Inline style properties the engine writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProp {
    Opacity,
    Transform,
    Transition,
    ClipPath,
    Width,
}

impl StyleProp {
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProp::Opacity => "opacity",
            StyleProp::Transform => "transform",
            StyleProp::Transition => "transition",
            StyleProp::ClipPath => "clip-path",
            StyleProp::Width => "width",
        }
    }
}

/// A single change the host must apply to the live document.
///
/// The engine never touches the DOM itself: every visible effect and every
/// watcher control action goes through this list, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DomOp {
    SetStyle {
        element: ElementId,
        prop: StyleProp,
        value: String,
    },
    AddClass {
        element: ElementId,
        class: &'static str,
    },
    RemoveClass {
        element: ElementId,
        class: &'static str,
    },
    /// Create the intersection watcher for a family.
    Connect {
        family: Family,
        options: WatcherOptions,
    },
    Observe {
        family: Family,
        element: ElementId,
    },
    Unobserve {
        family: Family,
        element: ElementId,
    },
    /// Tear down a family's watcher entirely.
    Disconnect { family: Family },
}

impl DomOp {
    /// The element this op targets, if any.
    pub fn element(&self) -> Option<ElementId> {
        match self {
            DomOp::SetStyle { element, .. }
            | DomOp::AddClass { element, .. }
            | DomOp::RemoveClass { element, .. }
            | DomOp::Observe { element, .. }
            | DomOp::Unobserve { element, .. } => Some(*element),
            DomOp::Connect { .. } | DomOp::Disconnect { .. } => None,
        }
    }

    /// Whether this op changes what the user sees (as opposed to watcher bookkeeping).
    pub fn is_visual(&self) -> bool {
        matches!(
            self,
            DomOp::SetStyle { .. } | DomOp::AddClass { .. } | DomOp::RemoveClass { .. }
        )
    }
}

/// Ordered buffer of pending DOM ops.
/// The engine writes into it; the host drains and applies it after each event.
#[derive(Debug, Default)]
pub struct OpBuffer {
    ops: Vec<DomOp>,
}

impl OpBuffer {
    pub fn new() -> Self {
        Self {
            ops: Vec::with_capacity(64),
        }
    }

    pub fn push(&mut self, op: DomOp) {
        self.ops.push(op);
    }

    pub fn set_style(&mut self, element: ElementId, prop: StyleProp, value: impl Into<String>) {
        self.ops.push(DomOp::SetStyle {
            element,
            prop,
            value: value.into(),
        });
    }

    pub fn add_class(&mut self, element: ElementId, class: &'static str) {
        self.ops.push(DomOp::AddClass { element, class });
    }

    pub fn remove_class(&mut self, element: ElementId, class: &'static str) {
        self.ops.push(DomOp::RemoveClass { element, class });
    }

    /// Take all pending ops, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<DomOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomOp> {
        self.ops.iter()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

/// Format a number for a CSS value: at most three decimals, no trailing zeros,
/// no negative zero. Non-finite input formats as `0`.
pub fn css_number(value: f32) -> String {
    if !value.is_finite() || value.abs() < 0.0005 {
        return "0".to_string();
    }
    let fixed = format!("{:.3}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_number_trims() {
        assert_eq!(css_number(3.0), "3");
        assert_eq!(css_number(-15.5), "-15.5");
        assert_eq!(css_number(0.1 + 0.2), "0.3");
        assert_eq!(css_number(-0.0), "0");
        assert_eq!(css_number(f32::NAN), "0");
        assert_eq!(css_number(f32::INFINITY), "0");
        assert_eq!(css_number(12.34567), "12.346");
    }

    #[test]
    fn drain_empties_buffer() {
        let mut ops = OpBuffer::new();
        ops.set_style(ElementId(1), StyleProp::Opacity, "1");
        ops.add_class(ElementId(2), "glowing");
        assert_eq!(ops.len(), 2);
        let drained = ops.drain();
        assert_eq!(drained.len(), 2);
        assert!(ops.is_empty());
        assert_eq!(drained[1].element(), Some(ElementId(2)));
        assert!(drained[0].is_visual());
    }
}
