use std::collections::HashSet;

use crate::api::config::WatcherOptions;
use crate::api::types::{ElementId, Family};

/// Bookkeeping mirror of one viewport-intersection watcher.
///
/// The host owns the real observer; this side decides which notifications
/// count. Once disconnected, a watcher accepts nothing.
#[derive(Debug, Clone)]
pub struct VisibilityWatcher {
    family: Family,
    options: WatcherOptions,
    observed: HashSet<ElementId>,
    connected: bool,
}

impl VisibilityWatcher {
    pub fn new(family: Family, options: WatcherOptions) -> Self {
        Self {
            family,
            options,
            observed: HashSet::new(),
            connected: true,
        }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn options(&self) -> &WatcherOptions {
        &self.options
    }

    /// Start watching an element. No-op (false) once disconnected or already watched.
    pub fn observe(&mut self, element: ElementId) -> bool {
        self.connected && self.observed.insert(element)
    }

    /// Stop watching an element. False if it was not being watched.
    pub fn unobserve(&mut self, element: ElementId) -> bool {
        self.observed.remove(&element)
    }

    pub fn is_observing(&self, element: ElementId) -> bool {
        self.connected && self.observed.contains(&element)
    }

    /// Drop every element and refuse new ones.
    pub fn disconnect(&mut self) {
        self.observed.clear();
        self.connected = false;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Number of elements still being watched.
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watcher() -> VisibilityWatcher {
        VisibilityWatcher::new(Family::Scale, WatcherOptions::for_family(Family::Scale))
    }

    #[test]
    fn observe_and_unobserve() {
        let mut w = watcher();
        assert!(w.observe(ElementId(1)));
        assert!(!w.observe(ElementId(1)));
        assert!(w.is_observing(ElementId(1)));
        assert!(w.unobserve(ElementId(1)));
        assert!(!w.unobserve(ElementId(1)));
        assert!(w.is_empty());
    }

    #[test]
    fn disconnected_watcher_accepts_nothing() {
        let mut w = watcher();
        w.observe(ElementId(1));
        w.disconnect();
        assert!(!w.is_connected());
        assert!(!w.is_observing(ElementId(1)));
        assert!(!w.observe(ElementId(2)));
        assert_eq!(w.len(), 0);
    }
}
