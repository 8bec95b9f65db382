//! Real `IntersectionObserver`s backing the engine's visibility watchers.

use std::collections::HashMap;

use folio_engine::{Family, WatcherOptions};
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// Which observer a notification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchKey {
    /// One per reveal family, driven by the coordinator.
    Motion(Family),
    /// Statistic counters, started when half visible.
    Counters,
    /// Skill bars, filled once and then dropped.
    SkillBars,
}

/// Activation options of the counter observer.
pub fn counter_options() -> WatcherOptions {
    WatcherOptions::new(0.5, "0px")
}

struct Watch {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

/// Live observers by key. Every notification is forwarded to the runner as a
/// batch of (target, is_intersecting) pairs.
#[derive(Default)]
pub struct ObserverSet {
    watches: HashMap<WatchKey, Watch>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the observer for `key`. A second connect for the same key is ignored.
    pub fn connect(&mut self, key: WatchKey, options: &WatcherOptions) -> Result<(), JsValue> {
        if self.watches.contains_key(&key) {
            return Ok(());
        }
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let batch: Vec<(Element, bool)> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| (entry.target(), entry.is_intersecting()))
                    .collect();
                crate::with_runner(|runner| runner.on_intersections(key, batch));
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold as f64));
        init.set_root_margin(&options.root_margin);
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        log::debug!(
            "observers: connected {:?} (threshold {}, margin {})",
            key,
            options.threshold,
            options.root_margin
        );
        self.watches.insert(
            key,
            Watch {
                observer,
                _callback: callback,
            },
        );
        Ok(())
    }

    pub fn observe(&self, key: WatchKey, element: &Element) {
        if let Some(watch) = self.watches.get(&key) {
            watch.observer.observe(element);
        }
    }

    pub fn unobserve(&self, key: WatchKey, element: &Element) {
        if let Some(watch) = self.watches.get(&key) {
            watch.observer.unobserve(element);
        }
    }

    pub fn disconnect(&mut self, key: WatchKey) {
        if let Some(watch) = self.watches.remove(&key) {
            watch.observer.disconnect();
        }
    }

    pub fn disconnect_all(&mut self) {
        for (_, watch) in self.watches.drain() {
            watch.observer.disconnect();
        }
    }

    pub fn is_connected(&self, key: WatchKey) -> bool {
        self.watches.contains_key(&key)
    }
}

impl Drop for ObserverSet {
    fn drop(&mut self) {
        self.disconnect_all();
    }
}
