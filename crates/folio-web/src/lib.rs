//! Browser bridge for `folio-engine`.
//!
//! The page loads the generated module and calls `folio_init` once the DOM is
//! parsed. Everything after that is driven by browser events: the load and
//! unload hooks are attached here, every other listener belongs to the runner.
//!
//! ```js
//! import init, { folio_init } from "./folio_web.js";
//! await init();
//! folio_init(JSON.stringify({ capabilities: { morph: false } }));
//! ```

use std::cell::{Cell, RefCell};

use folio_engine::PageConfig;
use wasm_bindgen::prelude::*;

pub mod clock;
pub mod dom;
pub mod listeners;
pub mod observers;
pub mod page;
pub mod runner;
pub mod scan;

pub use runner::PageRunner;

thread_local! {
    static RUNNER: RefCell<Option<PageRunner>> = const { RefCell::new(None) };
    static HOOKED: Cell<bool> = const { Cell::new(false) };
}

/// Run `f` against the live runner. None before init, after destroy, or when
/// the runner is already busy further up the stack.
pub(crate) fn with_runner<R>(f: impl FnOnce(&mut PageRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.try_borrow_mut().ok()?;
        borrow.as_mut().map(f)
    })
}

fn install(config: PageConfig) -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document(&window)?;

    if let Some(mut old) = RUNNER.with(|cell| cell.borrow_mut().take()) {
        log::warn!("folio: init called twice, replacing the running page");
        old.destroy();
    }

    let runner = PageRunner::new(config)?;
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
    with_runner(|runner| runner.start()).unwrap_or(Ok(()))?;

    if !HOOKED.with(Cell::get) {
        listeners::attach_forever(window.as_ref(), "load", |_| folio_on_load())?;
        listeners::attach_forever(window.as_ref(), "beforeunload", |_| folio_destroy())?;
        HOOKED.with(|hooked| hooked.set(true));
    }

    if document.ready_state() == "complete" {
        folio_on_load();
    }
    Ok(())
}

/// Set up every effect on the page. `config_json` may be empty for defaults.
#[wasm_bindgen]
pub fn folio_init(config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = PageConfig::from_json(config_json).unwrap_or_else(|err| {
        log::warn!("folio: bad config ({}), using defaults", err);
        PageConfig::default()
    });

    match install(config) {
        Ok(()) => log::info!("folio: initialized"),
        Err(err) => log::error!("folio: init failed: {:?}", err),
    }
}

/// The window `load` event. Runs the catch-up reveal pass once.
#[wasm_bindgen]
pub fn folio_on_load() {
    with_runner(|runner| runner.on_load());
}

/// Cancel every timer, disconnect every observer, detach every listener.
#[wasm_bindgen]
pub fn folio_destroy() {
    if let Some(mut runner) = RUNNER.with(|cell| cell.try_borrow_mut().ok()?.take()) {
        runner.destroy();
    }
}

/// Switch between Persian and English.
#[wasm_bindgen]
pub fn folio_toggle_language() {
    with_runner(|runner| runner.toggle_language());
}
