//! JS-facing booth (wasm32 only)
//!
//! The page owns the countdown, rendering and buttons. It calls `pick()` when
//! the countdown ends and shows the "seen the whole list" panel when
//! `remaining()` reaches zero.

use wasm_bindgen::prelude::*;

use crate::booth::TicketBooth;
use crate::catalog::Catalog;
use crate::persistence::KeyValueStore;
use crate::settings::Settings;

use super::open_store;

/// Module start: route panics and `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Ticket booth ready");
}

#[wasm_bindgen(js_name = TicketBooth)]
pub struct WasmBooth {
    inner: TicketBooth<Box<dyn KeyValueStore>>,
}

#[wasm_bindgen(js_class = TicketBooth)]
impl WasmBooth {
    /// Build a booth over a JSON array of movies, restoring the stored pool.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str) -> Result<WasmBooth, JsValue> {
        let catalog = Catalog::from_json(catalog_json)
            .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
        let settings = Settings::load();
        let store = open_store(&settings);
        Ok(Self {
            inner: TicketBooth::from_settings(catalog, store, &settings),
        })
    }

    /// Next ticket as a JSON string, or `undefined` when the list is used up.
    pub fn pick(&mut self) -> Option<String> {
        let ticket = self.inner.issue()?;
        match serde_json::to_string(&ticket) {
            Ok(json) => Some(json),
            Err(e) => {
                log::error!("Failed to encode ticket: {}", e);
                None
            }
        }
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    pub fn total(&self) -> usize {
        self.inner.total()
    }

    #[wasm_bindgen(getter)]
    pub fn exhausted(&self) -> bool {
        self.inner.is_exhausted()
    }
}
