//! `window.poemDebug`: console access to the archive for manual checks.

use std::rc::Rc;

use inkleaf_core::{catalog::PoemCatalog, present::Presenter, selector::SelectOutcome};
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::archive::ArchiveState;

const DEBUG_HANDLE_NAME: &str = "poemDebug";

#[wasm_bindgen]
pub struct PoemDebug {
    archive: Rc<ArchiveState>,
}

#[wasm_bindgen]
impl PoemDebug {
    /// Id of the poem on display, or `"none"`.
    #[wasm_bindgen(js_name = currentPoem)]
    pub fn current_poem(&self) -> String {
        self.archive
            .selector()
            .current_poem()
            .unwrap_or("none")
            .to_string()
    }

    /// Returns `true` when the poem was shown.
    #[wasm_bindgen(js_name = selectPoem)]
    pub fn select_poem(&self, index: i32) -> bool {
        matches!(self.archive.select(index), SelectOutcome::Selected(_))
    }

    #[wasm_bindgen(js_name = testPoem)]
    pub fn test_poem(&self, index: i32) -> bool {
        info!("debug: testing poem {}", index);
        self.select_poem(index)
    }

    #[wasm_bindgen(getter = poemCount)]
    pub fn poem_count(&self) -> u16 {
        self.archive.selector().poem_count()
    }

    /// Logs every catalog entry with whether its content block exists, and
    /// returns the ids.
    #[wasm_bindgen(js_name = listAllPoems)]
    pub fn list_all_poems(&self) -> js_sys::Array {
        let selector = self.archive.selector();
        let catalog = selector.catalog();
        let ids = js_sys::Array::new();
        for index in 0..catalog.poem_count() {
            let Some(entry) = catalog.poem_at(index) else {
                continue;
            };
            let found = selector.presenter().has_content(&entry);
            info!(
                "debug: {}: {} - {}",
                index,
                entry.id,
                if found { "FOUND" } else { "MISSING" }
            );
            ids.push(&JsValue::from_str(entry.id));
        }
        ids
    }
}

pub(super) fn install(window: &Window, archive: Rc<ArchiveState>) {
    let handle = JsValue::from(PoemDebug { archive });
    if js_sys::Reflect::set(window, &JsValue::from_str(DEBUG_HANDLE_NAME), &handle).is_err() {
        warn!("debug: could not install window.{}", DEBUG_HANDLE_NAME);
    }
}
