//! DOM-backed [`Presenter`] for the poem selector.

use inkleaf_core::{
    catalog::PoemEntry,
    present::{NavState, PresentError, Presenter},
};
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

use crate::platform::{SetupError, query_all, query_html, smooth_scroll_into_view};

pub const POEM_ITEM_SELECTOR: &str = ".poem-item";
pub const DISPLAY_ID: &str = "poem-display";
pub const READER_SELECTOR: &str = ".poem-reader";
pub const PREV_SELECTOR: &str = ".prev-btn";
pub const NEXT_SELECTOR: &str = ".next-btn";
pub const INK_BLOT_SELECTOR: &str = ".random-poem-btn .ink-blot";
pub const ANNOUNCER_ID: &str = "poem-announcer";

const ACTIVE_CLASS: &str = "active";
const ACCENT_CLASS: &str = "clicked";
const DISABLED_OPACITY: &str = "0.5";

pub struct DomPresenter {
    document: Document,
    items: Vec<Element>,
    display: HtmlElement,
    reader: Option<Element>,
    prev: Option<HtmlButtonElement>,
    next: Option<HtmlButtonElement>,
    ink_blot: Option<Element>,
    announcer: Option<Element>,
}

impl DomPresenter {
    /// Collect the page elements. Only the display area is mandatory.
    pub fn from_document(document: &Document) -> Result<Self, SetupError> {
        let display = document
            .get_element_by_id(DISPLAY_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or(SetupError::MissingElement("#poem-display"))?;

        let items = query_all(document, POEM_ITEM_SELECTOR);
        for item in &items {
            let _ = item.set_attribute("tabindex", "0");
            let _ = item.set_attribute("role", "button");
        }

        let button = |selector: &str| {
            query_html(document, selector).and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        };

        let presenter = Self {
            document: document.clone(),
            reader: document.query_selector(READER_SELECTOR).ok().flatten(),
            prev: button(PREV_SELECTOR),
            next: button(NEXT_SELECTOR),
            ink_blot: document.query_selector(INK_BLOT_SELECTOR).ok().flatten(),
            announcer: ensure_announcer(document),
            items,
            display,
        };
        debug!("dom: {} poem items found", presenter.items.len());
        Ok(presenter)
    }

    pub fn items(&self) -> &[Element] {
        &self.items
    }

    fn set_display_phase(&self, opacity: &str, offset: &str) {
        let style = self.display.style();
        let _ = style.set_property("opacity", opacity);
        let _ = style.set_property("transform", offset);
    }
}

/// Find the polite live region, creating a visually hidden one if the page
/// does not ship it.
fn ensure_announcer(document: &Document) -> Option<Element> {
    if let Some(existing) = document.get_element_by_id(ANNOUNCER_ID) {
        return Some(existing);
    }

    let region = document.create_element("div").ok()?;
    region.set_id(ANNOUNCER_ID);
    let _ = region.set_attribute("aria-live", "polite");
    let _ = region.set_attribute("aria-atomic", "true");
    let _ = region.set_attribute("class", "sr-only");
    document.body()?.append_child(&region).ok()?;
    Some(region)
}

fn set_button(button: Option<&HtmlButtonElement>, enabled: bool) {
    let Some(button) = button else {
        return;
    };
    button.set_disabled(!enabled);
    let _ = button
        .style()
        .set_property("opacity", if enabled { "1" } else { DISABLED_OPACITY });
}

impl Presenter for DomPresenter {
    fn has_content(&self, poem: &PoemEntry<'_>) -> bool {
        self.document.get_element_by_id(&poem.content_id()).is_some()
    }

    fn mark_active(&mut self, index: u16) {
        for (i, item) in self.items.iter().enumerate() {
            let active = i == index as usize;
            let _ = item.class_list().toggle_with_force(ACTIVE_CLASS, active);
            let _ = item.set_attribute("aria-pressed", if active { "true" } else { "false" });
        }
    }

    fn begin_fade_out(&mut self) {
        self.set_display_phase("0", "translateY(20px)");
    }

    fn reveal_content(&mut self, poem: &PoemEntry<'_>) -> Result<(), PresentError> {
        let content = self
            .document
            .get_element_by_id(&poem.content_id())
            .ok_or(PresentError::MissingContent)?;
        self.display.set_inner_html(&content.inner_html());
        self.set_display_phase("1", "translateY(0)");
        Ok(())
    }

    fn set_nav_state(&mut self, nav: NavState) {
        set_button(self.prev.as_ref(), nav.prev_enabled);
        set_button(self.next.as_ref(), nav.next_enabled);
    }

    fn scroll_reader_into_view(&mut self) -> Result<(), PresentError> {
        let reader = self
            .reader
            .as_ref()
            .ok_or(PresentError::MissingElement(READER_SELECTOR))?;
        smooth_scroll_into_view(reader);
        Ok(())
    }

    fn announce(&mut self, message: &str) {
        match &self.announcer {
            Some(region) => region.set_text_content(Some(message)),
            None => warn!("dom: no live region for announcement"),
        }
    }

    fn set_accent(&mut self, active: bool) {
        if let Some(blot) = &self.ink_blot {
            let _ = blot.class_list().toggle_with_force(ACCENT_CLASS, active);
        }
    }
}
