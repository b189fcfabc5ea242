use std::{cell::RefCell, rc::Rc};

use gloo::events::{EventListener, EventListenerOptions};
use inkleaf_core::nav::{SectionBounds, SectionConfig, SectionTracker};
use inkleaf_web::platform;
use log::debug;
use web_sys::{Document, Element, Event, Window};

const LINK_SELECTOR: &str = ".nav-link, .secret-link";
const NAV_LINK_SELECTOR: &str = ".nav-link";
const ENTER_SELECTOR: &str = ".enter-button";
const SECTION_SELECTOR: &str = "section[id]";
const POEMS_SECTION_ID: &str = "poems";
const ACTIVE_CLASS: &str = "active";

struct NavState {
    window: Window,
    sections: Vec<Element>,
    links: Vec<Element>,
    tracker: RefCell<SectionTracker>,
}

impl NavState {
    fn refresh(&self) {
        let scroll_y = platform::scroll_y(&self.window);
        let mut tracker = self.tracker.borrow_mut();
        // Layout shifts as poems open and close, so bounds are re-read each time.
        tracker.set_sections(self.sections.iter().map(|section| {
            let rect = section.get_bounding_client_rect();
            SectionBounds {
                top: rect.top() + scroll_y,
                height: rect.height(),
            }
        }));

        let Some(active) = tracker.update(scroll_y) else {
            return;
        };
        let active_id = active.and_then(|i| self.sections.get(i)).map(Element::id);
        debug!("nav: active section {:?}", active_id);

        for link in &self.links {
            let target = link.get_attribute("href");
            let is_active = match (&active_id, target.as_deref().and_then(anchor_target)) {
                (Some(id), Some(target)) => id == target,
                _ => false,
            };
            let _ = link.class_list().toggle_with_force(ACTIVE_CLASS, is_active);
        }
    }
}

/// In-page anchor links, the enter button and scroll-driven link highlighting.
pub(super) struct SectionNav {
    _listeners: Vec<EventListener>,
}

impl SectionNav {
    pub(super) fn mount(window: &Window, document: &Document) -> Self {
        let mut listeners = Vec::new();

        for link in platform::query_all(document, LINK_SELECTOR) {
            let doc = document.clone();
            let target = link.get_attribute("href");
            listeners.push(EventListener::new_with_options(
                &link,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event: &Event| {
                    let Some(id) = target.as_deref().and_then(anchor_target) else {
                        return;
                    };
                    event.prevent_default();
                    scroll_to_section(&doc, id);
                },
            ));
        }

        if let Ok(Some(enter)) = document.query_selector(ENTER_SELECTOR) {
            let doc = document.clone();
            listeners.push(EventListener::new(&enter, "click", move |_| {
                scroll_to_section(&doc, POEMS_SECTION_ID);
            }));
        }

        let state = Rc::new(NavState {
            window: window.clone(),
            sections: platform::query_all(document, SECTION_SELECTOR),
            links: platform::query_all(document, NAV_LINK_SELECTOR),
            tracker: RefCell::new(SectionTracker::new(SectionConfig::default())),
        });
        state.refresh();

        let st = Rc::clone(&state);
        listeners.push(EventListener::new(window, "scroll", move |_| st.refresh()));

        Self {
            _listeners: listeners,
        }
    }
}

/// `"#poems"` -> `"poems"`; anything that is not an in-page anchor yields `None`.
fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

fn scroll_to_section(document: &Document, id: &str) {
    match document.get_element_by_id(id) {
        Some(section) => platform::smooth_scroll_into_view(&section),
        None => debug!("nav: no section #{}", id),
    }
}

#[cfg(test)]
mod tests {
    use super::anchor_target;

    #[test]
    fn anchor_target_strips_hash() {
        assert_eq!(anchor_target("#poems"), Some("poems"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("https://example.org/"), None);
    }
}
