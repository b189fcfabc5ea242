//! Translation from DOM events to core input events.

use std::{cell::RefCell, rc::Rc};

use inkleaf_core::input::{InputEvent, QueuedInput};
use web_sys::TouchEvent;

/// Queue shared between listeners (producers) and the selector (consumer).
pub type SharedInput = Rc<RefCell<QueuedInput>>;

pub fn shared_input() -> SharedInput {
    Rc::new(RefCell::new(QueuedInput::new()))
}

/// Keys that activate a focused catalog entry.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

/// Arrow keys inside the browsing region step through poems.
pub fn arrow_event(key: &str) -> Option<InputEvent> {
    match key {
        "ArrowLeft" => Some(InputEvent::Previous),
        "ArrowRight" => Some(InputEvent::Next),
        _ => None,
    }
}

/// Client coordinates of the first changed touch point.
pub fn changed_touch_point(event: &TouchEvent) -> Option<(f64, f64)> {
    let touch = event.changed_touches().item(0)?;
    Some((f64::from(touch.client_x()), f64::from(touch.client_y())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_keys() {
        assert!(is_activation_key("Enter"));
        assert!(is_activation_key(" "));
        assert!(!is_activation_key("Tab"));
    }

    #[test]
    fn arrows_map_to_previous_and_next() {
        assert_eq!(arrow_event("ArrowLeft"), Some(InputEvent::Previous));
        assert_eq!(arrow_event("ArrowRight"), Some(InputEvent::Next));
        assert_eq!(arrow_event("ArrowUp"), None);
    }
}
