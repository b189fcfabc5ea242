use std::{cell::RefCell, rc::Rc};

use gloo::{
    events::{EventListener, EventListenerOptions},
    timers::callback::Timeout,
};
use inkleaf_core::{
    catalog::{StaticCatalog, archive_catalog},
    gesture::{SwipeConfig, SwipeTracker},
    input::{ActivationSource, InputEvent},
    selector::{PoemSelector, SelectOutcome, SelectorConfig},
};
use inkleaf_web::{
    dom::{DomPresenter, NEXT_SELECTOR, PREV_SELECTOR, READER_SELECTOR},
    input::{SharedInput, arrow_event, changed_touch_point, is_activation_key, shared_input},
    platform::{self, SetupError},
};
use log::debug;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent, Node, TouchEvent, Window};

pub(super) type ArchiveSelector = PoemSelector<StaticCatalog<'static>, DomPresenter, SmallRng>;

const RANDOM_SELECTOR: &str = ".random-poem-btn";
const BROWSE_REGION_ID: &str = "poems";

/// Selector plus the plumbing that feeds it and wakes it up for deferred work.
pub(super) struct ArchiveState {
    window: Window,
    selector: RefCell<ArchiveSelector>,
    input: SharedInput,
    timer: RefCell<Option<Timeout>>,
}

impl ArchiveState {
    /// Drain queued input, run due effects, then re-arm the wake-up timer.
    fn pump(self: &Rc<Self>) {
        self.with_selector(|selector, now_ms| {
            let mut input = self.input.borrow_mut();
            selector.process_inputs(&mut *input, now_ms);
        });
    }

    pub(super) fn select(self: &Rc<Self>, index: i32) -> SelectOutcome {
        let mut outcome = SelectOutcome::OutOfRange;
        self.with_selector(|selector, now_ms| outcome = selector.select_poem(index, now_ms));
        outcome
    }

    pub(super) fn selector(&self) -> std::cell::Ref<'_, ArchiveSelector> {
        self.selector.borrow()
    }

    fn push(self: &Rc<Self>, event: InputEvent) {
        self.input.borrow_mut().push(event);
        self.pump();
    }

    fn with_selector<F>(self: &Rc<Self>, f: F)
    where
        F: FnOnce(&mut ArchiveSelector, u64),
    {
        let now_ms = platform::now_ms(&self.window);
        let deadline = {
            let mut selector = self.selector.borrow_mut();
            selector.set_viewport(platform::viewport_class(&self.window));
            f(&mut selector, now_ms);
            let _ = selector.tick(now_ms);
            selector.next_deadline()
        };
        self.arm_timer(deadline, now_ms);
    }

    fn arm_timer(self: &Rc<Self>, deadline: Option<u64>, now_ms: u64) {
        let Some(due_ms) = deadline else {
            self.timer.borrow_mut().take();
            return;
        };

        let delay = due_ms.saturating_sub(now_ms).min(u32::MAX as u64) as u32;
        let state = Rc::clone(self);
        let timeout = Timeout::new(delay, move || state.with_selector(|_, _| {}));
        *self.timer.borrow_mut() = Some(timeout);
    }
}

pub(super) struct Archive {
    state: Rc<ArchiveState>,
    _listeners: Vec<EventListener>,
}

impl Archive {
    pub(super) fn mount(
        window: &Window,
        document: &Document,
        rng: SmallRng,
    ) -> Result<Self, SetupError> {
        let presenter = DomPresenter::from_document(document)?;
        let items: Vec<Element> = presenter.items().to_vec();

        let selector = PoemSelector::new(archive_catalog(), presenter, rng, SelectorConfig::default());
        let state = Rc::new(ArchiveState {
            window: window.clone(),
            selector: RefCell::new(selector),
            input: shared_input(),
            timer: RefCell::new(None),
        });

        let mut listeners = Vec::new();
        for (index, item) in items.iter().enumerate() {
            install_item_listeners(&state, item, index as u16, &mut listeners);
        }
        install_control_listeners(&state, document, &mut listeners);
        install_swipe_listeners(&state, document, &mut listeners);

        debug!("archive: {} listeners installed", listeners.len());
        Ok(Self {
            state,
            _listeners: listeners,
        })
    }

    pub(super) fn state(&self) -> Rc<ArchiveState> {
        Rc::clone(&self.state)
    }
}

fn active_options() -> EventListenerOptions {
    EventListenerOptions::enable_prevent_default()
}

fn install_item_listeners(
    state: &Rc<ArchiveState>,
    item: &Element,
    index: u16,
    listeners: &mut Vec<EventListener>,
) {
    let activate = move |source: ActivationSource| InputEvent::Activate { index, source };

    let st = Rc::clone(state);
    listeners.push(EventListener::new_with_options(
        item,
        "click",
        active_options(),
        move |event: &Event| {
            event.prevent_default();
            event.stop_propagation();
            st.push(activate(ActivationSource::Pointer));
        },
    ));

    let st = Rc::clone(state);
    listeners.push(EventListener::new_with_options(
        item,
        "touchend",
        active_options(),
        move |event: &Event| {
            event.prevent_default();
            event.stop_propagation();
            st.push(activate(ActivationSource::Touch));
        },
    ));

    let st = Rc::clone(state);
    listeners.push(EventListener::new_with_options(
        item,
        "keydown",
        active_options(),
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if is_activation_key(&event.key()) {
                event.prevent_default();
                st.push(activate(ActivationSource::Keyboard));
            }
        },
    ));
}

fn install_control_listeners(
    state: &Rc<ArchiveState>,
    document: &Document,
    listeners: &mut Vec<EventListener>,
) {
    let controls = [
        (PREV_SELECTOR, InputEvent::Previous),
        (NEXT_SELECTOR, InputEvent::Next),
        (RANDOM_SELECTOR, InputEvent::Random),
    ];
    for (selector, input) in controls {
        let Ok(Some(control)) = document.query_selector(selector) else {
            debug!("archive: no {} control on page", selector);
            continue;
        };
        let st = Rc::clone(state);
        listeners.push(EventListener::new_with_options(
            &control,
            "click",
            active_options(),
            move |event: &Event| {
                event.prevent_default();
                st.push(input);
            },
        ));
    }

    // Arrow keys only count while focus sits inside the browsing region.
    let Some(region) = document.get_element_by_id(BROWSE_REGION_ID) else {
        return;
    };
    let st = Rc::clone(state);
    let doc = document.clone();
    listeners.push(EventListener::new_with_options(
        document,
        "keydown",
        active_options(),
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Some(input) = arrow_event(&event.key()) else {
                return;
            };
            let focused = doc.active_element();
            let focus_inside = focused
                .as_ref()
                .is_some_and(|el| region.contains(Some(el.unchecked_ref::<Node>())));
            if focus_inside {
                event.prevent_default();
                st.push(input);
            }
        },
    ));
}

fn install_swipe_listeners(
    state: &Rc<ArchiveState>,
    document: &Document,
    listeners: &mut Vec<EventListener>,
) {
    let Ok(Some(region)) = document.query_selector(READER_SELECTOR) else {
        return;
    };
    let tracker = Rc::new(RefCell::new(SwipeTracker::new(SwipeConfig::default())));

    let start_tracker = Rc::clone(&tracker);
    listeners.push(EventListener::new(&region, "touchstart", move |event: &Event| {
        let Some(point) = event.dyn_ref::<TouchEvent>().and_then(changed_touch_point) else {
            return;
        };
        start_tracker.borrow_mut().touch_start(point.0, point.1);
    }));

    let st = Rc::clone(state);
    listeners.push(EventListener::new(&region, "touchend", move |event: &Event| {
        let Some((x, y)) = event.dyn_ref::<TouchEvent>().and_then(changed_touch_point) else {
            tracker.borrow_mut().cancel();
            return;
        };
        let viewport = platform::viewport_class(&st.window);
        if let Some(direction) = tracker.borrow_mut().touch_end(x, y, viewport) {
            st.push(InputEvent::Swipe(direction));
        }
    }));
}
