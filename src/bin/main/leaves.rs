use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use gloo::{events::EventListener, timers::callback::Timeout};
use inkleaf_core::leaves::{LeafAnimator, LeafConfig};
use inkleaf_web::{
    canvas::CanvasSurface,
    frame::RafScheduler,
    platform::{self, SetupError},
};
use log::{debug, info};
use rand::rngs::SmallRng;
use web_sys::{Document, Window};

const RESIZE_DEBOUNCE_MS: u32 = 250;

type Animator = LeafAnimator<RafScheduler, SmallRng>;

struct LeafLoop {
    animator: Animator,
    surface: CanvasSurface,
}

impl LeafLoop {
    fn frame(&mut self) {
        let Self { animator, surface } = self;
        animator.on_frame(surface);
    }
}

/// Falling-leaf background: frame loop plus the page signals that pause it.
pub(super) struct Leaves {
    _state: Rc<RefCell<LeafLoop>>,
    _resize_timer: Rc<RefCell<Option<Timeout>>>,
    _listeners: Vec<EventListener>,
}

impl Leaves {
    pub(super) fn mount(
        window: &Window,
        document: &Document,
        rng: SmallRng,
    ) -> Result<Self, SetupError> {
        let surface = CanvasSurface::from_document(document)?;
        let (width, height) = platform::viewport_size(window);
        surface.fit(width, height);

        let hidden = platform::page_hidden(document);
        let reduced_motion = platform::prefers_reduced_motion(window);

        let state = Rc::new_cyclic(|weak: &Weak<RefCell<LeafLoop>>| {
            let weak = weak.clone();
            let scheduler = RafScheduler::new(move |_timestamp| {
                if let Some(state) = weak.upgrade() {
                    state.borrow_mut().frame();
                }
            });
            let animator = LeafAnimator::new(LeafConfig::default(), width, height, scheduler, rng)
                .with_signals(hidden, reduced_motion);
            RefCell::new(LeafLoop { animator, surface })
        });
        state.borrow_mut().animator.start();

        let resize_timer = Rc::new(RefCell::new(None));
        let mut listeners = Vec::new();
        install_visibility_listeners(&state, window, document, &mut listeners);
        install_motion_listener(&state, window, &mut listeners);
        install_resize_listener(&state, window, &resize_timer, &mut listeners);

        Ok(Self {
            _state: state,
            _resize_timer: resize_timer,
            _listeners: listeners,
        })
    }
}

fn install_visibility_listeners(
    state: &Rc<RefCell<LeafLoop>>,
    window: &Window,
    document: &Document,
    listeners: &mut Vec<EventListener>,
) {
    let st = Rc::clone(state);
    let doc = document.clone();
    listeners.push(EventListener::new(document, "visibilitychange", move |_| {
        st.borrow_mut().animator.set_hidden(platform::page_hidden(&doc));
    }));

    // pagehide also fires when the page enters the back/forward cache;
    // pageshow brings it back.
    let st = Rc::clone(state);
    listeners.push(EventListener::new(window, "pagehide", move |_| {
        info!("leaves: page hidden away");
        st.borrow_mut().animator.unload();
    }));

    let st = Rc::clone(state);
    let doc = document.clone();
    listeners.push(EventListener::new(window, "pageshow", move |_| {
        st.borrow_mut().animator.restore(platform::page_hidden(&doc));
    }));
}

fn install_motion_listener(
    state: &Rc<RefCell<LeafLoop>>,
    window: &Window,
    listeners: &mut Vec<EventListener>,
) {
    let Ok(Some(query)) = window.match_media(platform::REDUCED_MOTION_QUERY) else {
        return;
    };
    let st = Rc::clone(state);
    let target = query.clone();
    listeners.push(EventListener::new(&target, "change", move |_| {
        let reduced = query.matches();
        debug!("leaves: reduced motion={}", reduced);
        st.borrow_mut().animator.set_reduced_motion(reduced);
    }));
}

fn install_resize_listener(
    state: &Rc<RefCell<LeafLoop>>,
    window: &Window,
    timer: &Rc<RefCell<Option<Timeout>>>,
    listeners: &mut Vec<EventListener>,
) {
    let st = Rc::clone(state);
    let win = window.clone();
    let timer = Rc::clone(timer);
    listeners.push(EventListener::new(window, "resize", move |_| {
        let st = Rc::clone(&st);
        let win = win.clone();
        // Replacing the pending timeout cancels it.
        let timeout = Timeout::new(RESIZE_DEBOUNCE_MS, move || {
            let (width, height) = platform::viewport_size(&win);
            let mut state = st.borrow_mut();
            state.surface.fit(width, height);
            state.animator.resize(width, height);
        });
        *timer.borrow_mut() = Some(timeout);
    }));
}
