//! Page entry point, built for `wasm32-unknown-unknown`.
//!
//! Waits for the DOM, then mounts the three independent pieces of the page:
//! the poem archive, the falling-leaf canvas and section navigation.

use std::cell::RefCell;

use gloo::events::EventListener;
use inkleaf_web::{
    logger::init_logger,
    platform::{self, SetupError},
};
use log::{LevelFilter, error, info, warn};
use rand::{SeedableRng, rngs::SmallRng};

use archive::Archive;
use leaves::Leaves;
use navigation::SectionNav;

#[path = "main/archive.rs"]
mod archive;
#[path = "main/debug_handle.rs"]
mod debug_handle;
#[path = "main/leaves.rs"]
mod leaves;
#[path = "main/navigation.rs"]
mod navigation;

const LOG_LEVEL: LevelFilter = if cfg!(debug_assertions) {
    LevelFilter::Debug
} else {
    LevelFilter::Info
};

/// Everything that must stay alive for the lifetime of the page.
struct Page {
    _archive: Archive,
    _leaves: Option<Leaves>,
    _nav: SectionNav,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
    static READY_LISTENER: RefCell<Option<EventListener>> = const { RefCell::new(None) };
}

fn main() {
    console_error_panic_hook::set_once();
    init_logger(LOG_LEVEL);

    let document = match platform::document() {
        Ok(document) => document,
        Err(err) => {
            error!("page: no document available: {:?}", err);
            return;
        }
    };

    if document.ready_state() == "loading" {
        let listener = EventListener::once(&document, "DOMContentLoaded", |_| start());
        READY_LISTENER.with(|slot| *slot.borrow_mut() = Some(listener));
    } else {
        start();
    }
}

fn start() {
    info!("page: initializing poem archive");
    match mount() {
        Ok(page) => {
            PAGE.with(|slot| *slot.borrow_mut() = Some(page));
            info!("page: initialized");
        }
        Err(err) => error!("page: critical elements not found: {:?}", err),
    }
}

fn mount() -> Result<Page, SetupError> {
    let window = platform::window()?;
    let document = platform::document()?;

    let archive = Archive::mount(&window, &document, seeded_rng(&window))?;
    debug_handle::install(&window, archive.state());

    let leaves = match Leaves::mount(&window, &document, seeded_rng(&window)) {
        Ok(leaves) => Some(leaves),
        Err(err) => {
            warn!("page: falling leaves disabled: {:?}", err);
            None
        }
    };

    let nav = SectionNav::mount(&window, &document);

    Ok(Page {
        _archive: archive,
        _leaves: leaves,
        _nav: nav,
    })
}

fn seeded_rng(window: &web_sys::Window) -> SmallRng {
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    SmallRng::seed_from_u64((noise << 32) ^ platform::now_ms(window))
}
