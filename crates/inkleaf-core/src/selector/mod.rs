//! Poem selection state machine.
//!
//! Owns the current selection and turns input events into presenter calls.
//! Delayed effects (content reveal, scroll-into-view, accent reset) are kept
//! in a small queue and executed by [`PoemSelector::tick`]; the adapter arms
//! one timer for [`PoemSelector::next_deadline`].

use core::fmt::Write;

use heapless::{String as HeaplessString, Vec as HeaplessVec};
use log::{debug, error, info, warn};
use rand::{Rng, RngCore};

use crate::{
    catalog::PoemCatalog,
    gesture::SwipeDirection,
    input::{ActivationSource, InputEvent, InputProvider},
    present::{NavState, Presenter},
    viewport::ViewportClass,
};

/// Upper bound on catalog entries tracked for touch de-duplication.
pub const MAX_TRACKED_ENTRIES: usize = 32;
const DEFERRED_SLOTS: usize = 4;
const ANNOUNCE_BYTES: usize = 96;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SelectorConfig {
    /// Delay between fading the reader out and swapping the content in.
    pub reveal_delay_ms: u16,
    /// Delay before scrolling the reader into view on narrow layouts.
    pub scroll_delay_ms: u16,
    /// How long the random control's ink-blot accent stays up.
    pub accent_ms: u16,
    /// Clicks on an entry this soon after a touch on it are ghost clicks.
    pub touch_dedup_ms: u16,
    pub announce: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 300,
            scroll_delay_ms: 100,
            accent_ms: 600,
            touch_dedup_ms: 500,
            announce: true,
        }
    }
}

impl SelectorConfig {
    pub const fn with_reveal_delay_ms(mut self, reveal_delay_ms: u16) -> Self {
        self.reveal_delay_ms = reveal_delay_ms;
        self
    }

    pub const fn with_scroll_delay_ms(mut self, scroll_delay_ms: u16) -> Self {
        self.scroll_delay_ms = scroll_delay_ms;
        self
    }

    pub const fn with_accent_ms(mut self, accent_ms: u16) -> Self {
        self.accent_ms = accent_ms;
        self
    }

    pub const fn with_touch_dedup_ms(mut self, touch_dedup_ms: u16) -> Self {
        self.touch_dedup_ms = touch_dedup_ms;
        self
    }

    pub const fn with_announce(mut self, announce: bool) -> Self {
        self.announce = announce;
        self
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SelectOutcome {
    Selected(u16),
    /// Index outside the catalog; nothing changed.
    OutOfRange,
    /// Markup for the poem is absent; nothing changed.
    MissingContent,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    Idle,
    Applied,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Effect {
    RevealContent { index: u16 },
    ScrollReader,
    ClearAccent,
}

impl Effect {
    fn same_slot(self, other: Self) -> bool {
        core::mem::discriminant(&self) == core::mem::discriminant(&other)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Deferred {
    due_ms: u64,
    effect: Effect,
}

pub struct PoemSelector<C, P, R>
where
    C: PoemCatalog,
    P: Presenter,
    R: RngCore,
{
    catalog: C,
    presenter: P,
    rng: R,
    config: SelectorConfig,
    viewport: ViewportClass,
    current: Option<u16>,
    touched_at: [Option<u64>; MAX_TRACKED_ENTRIES],
    deferred: HeaplessVec<Deferred, DEFERRED_SLOTS>,
}

include!("input.rs");
include!("effects.rs");

impl<C, P, R> PoemSelector<C, P, R>
where
    C: PoemCatalog,
    P: Presenter,
    R: RngCore,
{
    pub fn new(catalog: C, mut presenter: P, rng: R, config: SelectorConfig) -> Self {
        let count = catalog.poem_count();
        presenter.set_nav_state(NavState::for_selection(None, count));
        info!("selector: ready with {} poems", count);

        Self {
            catalog,
            presenter,
            rng,
            config,
            viewport: ViewportClass::Wide,
            current: None,
            touched_at: [None; MAX_TRACKED_ENTRIES],
            deferred: HeaplessVec::new(),
        }
    }

    /// Select a poem by index. Negative and past-the-end indices are ignored.
    pub fn select_poem(&mut self, index: i32, now_ms: u64) -> SelectOutcome {
        let count = self.catalog.poem_count();
        let Some(index) = u16::try_from(index).ok().filter(|&i| i < count) else {
            warn!("selector: invalid poem index {} (catalog has {})", index, count);
            return SelectOutcome::OutOfRange;
        };

        let Some(entry) = self.catalog.poem_at(index) else {
            return SelectOutcome::OutOfRange;
        };

        if !self.presenter.has_content(&entry) {
            error!(
                "selector: no content block for {:?} ({}), selection unchanged",
                entry.id,
                entry.content_id()
            );
            return SelectOutcome::MissingContent;
        }

        debug!("selector: selecting {} ({})", index, entry.id);
        self.current = Some(index);
        self.presenter.mark_active(index);
        self.presenter.begin_fade_out();
        self.schedule(
            Effect::RevealContent { index },
            now_ms + self.config.reveal_delay_ms as u64,
        );
        self.presenter
            .set_nav_state(NavState::for_selection(self.current, count));

        if self.viewport.is_narrow() {
            self.schedule(
                Effect::ScrollReader,
                now_ms + self.config.scroll_delay_ms as u64,
            );
        }

        SelectOutcome::Selected(index)
    }

    /// Step back one poem; no-op on the first poem or with nothing selected.
    pub fn previous(&mut self, now_ms: u64) -> Option<SelectOutcome> {
        let current = self.current.filter(|&i| i > 0)?;
        Some(self.select_poem(i32::from(current) - 1, now_ms))
    }

    /// Step forward one poem; starts at the first poem when nothing is selected.
    pub fn next(&mut self, now_ms: u64) -> Option<SelectOutcome> {
        let target = match self.current {
            Some(index) if index.saturating_add(1) < self.catalog.poem_count() => index + 1,
            Some(_) => return None,
            None if self.catalog.poem_count() > 0 => 0,
            None => return None,
        };
        Some(self.select_poem(i32::from(target), now_ms))
    }

    /// Jump to a uniformly random poem and flash the accent.
    pub fn random(&mut self, now_ms: u64) -> Option<SelectOutcome> {
        let count = self.catalog.poem_count();
        if count == 0 {
            return None;
        }

        let index = self.rng.gen_range(0..count);
        debug!("selector: random pick {}", index);
        let outcome = self.select_poem(i32::from(index), now_ms);

        self.presenter.set_accent(true);
        self.schedule(Effect::ClearAccent, now_ms + self.config.accent_ms as u64);
        Some(outcome)
    }

    pub fn set_viewport(&mut self, viewport: ViewportClass) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> ViewportClass {
        self.viewport
    }

    pub fn current_index(&self) -> Option<u16> {
        self.current
    }

    /// Identifier of the selected poem, if any.
    pub fn current_poem(&self) -> Option<&str> {
        self.current
            .and_then(|index| self.catalog.poem_at(index))
            .map(|entry| entry.id)
    }

    pub fn poem_count(&self) -> u16 {
        self.catalog.poem_count()
    }

    /// Catalog identifiers in display order.
    pub fn poem_ids(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.catalog.poem_count())
            .filter_map(|index| self.catalog.poem_at(index))
            .map(|entry| entry.id)
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn announce_selection(&mut self, index: u16) {
        if !self.config.announce {
            return;
        }
        let Some(entry) = self.catalog.poem_at(index) else {
            return;
        };

        let mut message = HeaplessString::<ANNOUNCE_BYTES>::new();
        if write!(message, "Now reading: {}", entry.title).is_err() {
            message.clear();
            let _ = message.push_str(entry.id);
        }
        self.presenter.announce(&message);
    }
}
