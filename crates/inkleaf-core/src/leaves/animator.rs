use log::{debug, info};
use rand::RngCore;

use super::{LeafConfig, LeafField, LeafSurface};

/// Source of per-frame callbacks.
///
/// Dropping a handle must cancel the frame it was issued for; that is how
/// the animator releases its frame when the page is hidden or unloaded.
pub trait FrameScheduler {
    type Handle;

    fn request(&mut self) -> Self::Handle;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RunState {
    Running,
    Suspended,
}

/// Frame loop around a [`LeafField`].
///
/// Runs only while the page is visible, reduced motion is off, and the page
/// has not been unloaded. At most one frame handle is held at a time.
pub struct LeafAnimator<S, R>
where
    S: FrameScheduler,
    R: RngCore,
{
    field: LeafField,
    scheduler: S,
    rng: R,
    handle: Option<S::Handle>,
    hidden: bool,
    reduced_motion: bool,
    unloaded: bool,
    frames: u64,
}

impl<S, R> LeafAnimator<S, R>
where
    S: FrameScheduler,
    R: RngCore,
{
    pub fn new(config: LeafConfig, width: f64, height: f64, scheduler: S, mut rng: R) -> Self {
        let field = LeafField::new(config, width, height, &mut rng);
        info!(
            "leaves: field {}x{} with {} leaves",
            width as u32,
            height as u32,
            field.len()
        );
        Self {
            field,
            scheduler,
            rng,
            handle: None,
            hidden: false,
            reduced_motion: false,
            unloaded: false,
            frames: 0,
        }
    }

    pub fn with_signals(mut self, hidden: bool, reduced_motion: bool) -> Self {
        self.hidden = hidden;
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn run_state(&self) -> RunState {
        if self.hidden || self.reduced_motion || self.unloaded {
            RunState::Suspended
        } else {
            RunState::Running
        }
    }

    /// Acquire the first frame if the loop may run.
    pub fn start(&mut self) {
        if self.reduced_motion {
            info!("leaves: reduced motion requested, animation disabled");
        }
        self.sync_handle();
    }

    /// Frame callback body. Returns `true` when leaves were advanced and drawn.
    pub fn on_frame<SF: LeafSurface + ?Sized>(&mut self, surface: &mut SF) -> bool {
        // The handle that brought us here has fired.
        self.handle = None;

        if self.run_state() == RunState::Suspended {
            return false;
        }

        self.field.step(&mut self.rng);
        self.field.draw(surface);
        self.frames = self.frames.saturating_add(1);
        self.handle = Some(self.scheduler.request());
        true
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        if self.hidden != hidden {
            debug!("leaves: page hidden={}", hidden);
        }
        self.hidden = hidden;
        self.sync_handle();
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
        self.sync_handle();
    }

    /// Page is being navigated away from: drop the frame handle until
    /// [`Self::restore`]. Visibility changes alone do not resume.
    pub fn unload(&mut self) {
        self.unloaded = true;
        self.sync_handle();
    }

    /// Page came back (back/forward cache): resume unless hidden.
    pub fn restore(&mut self, hidden: bool) {
        if self.unloaded {
            debug!("leaves: page restored");
        }
        self.unloaded = false;
        self.hidden = hidden;
        self.sync_handle();
    }

    /// Returns `true` when the leaf collection was rebuilt.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let rebuilt = self.field.resize(width, height, &mut self.rng);
        if rebuilt {
            debug!("leaves: resized to {} leaves", self.field.len());
        }
        rebuilt
    }

    pub fn has_pending_frame(&self) -> bool {
        self.handle.is_some()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }

    pub fn field(&self) -> &LeafField {
        &self.field
    }

    fn sync_handle(&mut self) {
        match self.run_state() {
            RunState::Running => {
                if self.handle.is_none() {
                    self.handle = Some(self.scheduler.request());
                }
            }
            RunState::Suspended => {
                self.handle = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaves::LeafPaint;
    use rand::{SeedableRng, rngs::SmallRng};
    use std::{cell::Cell, rc::Rc};

    #[derive(Default, Clone)]
    struct CountingScheduler {
        live: Rc<Cell<usize>>,
        issued: Rc<Cell<usize>>,
    }

    struct CountedHandle {
        live: Rc<Cell<usize>>,
    }

    impl Drop for CountedHandle {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    impl FrameScheduler for CountingScheduler {
        type Handle = CountedHandle;

        fn request(&mut self) -> Self::Handle {
            self.live.set(self.live.get() + 1);
            self.issued.set(self.issued.get() + 1);
            CountedHandle {
                live: self.live.clone(),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        painted: usize,
    }

    impl LeafSurface for RecordingSurface {
        fn clear(&mut self, _width: f64, _height: f64) {
            self.clears += 1;
        }

        fn paint(&mut self, _leaf: &LeafPaint) {
            self.painted += 1;
        }
    }

    fn animator(
        scheduler: CountingScheduler,
        width: f64,
    ) -> LeafAnimator<CountingScheduler, SmallRng> {
        LeafAnimator::new(
            LeafConfig::default(),
            width,
            600.0,
            scheduler,
            SmallRng::seed_from_u64(7),
        )
    }

    #[test]
    fn frames_draw_every_leaf_and_rearm() {
        let scheduler = CountingScheduler::default();
        let mut anim = animator(scheduler.clone(), 1024.0);
        anim.start();
        assert_eq!(scheduler.live.get(), 1);

        let mut surface = RecordingSurface::default();
        assert!(anim.on_frame(&mut surface));
        assert!(anim.on_frame(&mut surface));

        assert_eq!(surface.clears, 2);
        assert_eq!(surface.painted, 30);
        assert_eq!(scheduler.live.get(), 1);
        assert_eq!(anim.frames_drawn(), 2);
    }

    #[test]
    fn hidden_page_does_no_frame_work() {
        let scheduler = CountingScheduler::default();
        let mut anim = animator(scheduler.clone(), 1024.0);
        anim.start();
        anim.set_hidden(true);
        assert_eq!(anim.run_state(), RunState::Suspended);
        assert_eq!(scheduler.live.get(), 0);

        let mut surface = RecordingSurface::default();
        assert!(!anim.on_frame(&mut surface));
        assert_eq!(surface.clears, 0);
        assert!(!anim.has_pending_frame());
    }

    #[test]
    fn visibility_toggling_never_leaks_handles() {
        let scheduler = CountingScheduler::default();
        let mut anim = animator(scheduler.clone(), 400.0);
        anim.start();

        for _ in 0..10 {
            anim.set_hidden(true);
            assert_eq!(scheduler.live.get(), 0);
            anim.set_hidden(false);
            anim.set_hidden(false);
            assert_eq!(scheduler.live.get(), 1);
        }
        assert_eq!(scheduler.issued.get(), 11);
    }

    #[test]
    fn reduced_motion_never_starts() {
        let scheduler = CountingScheduler::default();
        let mut anim = animator(scheduler.clone(), 400.0).with_signals(false, true);
        anim.start();
        anim.set_hidden(false);
        assert_eq!(anim.run_state(), RunState::Suspended);
        assert_eq!(scheduler.issued.get(), 0);
    }

    #[test]
    fn unload_holds_through_visibility_changes() {
        let scheduler = CountingScheduler::default();
        let mut anim = animator(scheduler.clone(), 400.0);
        anim.start();
        anim.unload();
        anim.set_hidden(false);
        assert_eq!(scheduler.live.get(), 0);
    }

    #[test]
    fn restored_page_animates_again() {
        let scheduler = CountingScheduler::default();
        let mut anim = animator(scheduler.clone(), 400.0);
        anim.start();
        anim.unload();
        anim.set_hidden(true);
        assert_eq!(scheduler.live.get(), 0);

        anim.restore(false);
        assert_eq!(anim.run_state(), RunState::Running);
        assert!(anim.has_pending_frame());
        assert_eq!(scheduler.live.get(), 1);

        let mut surface = RecordingSurface::default();
        assert!(anim.on_frame(&mut surface));
        assert_eq!(scheduler.live.get(), 1);
    }

    #[test]
    fn restore_into_hidden_page_stays_suspended() {
        let scheduler = CountingScheduler::default();
        let mut anim = animator(scheduler.clone(), 400.0);
        anim.start();
        anim.unload();
        anim.restore(true);
        assert_eq!(anim.run_state(), RunState::Suspended);
        assert_eq!(scheduler.live.get(), 0);

        anim.set_hidden(false);
        assert_eq!(scheduler.live.get(), 1);
    }

    #[test]
    fn resize_across_breakpoint_rebuilds_field() {
        let mut anim = animator(CountingScheduler::default(), 400.0);
        assert_eq!(anim.field().len(), 8);
        assert!(anim.resize(1200.0, 700.0));
        assert_eq!(anim.field().len(), 15);
        assert!(!anim.resize(1300.0, 700.0));
    }
}
