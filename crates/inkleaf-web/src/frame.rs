//! `requestAnimationFrame`-backed [`FrameScheduler`].

use std::rc::Rc;

use gloo::render::{AnimationFrame, request_animation_frame};
use inkleaf_core::leaves::FrameScheduler;

/// Requests one browser frame per call; the returned [`AnimationFrame`]
/// cancels the frame when dropped.
pub struct RafScheduler {
    on_frame: Rc<dyn Fn(f64)>,
}

impl RafScheduler {
    pub fn new<F>(on_frame: F) -> Self
    where
        F: Fn(f64) + 'static,
    {
        Self {
            on_frame: Rc::new(on_frame),
        }
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = AnimationFrame;

    fn request(&mut self) -> Self::Handle {
        let on_frame = Rc::clone(&self.on_frame);
        request_animation_frame(move |timestamp| on_frame(timestamp))
    }
}
