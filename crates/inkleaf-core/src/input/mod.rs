//! Input abstraction layer.

mod queue;

pub use queue::{QueuedInput, ScriptedInput};

use crate::gesture::SwipeDirection;

/// How a catalog entry was activated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActivationSource {
    Pointer,
    Touch,
    Keyboard,
}

/// Logical actions consumed by the poem selector.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    Activate {
        index: u16,
        source: ActivationSource,
    },
    Previous,
    Next,
    Random,
    Swipe(SwipeDirection),
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
