use heapless::Deque;
use log::warn;

use super::{InputEvent, InputProvider};

pub const INPUT_QUEUE_DEPTH: usize = 16;

/// Bounded FIFO filled by event listeners and drained by the selector.
#[derive(Debug, Default)]
pub struct QueuedInput {
    events: Deque<InputEvent, INPUT_QUEUE_DEPTH>,
}

impl QueuedInput {
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
        }
    }

    /// Enqueue an event; when full the event is dropped and `false` returned.
    pub fn push(&mut self, event: InputEvent) -> bool {
        match self.events.push_back(event) {
            Ok(()) => true,
            Err(dropped) => {
                warn!("input: queue full, dropping {:?}", dropped);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl InputProvider for QueuedInput {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(self.events.pop_front())
    }
}

/// Replays a fixed event list, then reports no more input.
#[derive(Debug, Clone, Copy)]
pub struct ScriptedInput<'a> {
    events: &'a [InputEvent],
    cursor: usize,
}

impl<'a> ScriptedInput<'a> {
    pub const fn new(events: &'a [InputEvent]) -> Self {
        Self { events, cursor: 0 }
    }
}

impl InputProvider for ScriptedInput<'_> {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        let Some(event) = self.events.get(self.cursor).copied() else {
            return Ok(None);
        };
        self.cursor = self.cursor.saturating_add(1);
        Ok(Some(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_fifo_and_bounded() {
        let mut input = QueuedInput::new();
        assert!(input.push(InputEvent::Next));
        assert!(input.push(InputEvent::Previous));
        assert_eq!(input.poll_event(), Ok(Some(InputEvent::Next)));
        assert_eq!(input.poll_event(), Ok(Some(InputEvent::Previous)));
        assert_eq!(input.poll_event(), Ok(None));

        for _ in 0..INPUT_QUEUE_DEPTH {
            assert!(input.push(InputEvent::Random));
        }
        assert!(!input.push(InputEvent::Random));
        assert_eq!(input.len(), INPUT_QUEUE_DEPTH);
    }
}
