//! Horizontal swipe recognition for touch layouts.
//!
//! The tracker is fed raw touch start/end coordinates and emits a
//! [`SwipeDirection`] when the movement qualifies:
//!
//! * horizontal distance is at least [`SwipeConfig::min_distance_px`];
//! * horizontal distance dominates vertical distance (so page scrolling
//!   does not flip poems);
//! * the viewport is narrow. Wide layouts ignore swipes entirely.

use crate::viewport::ViewportClass;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwipeDirection {
    /// Finger moved right to left. Maps to "next".
    Left,
    /// Finger moved left to right. Maps to "previous".
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeConfig {
    pub min_distance_px: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            min_distance_px: 50.0,
        }
    }
}

impl SwipeConfig {
    pub const fn with_min_distance_px(mut self, min_distance_px: f64) -> Self {
        self.min_distance_px = min_distance_px;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SwipeTracker {
    config: SwipeConfig,
    start: Option<(f64, f64)>,
}

impl SwipeTracker {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            start: None,
        }
    }

    pub fn touch_start(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
    }

    /// Close the gesture. Always clears the stored start point.
    pub fn touch_end(&mut self, x: f64, y: f64, viewport: ViewportClass) -> Option<SwipeDirection> {
        let (start_x, start_y) = self.start.take()?;
        if !viewport.is_narrow() {
            return None;
        }

        let dx = x - start_x;
        let dy = y - start_y;
        if dx.abs() < self.config.min_distance_px || dx.abs() <= dy.abs() {
            return None;
        }

        if dx < 0.0 {
            Some(SwipeDirection::Left)
        } else {
            Some(SwipeDirection::Right)
        }
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(from: (f64, f64), to: (f64, f64), viewport: ViewportClass) -> Option<SwipeDirection> {
        let mut tracker = SwipeTracker::default();
        tracker.touch_start(from.0, from.1);
        tracker.touch_end(to.0, to.1, viewport)
    }

    #[test]
    fn left_and_right_swipes_on_narrow_viewport() {
        assert_eq!(
            swipe((200.0, 300.0), (120.0, 310.0), ViewportClass::Narrow),
            Some(SwipeDirection::Left)
        );
        assert_eq!(
            swipe((100.0, 300.0), (150.0, 300.0), ViewportClass::Narrow),
            Some(SwipeDirection::Right)
        );
    }

    #[test]
    fn short_or_vertical_moves_are_ignored() {
        assert_eq!(swipe((100.0, 0.0), (140.0, 0.0), ViewportClass::Narrow), None);
        assert_eq!(swipe((100.0, 0.0), (40.0, 80.0), ViewportClass::Narrow), None);
    }

    #[test]
    fn wide_viewport_suppresses_swipes() {
        assert_eq!(swipe((300.0, 0.0), (100.0, 0.0), ViewportClass::Wide), None);
    }

    #[test]
    fn end_without_start_is_ignored() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.touch_end(0.0, 0.0, ViewportClass::Narrow), None);
        tracker.touch_start(200.0, 0.0);
        tracker.cancel();
        assert_eq!(tracker.touch_end(0.0, 0.0, ViewportClass::Narrow), None);
    }
}
