//! Scroll-position tracking for the page's section navigation.

use heapless::Vec as HeaplessVec;

pub const MAX_SECTIONS: usize = 8;

/// Vertical extent of one page section, in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionConfig {
    /// Lead added to the scroll position so a section counts as current a
    /// little before its top reaches the viewport edge (fixed header).
    pub offset_px: f64,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self { offset_px: 100.0 }
    }
}

/// Decides which section's nav link should be highlighted.
///
/// Sections are addressed by their position in the list given to
/// [`SectionTracker::set_sections`].
#[derive(Clone, Debug, Default)]
pub struct SectionTracker {
    config: SectionConfig,
    sections: HeaplessVec<SectionBounds, MAX_SECTIONS>,
    active: Option<usize>,
}

impl SectionTracker {
    pub fn new(config: SectionConfig) -> Self {
        Self {
            config,
            sections: HeaplessVec::new(),
            active: None,
        }
    }

    /// Replace the known section layout. Extra sections beyond capacity are ignored.
    pub fn set_sections<I>(&mut self, sections: I)
    where
        I: IntoIterator<Item = SectionBounds>,
    {
        self.sections.clear();
        for section in sections {
            if self.sections.push(section).is_err() {
                break;
            }
        }
    }

    pub fn active_at(&self, scroll_y: f64) -> Option<usize> {
        let probe = scroll_y + self.config.offset_px;
        self.sections
            .iter()
            .position(|s| probe >= s.top && probe < s.top + s.height)
    }

    /// Recompute the active section. Returns `Some` only when it changed.
    pub fn update(&mut self, scroll_y: f64) -> Option<Option<usize>> {
        let next = self.active_at(scroll_y);
        if next == self.active {
            return None;
        }
        self.active = next;
        Some(next)
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> SectionTracker {
        let mut tracker = SectionTracker::new(SectionConfig::default());
        tracker.set_sections([
            SectionBounds {
                top: 0.0,
                height: 700.0,
            },
            SectionBounds {
                top: 700.0,
                height: 1200.0,
            },
            SectionBounds {
                top: 1900.0,
                height: 500.0,
            },
        ]);
        tracker
    }

    #[test]
    fn picks_section_under_offset_probe() {
        let tracker = tracker();
        assert_eq!(tracker.active_at(0.0), Some(0));
        assert_eq!(tracker.active_at(599.0), Some(0));
        assert_eq!(tracker.active_at(600.0), Some(1));
        assert_eq!(tracker.active_at(1850.0), Some(2));
        assert_eq!(tracker.active_at(5000.0), None);
    }

    #[test]
    fn update_reports_only_changes() {
        let mut tracker = tracker();
        assert_eq!(tracker.update(0.0), Some(Some(0)));
        assert_eq!(tracker.update(10.0), None);
        assert_eq!(tracker.update(800.0), Some(Some(1)));
        assert_eq!(tracker.active(), Some(1));
    }
}
