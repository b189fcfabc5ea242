//! Presentation seam between the selector and whatever displays poems.

use crate::catalog::PoemEntry;

/// Enabled state of the previous/next controls.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NavState {
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl NavState {
    /// Previous needs something before the selection, next something after it.
    /// With nothing selected, next leads to the first poem.
    pub fn for_selection(current: Option<u16>, count: u16) -> Self {
        match current {
            Some(index) => Self {
                prev_enabled: index > 0,
                next_enabled: index.saturating_add(1) < count,
            },
            None => Self {
                prev_enabled: false,
                next_enabled: count > 0,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PresentError {
    /// A structural element the page should always have is absent.
    MissingElement(&'static str),
    /// The `<id>-content` block for a poem is absent.
    MissingContent,
}

/// Output side of the poem selector.
///
/// The browser implementation mutates the DOM; tests use a recorder.
pub trait Presenter {
    /// Whether the markup for `poem` can be shown at all.
    fn has_content(&self, poem: &PoemEntry<'_>) -> bool;

    /// Mark catalog entry `index` active and every other entry inactive.
    fn mark_active(&mut self, index: u16);

    /// First phase of the swap: hide and offset the reading area.
    fn begin_fade_out(&mut self);

    /// Second phase: copy the poem markup in and fade it back.
    fn reveal_content(&mut self, poem: &PoemEntry<'_>) -> Result<(), PresentError>;

    fn set_nav_state(&mut self, nav: NavState);

    fn scroll_reader_into_view(&mut self) -> Result<(), PresentError>;

    /// Polite live-region announcement for assistive technology.
    fn announce(&mut self, message: &str);

    /// Decorative accent on the random control.
    fn set_accent(&mut self, active: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_state_at_edges() {
        assert_eq!(
            NavState::for_selection(None, 9),
            NavState {
                prev_enabled: false,
                next_enabled: true
            }
        );
        assert_eq!(
            NavState::for_selection(Some(0), 9),
            NavState {
                prev_enabled: false,
                next_enabled: true
            }
        );
        assert_eq!(
            NavState::for_selection(Some(8), 9),
            NavState {
                prev_enabled: true,
                next_enabled: false
            }
        );
        assert_eq!(NavState::for_selection(None, 0), NavState::default());
    }
}
