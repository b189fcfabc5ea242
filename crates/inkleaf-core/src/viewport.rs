//! Responsive breakpoint shared by the selector and the leaf field.

/// Widths strictly below this are treated as narrow (phone) layouts.
pub const NARROW_BREAKPOINT_PX: f64 = 768.0;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ViewportClass {
    Narrow,
    Wide,
}

impl ViewportClass {
    pub fn from_width(width_px: f64) -> Self {
        if width_px < NARROW_BREAKPOINT_PX {
            Self::Narrow
        } else {
            Self::Wide
        }
    }

    pub const fn is_narrow(self) -> bool {
        matches!(self, Self::Narrow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_exclusive() {
        assert_eq!(ViewportClass::from_width(767.9), ViewportClass::Narrow);
        assert_eq!(ViewportClass::from_width(768.0), ViewportClass::Wide);
        assert_eq!(ViewportClass::from_width(0.0), ViewportClass::Narrow);
    }
}
