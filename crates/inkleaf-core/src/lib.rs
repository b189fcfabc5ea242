//! Platform-free logic for the poem archive page: catalog, selection state
//! machine, input model, swipe detection, falling-leaf particles and the
//! section tracker that drives nav highlighting.
//!
//! Everything here is driven by explicit `now_ms` timestamps and trait-based
//! outputs so the browser adapter can stay a thin layer.

pub mod catalog;
pub mod gesture;
pub mod input;
pub mod leaves;
pub mod nav;
pub mod present;
pub mod selector;
pub mod viewport;
