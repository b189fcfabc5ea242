//! Browser adapters for `inkleaf-core`.
//!
//! Each module implements one core seam on top of `web-sys`/`gloo`:
//! the DOM presenter for the selector, the canvas surface and
//! animation-frame scheduler for the leaves, input helpers, platform
//! signals, and a `log` backend writing to the devtools console.

pub mod canvas;
pub mod dom;
pub mod frame;
pub mod input;
pub mod logger;
pub mod platform;
