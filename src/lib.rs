//! scroller - a styled, draggable scrollbar for web content panes
//!
//! Replaces the native scroll affordance of a container with a track and
//! thumb that follow and drive the offset of an inner content pane. The logic
//! lives in `scroller_core`; on `wasm32` this crate binds it to the browser
//! DOM and exports a `Scroller` class.

pub use scroller_core::*;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{Scroller, WebDom};
