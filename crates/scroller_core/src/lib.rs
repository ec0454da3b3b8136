//! scroller_core - a custom scrollbar that drives an inner content pane
//!
//! Platform-independent half of the scroller: geometry, scroll state, the
//! input state machine and the region that ties them to a [`Host`] document.
//! The browser binding lives in the `scroller` crate; [`MemoryDom`] is a
//! headless host for native builds and tests.

pub mod constants;
mod error;
mod geometry;
mod headless;
mod host;
mod input;
mod options;
mod region;
mod state;
mod target;

#[cfg(test)]
mod tests;

pub use error::{Result, ScrollError};
pub use geometry::Geometry;
pub use headless::{MemoryDom, NodeId};
pub use host::{px, Host, Release, StyleProperty};
pub use input::{wheel_delta_px, DeltaMode, DragSession, Hit, InputController, Phase};
pub use options::{ResizeMode, ScrollOptions};
pub use region::{Parts, ScrollRegion};
pub use state::{clamp_content_offset, ScrollState};
pub use target::{resolve, ElementRef, Resolved};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ElementRef, Hit, Host, MemoryDom, ResizeMode, ScrollError, ScrollOptions, ScrollRegion,
    };
}
