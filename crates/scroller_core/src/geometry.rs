//! Size measurements of a scroll region and the ranges derived from them
//!
//! Three spaces meet here: the container viewport, the content pane that
//! moves behind it, and the track the thumb travels along. Everything is in
//! CSS pixels and content offsets run from 0 (top) down to a negative maximum.

use crate::host::Host;

/// Measured heights of a scroll region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    /// Visible viewport height
    pub container_height: f64,
    /// Height of the channel the thumb moves within
    pub track_height: f64,
    /// Full height of the scrollable content
    pub content_height: f64,
    /// Rendered thumb height
    pub thumb_height: f64,
}

impl Geometry {
    /// Build geometry from raw heights, sizing the thumb by the visible ratio.
    ///
    /// Negative or non-finite inputs are treated as zero.
    pub fn new(container_height: f64, track_height: f64, content_height: f64) -> Self {
        let mut geometry = Self {
            container_height: sanitize(container_height),
            track_height: sanitize(track_height),
            content_height: sanitize(content_height),
            thumb_height: 0.0,
        };
        geometry.thumb_height = geometry.track_height * geometry.visible_ratio();
        geometry
    }

    /// Read the current layout heights of the three elements.
    pub fn measure<H: Host>(
        host: &H,
        container: &H::Node,
        track: &H::Node,
        content: &H::Node,
    ) -> Self {
        Self::new(
            host.offset_height(container),
            host.offset_height(track),
            host.offset_height(content),
        )
    }

    /// Replace the computed thumb height with what layout actually rendered.
    ///
    /// Host stylesheets may impose a minimum or maximum on the thumb, in
    /// which case its travel must follow the rendered size.
    pub fn with_thumb_height(mut self, rendered: f64) -> Self {
        self.thumb_height = sanitize(rendered).min(self.track_height);
        self
    }

    /// Fraction of the content visible at once, capped at 1.
    ///
    /// Without overflow (including zero content height) the whole content is
    /// visible and the ratio is exactly 1.
    pub fn visible_ratio(&self) -> f64 {
        if self.has_overflow() {
            self.container_height / self.content_height
        } else {
            1.0
        }
    }

    /// Lowest content offset, `container - content`.
    ///
    /// Negative when the content overflows, zero or positive otherwise.
    pub fn content_scroll_max(&self) -> f64 {
        self.container_height - self.content_height
    }

    /// Distance the thumb can move inside the track.
    pub fn thumb_travel(&self) -> f64 {
        (self.track_height - self.thumb_height).max(0.0)
    }

    /// Whether the content is taller than the container.
    pub fn has_overflow(&self) -> bool {
        self.content_scroll_max() < 0.0
    }

    /// Whether the thumb has room to move, making drags meaningful.
    pub fn has_thumb_travel(&self) -> bool {
        self.has_overflow() && self.thumb_travel() > 0.0
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
