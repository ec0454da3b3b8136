//! Scroll position of a region and its conversions
//!
//! The state holds two views of the same scroll fraction: the content
//! offset (0 down to `content_scroll_max`) and the thumb offset (0 up to
//! `thumb_travel`). Every update clamps the content offset first and then
//! derives the thumb from it, so the two never disagree.

use crate::geometry::Geometry;

/// Current content and thumb offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    content_offset: f64,
    thumb_offset: f64,
}

impl ScrollState {
    /// State scrolled to the top.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertical offset of the content pane, `<= 0`.
    pub fn content_offset(&self) -> f64 {
        self.content_offset
    }

    /// Vertical offset of the thumb inside the track, `>= 0`.
    pub fn thumb_offset(&self) -> f64 {
        self.thumb_offset
    }

    /// Normalized scroll progress, 0 at the top and 1 at the bottom.
    pub fn fraction(&self, geometry: &Geometry) -> f64 {
        if geometry.has_overflow() {
            self.content_offset / geometry.content_scroll_max()
        } else {
            0.0
        }
    }

    /// Move the content by an already damped wheel delta.
    pub fn apply_wheel_delta(&mut self, geometry: &Geometry, delta_y: f64) {
        self.settle(geometry, self.content_offset + delta_y);
    }

    /// Jump to a fraction of the scroll range.
    ///
    /// The fraction is not clamped up front; out of range values land on the
    /// nearest end through the content offset clamp. NaN leaves the state
    /// untouched.
    pub fn set_by_fraction(&mut self, geometry: &Geometry, fraction: f64) {
        if fraction.is_nan() {
            return;
        }
        let offset = -(geometry.content_scroll_max().abs() * fraction);
        self.settle(geometry, offset);
    }

    /// Move the thumb by a pixel delta from where it currently sits.
    pub fn set_by_thumb_delta(&mut self, geometry: &Geometry, delta_px: f64) {
        if !geometry.has_thumb_travel() {
            self.settle(geometry, self.content_offset);
            return;
        }
        let fraction = (self.thumb_offset + delta_px) / geometry.thumb_travel();
        self.set_by_fraction(geometry, fraction);
    }

    /// Re-fit the current pixel offset against new geometry.
    pub fn refit_offset(&mut self, geometry: &Geometry) {
        self.settle(geometry, self.content_offset);
    }

    /// Re-apply the scroll fraction measured against `previous` to `geometry`.
    pub fn refit_fraction(&mut self, previous: &Geometry, geometry: &Geometry) {
        let fraction = self.fraction(previous);
        self.set_by_fraction(geometry, fraction);
    }

    fn settle(&mut self, geometry: &Geometry, offset: f64) {
        if !geometry.has_overflow() {
            *self = Self::default();
            return;
        }
        let max = geometry.content_scroll_max();
        self.content_offset = clamp_content_offset(offset, max);
        self.thumb_offset = geometry.thumb_travel() * (self.content_offset / max);
    }
}

/// Clamp a content offset into `[scroll_max, 0]`.
///
/// The upper bound is applied first and the lower bound second, so when
/// `scroll_max` is itself positive the result is `scroll_max`, not 0.
pub fn clamp_content_offset(offset: f64, scroll_max: f64) -> f64 {
    let mut clamped = offset;
    if clamped > 0.0 {
        clamped = 0.0;
    }
    if clamped < scroll_max {
        clamped = scroll_max;
    }
    clamped
}
