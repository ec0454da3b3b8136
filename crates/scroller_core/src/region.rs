//! The scroll region: container, generated track and thumb, content pane.
//!
//! Owns the measured [`Geometry`], the [`ScrollState`] and the
//! [`InputController`], and is the only place that writes styles back to the
//! host. Every input entry point updates state and then renders it.

use crate::error::{Result, ScrollError};
use crate::geometry::Geometry;
use crate::host::{Host, Release, StyleProperty};
use crate::input::{Hit, InputController};
use crate::options::{ResizeMode, ScrollOptions};
use crate::state::ScrollState;
use crate::target::{resolve, ElementRef};

/// Elements making up a region.
#[derive(Debug, Clone)]
pub struct Parts<N> {
    /// Viewport element the region was built on
    pub container: N,
    /// Generated track, appended to the container
    pub track: N,
    /// Generated thumb, nested in the track
    pub thumb: N,
    /// Scrollable content pane found inside the container
    pub content: N,
}

/// A custom scrollbar bound to one container.
pub struct ScrollRegion<H: Host> {
    host: H,
    parts: Parts<H::Node>,
    options: ScrollOptions,
    geometry: Geometry,
    state: ScrollState,
    input: InputController,
}

impl<H: Host> ScrollRegion<H> {
    /// Resolve the container, generate the track and thumb, and measure.
    ///
    /// The content pane is located before anything is appended, so a failed
    /// construction leaves the document untouched.
    pub fn new(host: H, target: ElementRef<H::Node>, options: ScrollOptions) -> Result<Self> {
        options.validate()?;
        let container = resolve(target).locate(&host)?;
        let content = host
            .query_class(&container, &options.content_class)
            .ok_or_else(|| ScrollError::ContentPaneNotFound(options.content_class.clone()))?;

        let track = host.create_element(&options.track_class)?;
        let thumb = host.create_element(&options.thumb_class)?;
        host.append_child(&track, &thumb)?;
        host.append_child(&container, &track)?;

        let input = InputController::new(options.wheel_damping);
        let mut region = Self {
            host,
            parts: Parts {
                container,
                track,
                thumb,
                content,
            },
            options,
            geometry: Geometry::default(),
            state: ScrollState::new(),
            input,
        };
        region.measure()?;
        region.render()?;
        log::debug!("scroll region ready: {:?}", region.geometry);
        Ok(region)
    }

    /// Re-measure after an external layout change.
    ///
    /// With [`ResizeMode::KeepOffset`] the content keeps its pixel offset,
    /// clamped into the new range; with [`ResizeMode::KeepFraction`] the
    /// previous scroll fraction is re-applied.
    pub fn resize(&mut self) -> Result<()> {
        let previous = self.geometry;
        self.measure()?;
        match self.options.resize_mode {
            ResizeMode::KeepOffset => self.state.refit_offset(&self.geometry),
            ResizeMode::KeepFraction => self.state.refit_fraction(&previous, &self.geometry),
        }
        log::debug!("resized: {:?} -> {:?}", previous, self.geometry);
        self.render()
    }

    /// Wheel input, positive raw delta moves the content down.
    pub fn wheel(&mut self, raw_delta: f64) -> Result<()> {
        self.input.on_wheel(&mut self.state, &self.geometry, raw_delta);
        self.render()
    }

    /// Press on the thumb or track. `listen` registers the global move/up
    /// listeners and returns the guard that removes them when the drag ends.
    pub fn pointer_down(
        &mut self,
        hit: Hit,
        pointer_y: f64,
        listen: impl FnOnce() -> Result<Release>,
    ) -> Result<()> {
        self.input
            .on_pointer_down(&mut self.state, &self.geometry, hit, pointer_y, listen)?;
        self.render()
    }

    /// Pointer move anywhere; only acts while dragging.
    pub fn pointer_move(&mut self, pointer_y: f64) -> Result<()> {
        if self
            .input
            .on_pointer_move(&mut self.state, &self.geometry, pointer_y)
        {
            self.render()?;
        }
        Ok(())
    }

    /// Pointer release anywhere, ending any drag.
    pub fn pointer_up(&mut self) {
        self.input.on_pointer_up();
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    /// Geometry from the last measurement.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Current scroll offsets.
    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    /// Container, generated and content elements.
    pub fn parts(&self) -> &Parts<H::Node> {
        &self.parts
    }

    /// Options the region was built with.
    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    /// Host document the region writes to.
    pub fn host(&self) -> &H {
        &self.host
    }

    fn measure(&mut self) -> Result<()> {
        let Parts {
            container,
            track,
            thumb,
            content,
        } = &self.parts;
        let geometry = Geometry::measure(&self.host, container, track, content);
        self.host
            .set_style_px(thumb, StyleProperty::Height, geometry.thumb_height)?;
        self.geometry = geometry.with_thumb_height(self.host.offset_height(thumb));

        if !self.geometry.has_overflow() {
            log::warn!(
                "content ({}px) fits the container ({}px), scrolling disabled",
                self.geometry.content_height,
                self.geometry.container_height
            );
        }
        Ok(())
    }

    fn render(&self) -> Result<()> {
        self.host.set_style_px(
            &self.parts.content,
            StyleProperty::Top,
            self.state.content_offset(),
        )?;
        self.host.set_style_px(
            &self.parts.thumb,
            StyleProperty::Top,
            self.state.thumb_offset(),
        )
    }
}
