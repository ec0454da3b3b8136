//! Input state machine: wheel, thumb drag and track click.
//!
//! The controller is `Idle` until a press on the track or thumb opens a
//! [`DragSession`], and returns to `Idle` on release. The session owns the
//! [`Release`] guard for the global move/up listeners, so leaving the
//! `Dragging` state by any path drops it and deregisters them.

use crate::constants::WHEEL_LINE_HEIGHT;
use crate::error::Result;
use crate::geometry::Geometry;
use crate::host::Release;
use crate::state::ScrollState;

/// Where a press landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    /// On the thumb itself
    Thumb,
    /// On the bare track, `offset_y` pixels below its top edge
    Track { offset_y: f64 },
}

/// Unit of a raw wheel delta as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaMode {
    /// Delta already in pixels
    #[default]
    Pixel,
    /// Delta in lines of text
    Line,
    /// Delta in whole pages
    Page,
}

impl DeltaMode {
    /// Map the DOM `deltaMode` code; unknown codes are treated as pixels.
    pub fn from_dom(code: u32) -> Self {
        match code {
            1 => DeltaMode::Line,
            2 => DeltaMode::Page,
            _ => DeltaMode::Pixel,
        }
    }
}

/// Convert a wheel delta to pixels. A page is one container height.
pub fn wheel_delta_px(delta: f64, mode: DeltaMode, page_height: f64) -> f64 {
    match mode {
        DeltaMode::Pixel => delta,
        DeltaMode::Line => delta * WHEEL_LINE_HEIGHT,
        DeltaMode::Page => delta * page_height,
    }
}

/// An open drag, from press to release.
#[derive(Debug)]
pub struct DragSession {
    anchor_pointer_y: f64,
    anchor_thumb_offset: f64,
    _listeners: Release,
}

impl DragSession {
    /// Pointer position at press time.
    pub fn anchor_pointer_y(&self) -> f64 {
        self.anchor_pointer_y
    }

    /// Thumb offset at press time.
    pub fn anchor_thumb_offset(&self) -> f64 {
        self.anchor_thumb_offset
    }
}

/// Controller phase.
#[derive(Debug, Default)]
pub enum Phase {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Translates raw input into scroll state updates.
#[derive(Debug)]
pub struct InputController {
    wheel_damping: f64,
    phase: Phase,
}

impl InputController {
    /// Create an idle controller with the given wheel damping divisor.
    pub fn new(wheel_damping: f64) -> Self {
        Self {
            wheel_damping,
            phase: Phase::Idle,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whether a drag session is open.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    /// Wheel input. `raw_delta` is positive when content should move down.
    pub fn on_wheel(&mut self, state: &mut ScrollState, geometry: &Geometry, raw_delta: f64) {
        let delta = raw_delta / self.wheel_damping;
        log::trace!("wheel raw={} damped={}", raw_delta, delta);
        state.apply_wheel_delta(geometry, delta);
    }

    /// Press on the thumb or track, entering `Dragging`.
    ///
    /// A track press first centres the thumb under the pointer, then hands
    /// off to a drag anchored at the new thumb position. `listen` registers
    /// the global move/up listeners and returns their guard. Any open drag
    /// is ended before `listen` runs, so re-registering the same listeners
    /// is never undone by the old session's release.
    pub fn on_pointer_down(
        &mut self,
        state: &mut ScrollState,
        geometry: &Geometry,
        hit: Hit,
        pointer_y: f64,
        listen: impl FnOnce() -> Result<Release>,
    ) -> Result<()> {
        if self.is_dragging() {
            log::warn!("pointer down while already dragging, ending previous drag");
            self.on_pointer_up();
        }
        let listeners = listen()?;

        if let Hit::Track { offset_y } = hit {
            let target = offset_y - geometry.thumb_height / 2.0;
            if geometry.has_thumb_travel() {
                state.set_by_fraction(geometry, target / geometry.thumb_travel());
            }
            log::debug!("track press at {} -> thumb {}", offset_y, state.thumb_offset());
        }

        self.phase = Phase::Dragging(DragSession {
            anchor_pointer_y: pointer_y,
            anchor_thumb_offset: state.thumb_offset(),
            _listeners: listeners,
        });
        log::debug!("drag start at pointer {}", pointer_y);
        Ok(())
    }

    /// Pointer move. Ignored unless dragging; returns whether it applied.
    pub fn on_pointer_move(
        &mut self,
        state: &mut ScrollState,
        geometry: &Geometry,
        pointer_y: f64,
    ) -> bool {
        let Phase::Dragging(session) = &self.phase else {
            return false;
        };
        if !geometry.has_thumb_travel() {
            return true;
        }
        let raw_thumb_offset = session.anchor_thumb_offset + (pointer_y - session.anchor_pointer_y);
        state.set_by_fraction(geometry, raw_thumb_offset / geometry.thumb_travel());
        log::trace!("drag to {} -> content {}", pointer_y, state.content_offset());
        true
    }

    /// Pointer release. Ends the drag and releases its listeners.
    pub fn on_pointer_up(&mut self) {
        if let Phase::Dragging(_) = std::mem::take(&mut self.phase) {
            log::debug!("drag end");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrollError;
    use std::cell::Cell;
    use std::rc::Rc;

    fn geometry() -> Geometry {
        Geometry::new(400.0, 300.0, 1000.0).with_thumb_height(60.0)
    }

    fn no_listeners() -> Result<Release> {
        Ok(Release::noop())
    }

    /// Registration that behaves like add/removeEventListener with one
    /// closure: adding twice is a no-op, a single remove clears it.
    fn attach(attached: &Rc<Cell<bool>>) -> Result<Release> {
        attached.set(true);
        let attached = Rc::clone(attached);
        Ok(Release::new(move || attached.set(false)))
    }

    #[test]
    fn test_wheel_is_damped() {
        let geometry = geometry();
        let mut state = ScrollState::new();
        let mut input = InputController::new(3.0);
        input.on_wheel(&mut state, &geometry, -300.0);
        assert!((state.content_offset() + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_thumb_drag_follows_pointer() {
        let geometry = geometry();
        let mut state = ScrollState::new();
        let mut input = InputController::new(3.0);
        input.on_pointer_down(&mut state, &geometry, Hit::Thumb, 50.0, no_listeners).unwrap();
        assert!(input.is_dragging());

        assert!(input.on_pointer_move(&mut state, &geometry, 110.0));
        assert!((state.thumb_offset() - 60.0).abs() < 1e-9);
        assert!((state.fraction(&geometry) - 0.25).abs() < 1e-9);

        // Offsets are relative to the anchor, not cumulative.
        input.on_pointer_move(&mut state, &geometry, 80.0);
        assert!((state.thumb_offset() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_past_travel_clamps() {
        let geometry = geometry();
        let mut state = ScrollState::new();
        let mut input = InputController::new(3.0);
        input.on_pointer_down(&mut state, &geometry, Hit::Thumb, 0.0, no_listeners).unwrap();
        input.on_pointer_move(&mut state, &geometry, 300.0);
        assert_eq!(state.content_offset(), geometry.content_scroll_max());
    }

    #[test]
    fn test_track_press_centres_thumb_then_drags() {
        let geometry = geometry();
        let mut state = ScrollState::new();
        let mut input = InputController::new(3.0);
        input.on_pointer_down(
            &mut state,
            &geometry,
            Hit::Track { offset_y: 200.0 },
            500.0,
            no_listeners,
        )
        .unwrap();
        assert!((state.thumb_offset() - 170.0).abs() < 1e-9);
        assert!((state.content_offset() + 425.0).abs() < 1e-9);

        let Phase::Dragging(session) = input.phase() else {
            panic!("expected a drag session");
        };
        assert_eq!(session.anchor_pointer_y(), 500.0);
        assert!((session.anchor_thumb_offset() - 170.0).abs() < 1e-9);

        input.on_pointer_move(&mut state, &geometry, 470.0);
        assert!((state.thumb_offset() - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_release_drops_listeners_and_ignores_moves() {
        let geometry = geometry();
        let attached = Rc::new(Cell::new(false));
        let mut state = ScrollState::new();
        let mut input = InputController::new(3.0);

        input
            .on_pointer_down(&mut state, &geometry, Hit::Thumb, 0.0, || attach(&attached))
            .unwrap();
        assert!(attached.get());
        input.on_pointer_move(&mut state, &geometry, 40.0);
        input.on_pointer_up();
        assert!(!attached.get());
        assert!(!input.is_dragging());

        let before = state;
        assert!(!input.on_pointer_move(&mut state, &geometry, 200.0));
        assert_eq!(state, before);
    }

    #[test]
    fn test_second_press_keeps_listeners_attached() {
        let geometry = geometry();
        let attached = Rc::new(Cell::new(false));
        let mut state = ScrollState::new();
        let mut input = InputController::new(3.0);

        input
            .on_pointer_down(&mut state, &geometry, Hit::Thumb, 0.0, || attach(&attached))
            .unwrap();
        input
            .on_pointer_down(&mut state, &geometry, Hit::Thumb, 10.0, || attach(&attached))
            .unwrap();
        assert!(input.is_dragging());
        assert!(attached.get());

        // the second session is live and anchored at the second press
        input.on_pointer_move(&mut state, &geometry, 70.0);
        assert!((state.thumb_offset() - 60.0).abs() < 1e-9);

        input.on_pointer_up();
        assert!(!attached.get());
    }

    #[test]
    fn test_failed_listen_stays_idle() {
        let geometry = geometry();
        let mut state = ScrollState::new();
        let mut input = InputController::new(3.0);

        let result = input.on_pointer_down(
            &mut state,
            &geometry,
            Hit::Track { offset_y: 200.0 },
            0.0,
            || Err(ScrollError::dom("no window")),
        );
        assert!(result.is_err());
        assert!(!input.is_dragging());
        assert_eq!(state, ScrollState::new());
    }

    #[test]
    fn test_wheel_delta_modes() {
        assert_eq!(wheel_delta_px(-3.0, DeltaMode::Pixel, 400.0), -3.0);
        assert_eq!(wheel_delta_px(-3.0, DeltaMode::Line, 400.0), -48.0);
        assert_eq!(wheel_delta_px(1.0, DeltaMode::Page, 400.0), 400.0);
        assert_eq!(DeltaMode::from_dom(0), DeltaMode::Pixel);
        assert_eq!(DeltaMode::from_dom(1), DeltaMode::Line);
        assert_eq!(DeltaMode::from_dom(2), DeltaMode::Page);
        assert_eq!(DeltaMode::from_dom(9), DeltaMode::Pixel);
    }
}
