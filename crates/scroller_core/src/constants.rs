//! Centralized constants for scroller_core
//!
//! Class names and input tuning values live here so host stylesheets and
//! the web binding agree on them.

// =============================================================================
// Generated DOM
// =============================================================================

/// Class of the track element appended to the container
pub const TRACK_CLASS: &str = "scrollbar";

/// Class of the thumb element nested inside the track
pub const THUMB_CLASS: &str = "scroll-inner";

/// Marker class the content pane must carry inside the container
pub const CONTENT_CLASS: &str = "inner";

// =============================================================================
// Input
// =============================================================================

/// Divisor applied to raw wheel deltas before they move the content
pub const WHEEL_DAMPING: f64 = 3.0;

/// Pixels per line when the host reports wheel deltas in lines
pub const WHEEL_LINE_HEIGHT: f64 = 16.0;

/// Mouse button index of the primary button
pub const PRIMARY_BUTTON: i16 = 0;
