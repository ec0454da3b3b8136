//! Construction options for a scroll region.
//!
//! Every field has a default matching the stock widget, so an empty or
//! missing options object behaves exactly like no options at all.

use serde::{Deserialize, Serialize};

use crate::constants::{CONTENT_CLASS, THUMB_CLASS, TRACK_CLASS, WHEEL_DAMPING};
use crate::error::{Result, ScrollError};

/// What `resize()` does with the current scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ResizeMode {
    /// Keep the content offset in pixels, clamped to the new range
    #[default]
    KeepOffset,
    /// Keep the scroll fraction and recompute both offsets
    KeepFraction,
}

/// Options accepted at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrollOptions {
    /// Divisor applied to raw wheel deltas
    pub wheel_damping: f64,
    /// Class of the generated track element
    pub track_class: String,
    /// Class of the generated thumb element
    pub thumb_class: String,
    /// Marker class of the content pane
    pub content_class: String,
    /// Scroll position handling on resize
    pub resize_mode: ResizeMode,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            wheel_damping: WHEEL_DAMPING,
            track_class: TRACK_CLASS.to_string(),
            thumb_class: THUMB_CLASS.to_string(),
            content_class: CONTENT_CLASS.to_string(),
            resize_mode: ResizeMode::default(),
        }
    }
}

impl ScrollOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object. `null` yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Option<Self> = serde_json::from_str(json)
            .map_err(|e| ScrollError::invalid_option(e.to_string()))?;
        let options = options.unwrap_or_default();
        options.validate()?;
        Ok(options)
    }

    /// Set the wheel damping divisor.
    pub fn wheel_damping(mut self, damping: f64) -> Self {
        self.wheel_damping = damping;
        self
    }

    /// Set the resize mode.
    pub fn resize_mode(mut self, mode: ResizeMode) -> Self {
        self.resize_mode = mode;
        self
    }

    /// Set the content pane marker class.
    pub fn content_class(mut self, class: impl Into<String>) -> Self {
        self.content_class = class.into();
        self
    }

    /// Reject values the region cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.wheel_damping.is_finite() || self.wheel_damping <= 0.0 {
            return Err(ScrollError::invalid_option(format!(
                "wheelDamping must be a positive number, got {}",
                self.wheel_damping
            )));
        }
        for (name, class) in [
            ("trackClass", &self.track_class),
            ("thumbClass", &self.thumb_class),
            ("contentClass", &self.content_class),
        ] {
            if class.trim().is_empty() || class.contains(char::is_whitespace) {
                return Err(ScrollError::invalid_option(format!(
                    "{name} must be a single class name, got '{class}'"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ScrollOptions::default();
        assert_eq!(options.wheel_damping, 3.0);
        assert_eq!(options.track_class, "scrollbar");
        assert_eq!(options.thumb_class, "scroll-inner");
        assert_eq!(options.content_class, "inner");
        assert_eq!(options.resize_mode, ResizeMode::KeepOffset);
    }

    #[test]
    fn test_from_json_empty_and_null() {
        assert_eq!(ScrollOptions::from_json("{}").unwrap(), ScrollOptions::default());
        assert_eq!(ScrollOptions::from_json("null").unwrap(), ScrollOptions::default());
    }

    #[test]
    fn test_from_json_overrides() {
        let options = ScrollOptions::from_json(
            r#"{"wheelDamping": 2, "contentClass": "body", "resizeMode": "keepFraction"}"#,
        )
        .unwrap();
        assert_eq!(options.wheel_damping, 2.0);
        assert_eq!(options.content_class, "body");
        assert_eq!(options.track_class, "scrollbar");
        assert_eq!(options.resize_mode, ResizeMode::KeepFraction);
    }

    #[test]
    fn test_from_json_ignores_unknown_keys() {
        let options = ScrollOptions::from_json(r#"{"color": "red"}"#).unwrap();
        assert_eq!(options, ScrollOptions::default());
    }

    #[test]
    fn test_rejects_bad_damping() {
        let err = ScrollOptions::from_json(r#"{"wheelDamping": 0}"#).unwrap_err();
        assert!(matches!(err, ScrollError::InvalidOption(_)));
        assert!(ScrollOptions::new().wheel_damping(-1.0).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_class() {
        assert!(ScrollOptions::new().content_class("a b").validate().is_err());
        assert!(ScrollOptions::new().content_class("").validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(ScrollOptions::from_json("[1, 2]").is_err());
        assert!(ScrollOptions::from_json(r#"{"resizeMode": "sideways"}"#).is_err());
    }
}
