//! Host document abstraction
//!
//! The scroll region never touches a concrete DOM. Element lookup, node
//! creation, layout reads and style writes go through [`Host`], implemented by
//! the browser binding and by the headless [`crate::MemoryDom`].

use std::fmt;

use crate::error::Result;

/// Style properties the region writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    /// Vertical position (`top`)
    Top,
    /// Box height (`height`)
    Height,
}

impl StyleProperty {
    /// CSS property name.
    pub fn css_name(&self) -> &'static str {
        match self {
            StyleProperty::Top => "top",
            StyleProperty::Height => "height",
        }
    }
}

/// Render a pixel length as a CSS value.
pub fn px(value: f64) -> String {
    // adding +0.0 turns -0.0 into 0.0
    format!("{}px", value + 0.0)
}

/// Primitives the region needs from the document it lives in.
pub trait Host {
    /// Handle to an element.
    type Node: Clone;

    /// Look up an element by id (without the `#`).
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// First element matching a selector string.
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;

    /// First descendant of `root` carrying `class`.
    fn query_class(&self, root: &Self::Node, class: &str) -> Option<Self::Node>;

    /// Create a detached element with the given class name.
    fn create_element(&self, class: &str) -> Result<Self::Node>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    /// Layout height of an element in pixels.
    fn offset_height(&self, node: &Self::Node) -> f64;

    /// Write a pixel-valued style property.
    fn set_style_px(&self, node: &Self::Node, property: StyleProperty, value: f64) -> Result<()>;
}

/// Scoped release of a resource acquired by the host.
///
/// Holds a single teardown closure that runs exactly once, when the guard is
/// dropped. Drag sessions keep one of these for their global listeners.
pub struct Release {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Release {
    /// Wrap a teardown closure.
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// A guard with nothing to release.
    pub fn noop() -> Self {
        Self { teardown: None }
    }
}

impl Drop for Release {
    fn drop(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl fmt::Debug for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Release")
            .field("armed", &self.teardown.is_some())
            .finish()
    }
}
