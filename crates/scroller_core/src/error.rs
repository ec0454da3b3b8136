use thiserror::Error;

/// Errors raised while building or driving a scroll region.
///
/// Degenerate geometry (no overflow) is deliberately absent: it is a valid,
/// inert state rather than a failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScrollError {
    /// Selector string without a `#` or `.` prefix
    #[error("Invalid selector '{0}': please use an element, or id/class selector")]
    InvalidSelector(String),

    /// Selector resolved to no element
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Container has no descendant carrying the content marker class
    #[error("Content pane not found: no '.{0}' element inside the container")]
    ContentPaneNotFound(String),

    /// Options object could not be parsed or holds an unusable value
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Host DOM call failed
    #[error("DOM error: {0}")]
    Dom(String),
}

impl ScrollError {
    /// Create a DOM error from anything printable.
    pub fn dom(message: impl Into<String>) -> Self {
        Self::Dom(message.into())
    }

    /// Create an invalid option error with a message.
    pub fn invalid_option(message: impl Into<String>) -> Self {
        Self::InvalidOption(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ScrollError>;
