//! Container reference resolution
//!
//! A container may be handed over directly or named by an `#id` or `.class`
//! selector. The reference is classified once, then looked up on the host.

use crate::error::{Result, ScrollError};
use crate::host::Host;

/// How the caller names the container.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementRef<N> {
    /// A handle to the element itself
    Element(N),
    /// A selector string, `#id` or `.class`
    Selector(String),
}

impl<N> From<&str> for ElementRef<N> {
    fn from(selector: &str) -> Self {
        ElementRef::Selector(selector.to_string())
    }
}

impl<N> From<String> for ElementRef<N> {
    fn from(selector: String) -> Self {
        ElementRef::Selector(selector)
    }
}

/// Classified container reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<N> {
    /// Use this element as is
    ByElement(N),
    /// Look up by id (the `#` stripped)
    ById(String),
    /// Look up the first match of a class selector (the `.` kept)
    ByClass(String),
    /// Selector without a recognized prefix
    Invalid(String),
}

/// Classify a container reference by its selector prefix.
pub fn resolve<N>(target: ElementRef<N>) -> Resolved<N> {
    match target {
        ElementRef::Element(node) => Resolved::ByElement(node),
        ElementRef::Selector(selector) => {
            if let Some(id) = selector.strip_prefix('#') {
                Resolved::ById(id.to_string())
            } else if selector.starts_with('.') {
                Resolved::ByClass(selector)
            } else {
                Resolved::Invalid(selector)
            }
        }
    }
}

impl<N: Clone> Resolved<N> {
    /// Find the element on the host.
    pub fn locate<H: Host<Node = N>>(self, host: &H) -> Result<N> {
        match self {
            Resolved::ByElement(node) => Ok(node),
            Resolved::ById(id) => host
                .element_by_id(&id)
                .ok_or_else(|| ScrollError::ElementNotFound(format!("#{id}"))),
            Resolved::ByClass(selector) => host
                .query_selector(&selector)
                .ok_or(ScrollError::ElementNotFound(selector)),
            Resolved::Invalid(selector) => Err(ScrollError::InvalidSelector(selector)),
        }
    }
}
