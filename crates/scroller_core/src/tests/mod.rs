//! End-to-end tests driving a [`ScrollRegion`] over the headless host.
//!
//! These cover construction and resolution failures, the reference
//! scenarios for wheel, track press and drag, listener release, and resize.


use crate::{ElementRef, MemoryDom, NodeId, ScrollOptions, ScrollRegion, StyleProperty};

/// A container with a content pane and a stylesheet sizing the track.
pub(crate) struct Fixture {
    pub dom: MemoryDom,
    pub container: NodeId,
    pub content: NodeId,
}

impl Fixture {
    pub fn new(container_height: f64, content_height: f64, track_height: f64) -> Self {
        let dom = MemoryDom::new();
        dom.set_class_height("scrollbar", track_height);

        let container = dom.element("scroller");
        dom.set_id(container, "list");
        dom.set_height(container, container_height);
        dom.append(dom.body(), container);

        let content = dom.element("inner");
        dom.set_height(content, content_height);
        dom.append(container, content);

        Self {
            dom,
            container,
            content,
        }
    }

    pub fn region(&self) -> ScrollRegion<MemoryDom> {
        self.region_with(ScrollOptions::default())
    }

    pub fn region_with(&self, options: ScrollOptions) -> ScrollRegion<MemoryDom> {
        ScrollRegion::new(self.dom.clone(), ElementRef::Element(self.container), options)
            .expect("region should build")
    }

    pub fn content_top(&self) -> Option<f64> {
        self.dom.style(self.content, StyleProperty::Top)
    }
}

pub(crate) fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
