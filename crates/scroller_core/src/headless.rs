//! In-memory document for native builds and tests.
//!
//! Nodes live in an arena shared behind `Rc<RefCell<..>>`, so a clone of the
//! [`MemoryDom`] kept by the caller sees every write the region makes.
//! Layout is simulated: an element reports its assigned layout height, or
//! the height a class rule gives it, or else its `height` style raised to
//! any `min-height`, or else zero. Class rules stand in for a stylesheet.
//! Selector lookups only see nodes attached under [`MemoryDom::body`], in
//! document order, like `querySelector` does.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::{Result, ScrollError};
use crate::host::{Host, Release, StyleProperty};

/// Handle to a node in a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct NodeData {
    id: Option<String>,
    classes: Vec<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    layout_height: Option<f64>,
    min_height: f64,
    styles: BTreeMap<StyleProperty, f64>,
}

#[derive(Debug, Default, Clone, Copy)]
struct ClassRule {
    height: Option<f64>,
    min_height: f64,
}

#[derive(Debug, Default)]
struct Arena {
    nodes: Vec<NodeData>,
    rules: BTreeMap<String, ClassRule>,
}

impl Arena {
    fn node(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.0]
    }

    fn node_mut(&mut self, node: NodeId) -> &mut NodeData {
        &mut self.nodes[node.0]
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.node(root).children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            found.push(next);
            stack.extend(self.node(next).children.iter().rev().copied());
        }
        found
    }
}

/// Headless [`Host`] with simulated layout and global listener accounting.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    arena: Rc<RefCell<Arena>>,
    global_listeners: Rc<Cell<usize>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        let arena = Arena {
            nodes: vec![NodeData::default()],
            ..Arena::default()
        };
        Self {
            arena: Rc::new(RefCell::new(arena)),
            global_listeners: Rc::new(Cell::new(0)),
        }
    }
}

impl MemoryDom {
    /// Create an empty document holding only its body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Root every attached node hangs from.
    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a detached element carrying space-separated `classes`.
    pub fn element(&self, classes: &str) -> NodeId {
        let mut arena = self.arena.borrow_mut();
        arena.nodes.push(NodeData {
            classes: classes.split_whitespace().map(str::to_string).collect(),
            ..NodeData::default()
        });
        NodeId(arena.nodes.len() - 1)
    }

    /// Give an element an id attribute.
    pub fn set_id(&self, node: NodeId, id: &str) {
        self.arena.borrow_mut().node_mut(node).id = Some(id.to_string());
    }

    /// Fix the layout height an element reports.
    pub fn set_height(&self, node: NodeId, height: f64) {
        self.arena.borrow_mut().node_mut(node).layout_height = Some(height);
    }

    /// Apply a minimum height to a style-sized element.
    pub fn set_min_height(&self, node: NodeId, height: f64) {
        self.arena.borrow_mut().node_mut(node).min_height = height;
    }

    /// Give every element carrying `class` a fixed layout height.
    pub fn set_class_height(&self, class: &str, height: f64) {
        let mut arena = self.arena.borrow_mut();
        arena.rules.entry(class.to_string()).or_default().height = Some(height);
    }

    /// Give every style-sized element carrying `class` a minimum height.
    pub fn set_class_min_height(&self, class: &str, height: f64) {
        let mut arena = self.arena.borrow_mut();
        arena.rules.entry(class.to_string()).or_default().min_height = height;
    }

    /// Attach `child` under `parent`.
    pub fn append(&self, parent: NodeId, child: NodeId) {
        let mut arena = self.arena.borrow_mut();
        let previous_parent = arena.node(child).parent;
        if let Some(old) = previous_parent {
            arena.node_mut(old).children.retain(|c| *c != child);
        }
        arena.node_mut(child).parent = Some(parent);
        arena.node_mut(parent).children.push(child);
    }

    /// Last written value of a style property.
    pub fn style(&self, node: NodeId, property: StyleProperty) -> Option<f64> {
        self.arena.borrow().node(node).styles.get(&property).copied()
    }

    /// Direct children of a node, in order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.arena.borrow().node(node).children.clone()
    }

    /// Whether a node carries `class`.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.arena.borrow().node(node).classes.iter().any(|c| c == class)
    }

    /// Number of nodes ever created, the body included.
    pub fn node_count(&self) -> usize {
        self.arena.borrow().nodes.len()
    }

    /// Register the global move/up listener pair, as a drag start would.
    ///
    /// Mirrors add/removeEventListener with one pair of closures: adding
    /// while already registered changes nothing, and the first release
    /// removes the pair.
    pub fn listen_global(&self) -> Result<Release> {
        let count = Rc::clone(&self.global_listeners);
        count.set(2);
        Ok(Release::new(move || count.set(0)))
    }

    /// Currently registered global listeners.
    pub fn global_listener_count(&self) -> usize {
        self.global_listeners.get()
    }
}

impl Host for MemoryDom {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let arena = self.arena.borrow();
        arena
            .descendants(self.body())
            .into_iter()
            .find(|n| arena.node(*n).id.as_deref() == Some(id))
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        if let Some(id) = selector.strip_prefix('#') {
            return self.element_by_id(id);
        }
        let class = selector.strip_prefix('.')?;
        self.query_class(&self.body(), class)
    }

    fn query_class(&self, root: &NodeId, class: &str) -> Option<NodeId> {
        let arena = self.arena.borrow();
        arena
            .descendants(*root)
            .into_iter()
            .find(|n| arena.node(*n).classes.iter().any(|c| c == class))
    }

    fn create_element(&self, class: &str) -> Result<NodeId> {
        if class.is_empty() {
            return Err(ScrollError::dom("cannot create an element without a class"));
        }
        Ok(self.element(class))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<()> {
        if parent == child {
            return Err(ScrollError::dom("cannot append a node to itself"));
        }
        self.append(*parent, *child);
        Ok(())
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        let arena = self.arena.borrow();
        let data = arena.node(*node);
        let rules: Vec<ClassRule> = data
            .classes
            .iter()
            .filter_map(|c| arena.rules.get(c).copied())
            .collect();
        let class_height = rules.iter().find_map(|r| r.height);
        let min_height = rules
            .iter()
            .map(|r| r.min_height)
            .fold(data.min_height, f64::max);

        match (data.layout_height, class_height, data.styles.get(&StyleProperty::Height)) {
            (Some(height), _, _) => height,
            (None, Some(height), _) => height,
            (None, None, Some(&height)) => height.max(min_height),
            (None, None, None) => 0.0,
        }
    }

    fn set_style_px(&self, node: &NodeId, property: StyleProperty, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(ScrollError::dom(format!(
                "non-finite {} value {}",
                property.css_name(),
                value
            )));
        }
        self.arena
            .borrow_mut()
            .node_mut(*node)
            .styles
            .insert(property, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_class_searches_descendants_in_order() {
        let dom = MemoryDom::new();
        let root = dom.element("root");
        let a = dom.element("wrap");
        let b = dom.element("inner first");
        let c = dom.element("inner");
        dom.append(root, a);
        dom.append(a, b);
        dom.append(root, c);
        assert_eq!(dom.query_class(&root, "inner"), Some(b));
        assert_eq!(dom.query_class(&a, "root"), None);
    }

    #[test]
    fn test_selectors() {
        let dom = MemoryDom::new();
        let node = dom.element("panel");
        dom.set_id(node, "main");
        dom.append(dom.body(), node);
        assert_eq!(dom.query_selector("#main"), Some(node));
        assert_eq!(dom.query_selector(".panel"), Some(node));
        assert_eq!(dom.query_selector("panel"), None);
        assert_eq!(dom.element_by_id("other"), None);
    }

    #[test]
    fn test_style_height_with_minimum() {
        let dom = MemoryDom::new();
        let node = dom.element("thumb");
        assert_eq!(dom.offset_height(&node), 0.0);
        dom.set_style_px(&node, StyleProperty::Height, 12.0).unwrap();
        assert_eq!(dom.offset_height(&node), 12.0);
        dom.set_min_height(node, 30.0);
        assert_eq!(dom.offset_height(&node), 30.0);
        dom.set_height(node, 5.0);
        assert_eq!(dom.offset_height(&node), 5.0);
    }

    #[test]
    fn test_class_rules() {
        let dom = MemoryDom::new();
        dom.set_class_height("scrollbar", 300.0);
        dom.set_class_min_height("scroll-inner", 40.0);
        let track = dom.element("scrollbar");
        let thumb = dom.element("scroll-inner");
        assert_eq!(dom.offset_height(&track), 300.0);
        dom.set_style_px(&thumb, StyleProperty::Height, 25.0).unwrap();
        assert_eq!(dom.offset_height(&thumb), 40.0);
        dom.set_style_px(&thumb, StyleProperty::Height, 90.0).unwrap();
        assert_eq!(dom.offset_height(&thumb), 90.0);
    }

    #[test]
    fn test_rejects_nan_style() {
        let dom = MemoryDom::new();
        let node = dom.element("x");
        assert!(dom.set_style_px(&node, StyleProperty::Top, f64::NAN).is_err());
    }

    #[test]
    fn test_selectors_skip_detached_nodes() {
        let dom = MemoryDom::new();
        let detached = dom.element("panel");
        dom.set_id(detached, "main");
        assert_eq!(dom.query_selector(".panel"), None);
        assert_eq!(dom.query_selector("#main"), None);

        dom.append(dom.body(), detached);
        assert_eq!(dom.query_selector("#main"), Some(detached));
    }

    #[test]
    fn test_selectors_follow_document_order() {
        let dom = MemoryDom::new();
        let wrapper = dom.element("wrapper");
        let late = dom.element("panel");
        let early = dom.element("panel");
        dom.append(dom.body(), wrapper);
        dom.append(dom.body(), late);
        dom.append(wrapper, early);
        // created later but earlier in the tree
        assert_eq!(dom.query_selector(".panel"), Some(early));
    }

    #[test]
    fn test_global_listener_accounting() {
        let dom = MemoryDom::new();
        let release = dom.listen_global().unwrap();
        assert_eq!(dom.global_listener_count(), 2);
        drop(release);
        assert_eq!(dom.global_listener_count(), 0);
    }

    #[test]
    fn test_global_listeners_register_once() {
        let dom = MemoryDom::new();
        let first = dom.listen_global().unwrap();
        let second = dom.listen_global().unwrap();
        assert_eq!(dom.global_listener_count(), 2);
        drop(first);
        assert_eq!(dom.global_listener_count(), 0);
        drop(second);
        assert_eq!(dom.global_listener_count(), 0);
    }
}
