//! Accessibility modal marking.
//!
//! The accessibility figure shows a view layout next to its view hierarchy.
//! Hovering either representation of a view marks it as modal in both; every
//! other view sharing its parent is then ignored by assistive technology,
//! together with everything beneath it.
//!
//! Each view appears twice: as `<id>` in the layout and `<id>H` in the
//! hierarchy.

use serde::{Deserialize, Serialize};

/// Class added to the modal view and its hierarchy entry.
pub const MODAL_CLASS: &str = "modal";
/// Class added to views hidden by the modal view.
pub const IGNORED_CLASS: &str = "ignored";
/// Suffix of hierarchy entry ids.
pub const HIERARCHY_SUFFIX: char = 'H';

/// Index of a node in a [`ViewTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

/// A view with its class list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewNode {
    pub id: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub classes: Vec<String>,
}

/// Nested description of a view and its subviews, as read from the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOutline {
    pub id: String,
    #[serde(default)]
    pub children: Vec<ViewOutline>,
}

impl ViewOutline {
    pub fn new(id: impl Into<String>, children: Vec<ViewOutline>) -> Self {
        Self {
            id: id.into(),
            children,
        }
    }

    pub fn leaf(id: impl Into<String>) -> Self {
        Self::new(id, Vec::new())
    }
}

/// Marking classes of one view, ready to write into the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewClasses {
    pub id: String,
    pub classes: String,
}

/// Arena of views. Several roots may coexist.
///
/// A [`NodeId`] is only meaningful for the tree that produced it; lookups
/// with an id from another tree return `None` or `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewTree {
    nodes: Vec<ViewNode>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a view with no parent.
    pub fn add_root(&mut self, id: impl Into<String>) -> NodeId {
        self.push(id.into(), None)
    }

    /// Build a tree from outlines, one root per outline.
    pub fn from_outlines(outlines: &[ViewOutline]) -> Self {
        let mut tree = Self::new();
        for outline in outlines {
            let root = tree.add_root(outline.id.clone());
            tree.add_outline_children(root, outline);
        }
        tree
    }

    fn add_outline_children(&mut self, parent: NodeId, outline: &ViewOutline) {
        for child in &outline.children {
            if let Some(node) = self.add_child(parent, child.id.clone()) {
                self.add_outline_children(node, child);
            }
        }
    }

    /// Add a view as the last child of `parent`. Returns `None` if `parent`
    /// is not in this tree.
    pub fn add_child(&mut self, parent: NodeId, id: impl Into<String>) -> Option<NodeId> {
        if parent.0 >= self.nodes.len() {
            return None;
        }
        let node = self.push(id.into(), Some(parent));
        self.nodes[parent.0].children.push(node);
        Some(node)
    }

    fn push(&mut self, id: String, parent: Option<NodeId>) -> NodeId {
        self.nodes.push(ViewNode {
            id,
            parent,
            children: Vec::new(),
            classes: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, node: NodeId) -> Option<&ViewNode> {
        self.nodes.get(node.0)
    }

    /// Find a view by element id.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.id == id).map(NodeId)
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// Class attribute of a view.
    pub fn class_attribute(&self, node: NodeId) -> Option<String> {
        self.get(node).map(|n| n.classes.join(" "))
    }

    /// Marking classes of every view, in insertion order.
    pub fn class_attributes(&self) -> Vec<ViewClasses> {
        self.nodes
            .iter()
            .map(|n| ViewClasses {
                id: n.id.clone(),
                classes: n.classes.join(" "),
            })
            .collect()
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.classes.retain(|c| c != class);
        }
    }

    /// Set or clear `ignored` on every descendant of `view` outside `except`.
    fn mark_descendants_except(&mut self, view: NodeId, except: NodeId, ignore: bool) {
        let Some(children) = self.get(view).map(|n| n.children.clone()) else {
            return;
        };
        for child in children {
            if child == except {
                continue;
            }
            if ignore {
                self.add_class(child, IGNORED_CLASS);
            } else {
                self.remove_class(child, IGNORED_CLASS);
            }
            self.mark_descendants_except(child, except, ignore);
        }
    }

    /// Set or clear the modal marking for a single view.
    fn set_modal(&mut self, node: NodeId, modal: bool) {
        if modal {
            self.add_class(node, MODAL_CLASS);
        } else {
            self.remove_class(node, MODAL_CLASS);
        }
        if let Some(parent) = self.get(node).and_then(|n| n.parent) {
            self.mark_descendants_except(parent, node, modal);
        }
    }
}

/// Layout and hierarchy ids for the view named by `id`.
pub fn view_pair(id: &str) -> (String, String) {
    match id.strip_suffix(HIERARCHY_SUFFIX) {
        Some(view) => (view.to_string(), id.to_string()),
        None => (id.to_string(), format!("{}{}", id, HIERARCHY_SUFFIX)),
    }
}

/// Tracks which view is currently modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalMarker {
    current: Vec<NodeId>,
}

impl ModalMarker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Views currently marked modal.
    pub fn current(&self) -> &[NodeId] {
        &self.current
    }

    /// Mark the view named `id` (layout or hierarchy id) and its counterpart
    /// as modal, clearing any previous mark. Returns whether anything was
    /// marked.
    pub fn mark(&mut self, tree: &mut ViewTree, id: &str) -> bool {
        self.clear(tree);
        let (view, hierarchy) = view_pair(id);
        self.current = [view, hierarchy]
            .iter()
            .filter_map(|name| tree.find(name))
            .collect();
        for &node in &self.current {
            tree.set_modal(node, true);
        }
        if self.current.is_empty() {
            log::debug!("No view named {:?} to mark as modal", id);
        }
        !self.current.is_empty()
    }

    /// Remove the current modal marking.
    pub fn clear(&mut self, tree: &mut ViewTree) {
        for node in self.current.drain(..) {
            tree.set_modal(node, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Layout: screen > [toolbar > [button], dialog > [ok]].
    /// Hierarchy mirrors it with `H` suffixed ids.
    fn tree() -> ViewTree {
        let mut tree = ViewTree::new();
        for suffix in ["", "H"] {
            let screen = tree.add_root(format!("screen{}", suffix));
            let toolbar = tree.add_child(screen, format!("toolbar{}", suffix)).unwrap();
            tree.add_child(toolbar, format!("button{}", suffix)).unwrap();
            let dialog = tree.add_child(screen, format!("dialog{}", suffix)).unwrap();
            tree.add_child(dialog, format!("ok{}", suffix)).unwrap();
        }
        tree
    }

    fn has(tree: &ViewTree, id: &str, class: &str) -> bool {
        tree.find(id).map(|n| tree.has_class(n, class)).unwrap_or(false)
    }

    #[test]
    fn test_view_pair() {
        assert_eq!(view_pair("dialog"), ("dialog".to_string(), "dialogH".to_string()));
        assert_eq!(view_pair("dialogH"), ("dialog".to_string(), "dialogH".to_string()));
    }

    #[test]
    fn test_mark_from_layout() {
        let mut tree = tree();
        let mut marker = ModalMarker::new();
        assert!(marker.mark(&mut tree, "dialog"));

        for id in ["dialog", "dialogH"] {
            assert!(has(&tree, id, MODAL_CLASS));
        }
        for id in ["toolbar", "button", "toolbarH", "buttonH"] {
            assert!(has(&tree, id, IGNORED_CLASS), "{} should be ignored", id);
        }
        for id in ["ok", "okH", "screen", "dialog"] {
            assert!(!has(&tree, id, IGNORED_CLASS), "{} should not be ignored", id);
        }
    }

    #[test]
    fn test_mark_from_hierarchy() {
        let mut tree = tree();
        let mut marker = ModalMarker::new();
        assert!(marker.mark(&mut tree, "toolbarH"));
        assert!(has(&tree, "toolbar", MODAL_CLASS));
        assert!(has(&tree, "dialog", IGNORED_CLASS));
        assert!(has(&tree, "okH", IGNORED_CLASS));
    }

    #[test]
    fn test_remark_clears_previous() {
        let mut tree = tree();
        let mut marker = ModalMarker::new();
        marker.mark(&mut tree, "dialog");
        marker.mark(&mut tree, "button");

        assert!(!has(&tree, "dialog", MODAL_CLASS));
        assert!(!has(&tree, "toolbar", IGNORED_CLASS));
        assert!(has(&tree, "button", MODAL_CLASS));
        assert!(has(&tree, "buttonH", MODAL_CLASS));
        assert_eq!(marker.current().len(), 2);
    }

    #[test]
    fn test_clear_restores_classes() {
        let pristine = tree();
        let mut tree = pristine.clone();
        let mut marker = ModalMarker::new();
        marker.mark(&mut tree, "toolbar");
        marker.clear(&mut tree);
        assert_eq!(tree, pristine);
        assert!(marker.current().is_empty());
    }

    #[test]
    fn test_unknown_view_is_noop() {
        let pristine = tree();
        let mut tree = pristine.clone();
        let mut marker = ModalMarker::new();
        assert!(!marker.mark(&mut tree, "missing"));
        assert_eq!(tree, pristine);
    }

    #[test]
    fn test_root_view_has_no_siblings() {
        let mut tree = tree();
        let mut marker = ModalMarker::new();
        assert!(marker.mark(&mut tree, "screen"));
        assert!(has(&tree, "screen", MODAL_CLASS));
        assert!(!has(&tree, "toolbar", IGNORED_CLASS));
    }

    #[test]
    fn test_class_attribute() {
        let mut tree = tree();
        let mut marker = ModalMarker::new();
        marker.mark(&mut tree, "dialog");
        let toolbar = tree.find("toolbar").unwrap();
        assert_eq!(tree.class_attribute(toolbar).as_deref(), Some("ignored"));
    }

    #[test]
    fn test_foreign_node_id_is_rejected() {
        let mut small = ViewTree::new();
        small.add_root("only");
        let big = tree();
        let foreign = big.find("okH").unwrap();

        assert!(small.get(foreign).is_none());
        assert!(!small.has_class(foreign, MODAL_CLASS));
        assert_eq!(small.class_attribute(foreign), None);
        assert_eq!(small.add_child(foreign, "orphan"), None);
        assert_eq!(small.find("orphan"), None);
    }

    #[test]
    fn test_from_outlines_matches_built_tree() {
        let outline = |suffix: &str| {
            ViewOutline::new(
                format!("screen{}", suffix),
                vec![
                    ViewOutline::new(
                        format!("toolbar{}", suffix),
                        vec![ViewOutline::leaf(format!("button{}", suffix))],
                    ),
                    ViewOutline::new(
                        format!("dialog{}", suffix),
                        vec![ViewOutline::leaf(format!("ok{}", suffix))],
                    ),
                ],
            )
        };
        assert_eq!(ViewTree::from_outlines(&[outline(""), outline("H")]), tree());
    }

    #[test]
    fn test_outline_from_json() {
        let outlines: Vec<ViewOutline> =
            serde_json::from_str(r#"[{ "id": "a", "children": [{ "id": "b" }, { "id": "c" }] }]"#)
                .unwrap();
        let mut tree = ViewTree::from_outlines(&outlines);
        let mut marker = ModalMarker::new();
        assert!(marker.mark(&mut tree, "b"));

        let classes = tree.class_attributes();
        let class_of = |id: &str| {
            classes
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.classes.as_str())
        };
        assert_eq!(class_of("a"), Some(""));
        assert_eq!(class_of("b"), Some("modal"));
        assert_eq!(class_of("c"), Some("ignored"));
    }
}
