//! In-memory element tree for the document under processing
//!
//! The ToC core only needs a small capability set from the host document:
//! child enumeration, attribute get/set, and text get/set. This module
//! provides that as an index-addressed arena so trees can be built by hand
//! in tests and assembled from parsed markdown in the pipeline.

use std::collections::BTreeMap;

/// Pseudo-tag for nodes whose text is emitted verbatim by the exporter
///
/// Flow content between headings is carried through the tree as already
/// rendered HTML; the `#` keeps it out of the real element namespace.
pub const RAW_HTML_TAG: &str = "#html";

/// Handle to a node inside a [`DocumentTree`]
///
/// Plain index, cheap to copy. Only valid for the tree that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A single element node
#[derive(Debug)]
struct Node {
    /// Element tag name (e.g. "section", "h2", "ul")
    tag: String,
    /// Attributes, kept ordered for deterministic serialization
    attrs: BTreeMap<String, String>,
    /// Own text content (headings, links, spans carry their text here)
    text: String,
    /// Child nodes in document order
    children: Vec<NodeId>,
    /// Parent node, `None` for the root
    parent: Option<NodeId>,
}

/// Arena-backed element tree
///
/// Nodes are created detached with [`DocumentTree::create_element`] and wired
/// up with [`DocumentTree::append_child`]. The root element is created by
/// [`DocumentTree::new`] and cannot be detached.
#[derive(Debug)]
pub struct DocumentTree {
    nodes: Vec<Node>,
}

impl DocumentTree {
    /// Create a tree holding a single root element with the given tag
    pub fn new(root_tag: &str) -> Self {
        let root = Node {
            tag: root_tag.to_string(),
            attrs: BTreeMap::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
        };
        Self { nodes: vec![root] }
    }

    /// The root element
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a new detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
        });
        id
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.0].parent.is_none(), "node already attached");
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert `child` among the children of `parent` at `index`
    ///
    /// An index at or past the end appends.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        debug_assert!(self.nodes[child.0].parent.is_none(), "node already attached");
        self.nodes[child.0].parent = Some(parent);
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
    }

    /// Tag name of a node
    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].tag
    }

    /// Attribute value, `None` if the attribute is absent
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0].attrs.get(name).map(String::as_str)
    }

    /// Whether the attribute is present (an empty value still counts)
    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.nodes[id.0].attrs.contains_key(name)
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        self.nodes[id.0].attrs.insert(name.to_string(), value.into());
    }

    /// Iterate over a node's attributes in stored order
    pub fn attrs(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> {
        self.nodes[id.0]
            .attrs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Own text content of a node
    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    /// Replace the own text content of a node
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        self.nodes[id.0].text = text.into();
    }

    /// Children of a node in document order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Parent of a node, `None` for the root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Heading rank for `h1`..`h6` tags, `None` for anything else
    pub fn heading_rank(&self, id: NodeId) -> Option<u8> {
        match self.tag(id) {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }

    /// All descendants of `id` in document (preorder) order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in &self.nodes[id.0].children {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    /// First descendant with the given tag, in document order
    pub fn find_first(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(root).into_iter().find(|&n| self.tag(n) == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_navigate() {
        let mut tree = DocumentTree::new("body");
        let section = tree.create_element("section");
        let heading = tree.create_element("h2");
        tree.set_text(heading, "Overview");
        tree.append_child(tree.root(), section);
        tree.append_child(section, heading);

        assert_eq!(tree.children(tree.root()), &[section]);
        assert_eq!(tree.children(section), &[heading]);
        assert_eq!(tree.parent(heading), Some(section));
        assert_eq!(tree.text(heading), "Overview");
        assert_eq!(tree.tag(section), "section");
    }

    #[test]
    fn test_attributes() {
        let mut tree = DocumentTree::new("body");
        let section = tree.create_element("section");
        tree.append_child(tree.root(), section);

        assert_eq!(tree.attr(section, "id"), None);
        assert!(!tree.has_attr(section, "data-notoc"));

        tree.set_attr(section, "id", "intro");
        tree.set_attr(section, "data-notoc", "");
        assert_eq!(tree.attr(section, "id"), Some("intro"));
        assert!(tree.has_attr(section, "data-notoc"));

        tree.set_attr(section, "id", "renamed");
        assert_eq!(tree.attr(section, "id"), Some("renamed"));
    }

    #[test]
    fn test_heading_rank() {
        let mut tree = DocumentTree::new("body");
        let h1 = tree.create_element("h1");
        let h6 = tree.create_element("h6");
        let p = tree.create_element("p");
        assert_eq!(tree.heading_rank(h1), Some(1));
        assert_eq!(tree.heading_rank(h6), Some(6));
        assert_eq!(tree.heading_rank(p), None);
    }

    #[test]
    fn test_descendants_preorder() {
        let mut tree = DocumentTree::new("body");
        let a = tree.create_element("section");
        let a1 = tree.create_element("h2");
        let a2 = tree.create_element("section");
        let a2x = tree.create_element("h3");
        let b = tree.create_element("section");
        tree.append_child(tree.root(), a);
        tree.append_child(a, a1);
        tree.append_child(a, a2);
        tree.append_child(a2, a2x);
        tree.append_child(tree.root(), b);

        assert_eq!(tree.descendants(tree.root()), vec![a, a1, a2, a2x, b]);
    }

    #[test]
    fn test_insert_child_prepends() {
        let mut tree = DocumentTree::new("body");
        let first = tree.create_element("section");
        let nav = tree.create_element("nav");
        tree.append_child(tree.root(), first);
        tree.insert_child(tree.root(), 0, nav);
        assert_eq!(tree.children(tree.root()), &[nav, first]);
    }

    #[test]
    fn test_find_first() {
        let mut tree = DocumentTree::new("body");
        let div = tree.create_element("div");
        let main = tree.create_element("main");
        tree.append_child(tree.root(), div);
        tree.append_child(div, main);
        assert_eq!(tree.find_first(tree.root(), "main"), Some(main));
        assert_eq!(tree.find_first(tree.root(), "nav"), None);
    }
}
