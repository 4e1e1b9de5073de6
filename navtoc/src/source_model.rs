//! Source model for the parsing stage
//!
//! Stage 1 of the pipeline turns a markdown document into the element tree
//! the ToC core operates on, together with whatever the document itself
//! declared about its ToC: the placement marker's nav element and its
//! attribute map.

use std::collections::BTreeMap;

// Submodules
mod parser;
mod toc_marker;

// Re-export public surface
pub use parser::parse_document;
pub use toc_marker::parse as parse_toc_marker;

use crate::document_tree::{DocumentTree, NodeId};

/// A parsed source document
#[derive(Debug)]
pub struct SourceDocument {
    /// Element tree rooted at a `body` element
    pub tree: DocumentTree,

    /// The nav element created for the document's toc marker, if any
    pub toc_target: Option<NodeId>,

    /// Declarative ToC options from the marker (empty without a marker)
    pub toc_attributes: BTreeMap<String, String>,

    /// Document title from the first rank-1 heading
    pub title: Option<String>,
}

impl SourceDocument {
    /// The extraction root: the first `main` element if present, else body
    pub fn content_root(&self) -> NodeId {
        self.tree
            .find_first(self.tree.root(), "main")
            .unwrap_or_else(|| self.tree.root())
    }

    /// The nav the ToC should be rendered into, creating one as the first
    /// child of the body when the document carries no marker
    pub fn ensure_toc_target(&mut self) -> NodeId {
        if let Some(nav) = self.toc_target {
            return nav;
        }
        let nav = self.tree.create_element("nav");
        self.tree.set_attr(nav, "role", "doc-toc");
        let root = self.tree.root();
        self.tree.insert_child(root, 0, nav);
        self.toc_target = Some(nav);
        nav
    }
}
