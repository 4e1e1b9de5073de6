//! Table-of-contents core: outline extraction and rendering
//!
//! The two halves collaborate through the [`TocEntry`] forest: the extractor
//! walks the document tree and produces it (mutating source ids and heading
//! text as a side effect), the renderer turns it into a nested link list
//! under a target node. Everything else — configuration resolution, markdown
//! parsing, HTML serialization — lives outside this module.

mod entry;
mod extract;
mod render;

pub use entry::{NumberingPath, TocEntry};
pub use extract::{extract, ExtractOptions, Strategy};
pub use render::{render, toggle_visibility, RenderOptions, Visibility};

use crate::document_tree::{DocumentTree, NodeId};

/// Attribute excluding an element from traversal entirely
pub const ATTR_NOTOC: &str = "data-notoc";
/// Attribute marking an element as collapsed by default in dynamic mode
pub const ATTR_TOCHIDDEN: &str = "data-tochidden";
/// Anchor identifier attribute; read if present and non-empty, written if absent
pub const ATTR_ID: &str = "id";
/// Container tag the section strategy follows
pub const TAG_SECTION: &str = "section";

/// Class on every rendered numbering span
pub const CLASS_NUMBER: &str = "tocnumber";
/// State class on an expanded non-leaf entry
pub const CLASS_VISIBLE: &str = "tocvisible";
/// State class on a collapsed non-leaf entry
pub const CLASS_HIDDEN: &str = "tochidden";

/// Run one full extract-and-render pass
///
/// Walks the tree below `root`, attaches the resulting link list under
/// `target`, and returns whether any entry was produced so the caller can
/// decide if the target counts as populated.
pub fn extract_and_render(
    tree: &mut DocumentTree,
    root: NodeId,
    target: NodeId,
    extract_options: &ExtractOptions,
    render_options: &RenderOptions,
) -> bool {
    let entries = extract(tree, root, extract_options);
    render(tree, target, &entries, render_options)
}
