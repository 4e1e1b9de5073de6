//! Outline rendering
//!
//! Converts the extracted forest into a nested list of links under a target
//! node: one `ul` per level, one `li` per entry holding an optional
//! `span.tocnumber` and an `a` pointing at the entry's anchor. In dynamic
//! mode the numbering span of a non-leaf entry doubles as the collapse
//! toggle and carries the visibility state as a class.

use crate::document_tree::{DocumentTree, NodeId};
use crate::toc::entry::TocEntry;
use crate::toc::{CLASS_HIDDEN, CLASS_NUMBER, CLASS_VISIBLE};

/// Parameters for one render pass
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Whether numbering labels carry the dotted path text
    pub numbering: bool,
    /// Whether non-leaf entries get collapse/expand affordances
    pub dynamic: bool,
}

/// Collapse state of a non-leaf entry in dynamic mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Children shown
    Visible,
    /// Children collapsed
    Hidden,
}

impl Visibility {
    /// The state after one toggle interaction
    pub fn toggled(self) -> Self {
        match self {
            Visibility::Visible => Visibility::Hidden,
            Visibility::Hidden => Visibility::Visible,
        }
    }

    /// Class token carrying this state on the rendered span
    pub fn class_name(self) -> &'static str {
        match self {
            Visibility::Visible => CLASS_VISIBLE,
            Visibility::Hidden => CLASS_HIDDEN,
        }
    }
}

/// Render the outline forest as a nested link list under `target`
///
/// Returns whether anything was produced. An empty forest creates no
/// structure at all, so an unused target stays empty rather than holding an
/// empty list.
pub fn render(
    tree: &mut DocumentTree,
    target: NodeId,
    entries: &[TocEntry],
    options: &RenderOptions,
) -> bool {
    if entries.is_empty() {
        return false;
    }
    render_list(tree, target, entries, options);
    true
}

fn render_list(
    tree: &mut DocumentTree,
    parent: NodeId,
    entries: &[TocEntry],
    options: &RenderOptions,
) {
    let list = tree.create_element("ul");
    tree.append_child(parent, list);

    for entry in entries {
        let item = tree.create_element("li");

        // In dynamic mode the span is materialized even with numbering
        // display off: it is the click target, just without path text.
        let number_label = if options.numbering || options.dynamic {
            let span = tree.create_element("span");
            tree.set_attr(span, "class", CLASS_NUMBER);
            if options.numbering {
                tree.set_text(span, format!("{}.", entry.numbering));
            }
            tree.append_child(item, span);
            Some(span)
        } else {
            None
        };

        let link = tree.create_element("a");
        tree.set_attr(link, "href", format!("#{}", entry.target_id));
        tree.set_text(link, entry.label.clone());
        tree.append_child(item, link);

        if !entry.children.is_empty() {
            // Children first, affordance after: the nested list must exist
            // before the item's toggle state is finalized.
            render_list(tree, item, &entry.children, options);
            if options.dynamic {
                if let Some(span) = number_label {
                    let state = if entry.start_hidden {
                        Visibility::Hidden
                    } else {
                        Visibility::Visible
                    };
                    tree.set_attr(
                        span,
                        "class",
                        format!("{} {}", CLASS_NUMBER, state.class_name()),
                    );
                }
            }
        }

        tree.append_child(list, item);
    }
}

/// Flip the visibility state carried on a rendered numbering span
///
/// String-based class rewrite, invoked by the host's event layer when the
/// span is clicked. Tokens other than the two state classes pass through
/// untouched; a span without a state token (a leaf entry) is left unchanged.
pub fn toggle_visibility(tree: &mut DocumentTree, span: NodeId) {
    let Some(class) = tree.attr(span, "class") else {
        return;
    };
    let flipped = class
        .split_whitespace()
        .map(|token| {
            if token == CLASS_VISIBLE {
                CLASS_HIDDEN
            } else if token == CLASS_HIDDEN {
                CLASS_VISIBLE
            } else {
                token
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    tree.set_attr(span, "class", flipped);
}
