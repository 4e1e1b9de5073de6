//! Outline extraction
//!
//! Walks the document tree from a designated root and produces the ordered
//! forest of [`TocEntry`] values. Two discovery strategies exist: the
//! container strategy follows the nesting of `section` elements, the heading
//! strategy infers nesting from the heading-rank sequence alone. Exactly one
//! runs per invocation.
//!
//! Extraction has a required side effect on the source tree: every
//! contributing element ends up with a resolved `id`, and when numbering is
//! enabled the heading text is rewritten in place with its dotted path.
//! Re-running over an already-processed tree reuses every id but prefixes the
//! heading text again; callers that re-extract must start from a fresh tree.

use std::iter::Peekable;

use crate::document_tree::{DocumentTree, NodeId};
use crate::toc::entry::{NumberingPath, TocEntry};
use crate::toc::{ATTR_ID, ATTR_NOTOC, ATTR_TOCHIDDEN, TAG_SECTION};

/// Hierarchy discovery strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Infer nesting from the document-order heading-rank sequence
    #[default]
    Headings,
    /// Follow the nesting of `section` container elements
    Sections,
}

/// Parameters for one extraction pass
#[derive(Debug, Clone)]
pub struct ExtractOptions<'a> {
    /// Prefix for synthesized identifiers
    pub id_prefix: &'a str,
    /// Whether to inject dotted numbering into heading text
    pub numbering: bool,
    /// Maximum outline depth; 0 or negative means unlimited
    pub max_depth: i32,
    /// Discovery strategy
    pub strategy: Strategy,
}

/// Extract the outline forest below `root`
///
/// Returns entries in depth-first document order. Anomalies degrade to
/// producing fewer entries, never to an error.
pub fn extract(tree: &mut DocumentTree, root: NodeId, options: &ExtractOptions) -> Vec<TocEntry> {
    match options.strategy {
        Strategy::Sections => sections_below(tree, root, &NumberingPath::empty(), options),
        Strategy::Headings => {
            let mut headings = ranked_headings(tree, root).into_iter().peekable();
            heading_level(tree, &mut headings, &NumberingPath::empty(), 0, options)
        }
    }
}

/// Whether an entry at `depth` would exceed the configured limit
fn depth_exceeded(options: &ExtractOptions, depth: usize) -> bool {
    options.max_depth > 0 && depth > options.max_depth as usize
}

/// Container strategy: collect the direct `section` children of `current`
///
/// The numbering counter starts at 1 per level and only advances for
/// containers that contribute an entry, so skipped containers leave no gaps.
fn sections_below(
    tree: &mut DocumentTree,
    current: NodeId,
    parents: &NumberingPath,
    options: &ExtractOptions,
) -> Vec<TocEntry> {
    // The limit is evaluated per recursive call; siblings above are unaffected.
    if depth_exceeded(options, parents.depth() + 1) {
        return Vec::new();
    }

    let mut entries = Vec::new();
    let mut num = 0u32;

    for child in tree.children(current).to_vec() {
        if tree.tag(child) != TAG_SECTION {
            continue;
        }
        // Opt-out marker, checked before anything else.
        if tree.has_attr(child, ATTR_NOTOC) {
            continue;
        }
        // A container without a direct-child heading contributes nothing and
        // is not descended into; its nested sections stay invisible.
        let Some(heading) = tree
            .children(child)
            .iter()
            .copied()
            .find(|&n| tree.heading_rank(n).is_some())
        else {
            continue;
        };

        num += 1;
        let path = parents.child(num);
        let entry = capture_entry(tree, child, heading, path.clone(), options);
        let children = sections_below(tree, child, &path, options);
        entries.push(TocEntry { children, ..entry });
    }

    entries
}

/// Resolve the id, snapshot the label, and apply the numbering rewrite
///
/// `id_holder` is the element that carries `id`, `data-notoc` and
/// `data-tochidden` (the container in the section strategy, the heading
/// itself in the heading strategy).
fn capture_entry(
    tree: &mut DocumentTree,
    id_holder: NodeId,
    heading: NodeId,
    path: NumberingPath,
    options: &ExtractOptions,
) -> TocEntry {
    let target_id = match tree.attr(id_holder, ATTR_ID) {
        Some(existing) if !existing.is_empty() => existing.to_string(),
        _ => {
            let generated = format!("{}_{}", options.id_prefix, path);
            tree.set_attr(id_holder, ATTR_ID, generated.clone());
            generated
        }
    };

    let original = tree.text(heading).to_string();
    let label = if options.numbering {
        tree.set_text(heading, format!("{}. {}", path, original));
        // The path is now baked into the document heading; the leading space
        // lets the renderer prepend its own numbering span without doubling it.
        format!(" {}", original)
    } else {
        original
    };

    TocEntry {
        target_id,
        label,
        start_hidden: tree.has_attr(id_holder, ATTR_TOCHIDDEN),
        numbering: path,
        children: Vec::new(),
    }
}

/// Flattened document-order sequence of ranked headings below `root`,
/// excluding opted-out ones
fn ranked_headings(tree: &DocumentTree, root: NodeId) -> Vec<(u8, NodeId)> {
    tree.descendants(root)
        .into_iter()
        .filter(|&n| !tree.has_attr(n, ATTR_NOTOC))
        .filter_map(|n| tree.heading_rank(n).map(|rank| (rank, n)))
        .collect()
}

/// Heading strategy: consume one sibling level from the heading sequence
///
/// The level is anchored at the rank of its first heading. A strictly deeper
/// heading opens a child level under the entry just produced; a heading at or
/// above `parent_rank` returns control to the caller. A heading shallower
/// than the level's anchor but still below the parent continues the same
/// sibling level, counter carried forward.
fn heading_level(
    tree: &mut DocumentTree,
    headings: &mut Peekable<std::vec::IntoIter<(u8, NodeId)>>,
    parents: &NumberingPath,
    parent_rank: u8,
    options: &ExtractOptions,
) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut num = 0u32;

    let mut level_rank = match headings.peek() {
        Some(&(rank, _)) if rank > parent_rank => rank,
        _ => return entries,
    };

    while let Some(&(rank, heading)) = headings.peek() {
        if rank <= parent_rank {
            break;
        }
        if rank < level_rank {
            level_rank = rank;
        }

        headings.next();
        num += 1;
        let path = parents.child(num);
        let entry = capture_entry(tree, heading, heading, path.clone(), options);

        let children = match headings.peek() {
            Some(&(next_rank, _)) if next_rank > level_rank => {
                if depth_exceeded(options, path.depth() + 1) {
                    // Consume the too-deep run without emitting, so the next
                    // shallower heading lands at the right level.
                    skip_below(headings, level_rank);
                    Vec::new()
                } else {
                    heading_level(tree, headings, &path, level_rank, options)
                }
            }
            _ => Vec::new(),
        };

        entries.push(TocEntry { children, ..entry });
    }

    entries
}

/// Drop headings strictly deeper than `rank_limit`
fn skip_below(headings: &mut Peekable<std::vec::IntoIter<(u8, NodeId)>>, rank_limit: u8) {
    while let Some(&(rank, _)) = headings.peek() {
        if rank <= rank_limit {
            break;
        }
        headings.next();
    }
}
