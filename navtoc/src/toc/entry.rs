//! Outline entry and numbering path types

use std::fmt;

/// Position of an entry in the outline hierarchy
///
/// One component per ancestor level plus the entry itself, so `[1, 2, 3]`
/// displays as "1.2.3". Root-level entries have a single component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingPath {
    /// Number components (e.g., [1, 2, 3] for "1.2.3")
    pub parts: Vec<u32>,
}

impl NumberingPath {
    /// Empty path, the starting accumulator for extraction
    pub fn empty() -> Self {
        Self { parts: Vec::new() }
    }

    /// Path extended by one more sibling number
    pub fn child(&self, number: u32) -> Self {
        let mut parts = self.parts.clone();
        parts.push(number);
        Self { parts }
    }

    /// Nesting depth; root-level paths have depth 1
    pub fn depth(&self) -> usize {
        self.parts.len()
    }
}

impl fmt::Display for NumberingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self
            .parts
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", s)
    }
}

/// One node of the extracted outline
///
/// Built fresh on every extraction pass and discarded once rendered; entries
/// have no identity across runs.
#[derive(Debug, Clone)]
pub struct TocEntry {
    /// Anchor identifier of the source element this entry points to
    pub target_id: String,
    /// Visible link text, snapshot of the heading at extraction time
    pub label: String,
    /// Position in the hierarchy
    pub numbering: NumberingPath,
    /// Whether the entry starts collapsed in dynamic mode
    pub start_hidden: bool,
    /// Child entries in document order
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    /// Depth of this entry; equals the numbering path length
    pub fn depth(&self) -> usize {
        self.numbering.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering_path_display() {
        assert_eq!(NumberingPath::empty().child(1).to_string(), "1");
        assert_eq!(
            NumberingPath::empty().child(1).child(2).child(3).to_string(),
            "1.2.3"
        );
    }

    #[test]
    fn test_numbering_path_depth() {
        let path = NumberingPath::empty().child(2).child(1);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.parts, vec![2, 1]);
    }

    #[test]
    fn test_child_does_not_mutate_parent() {
        let parent = NumberingPath::empty().child(1);
        let child = parent.child(4);
        assert_eq!(parent.parts, vec![1]);
        assert_eq!(child.parts, vec![1, 4]);
    }
}
