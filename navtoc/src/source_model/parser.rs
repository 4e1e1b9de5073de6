//! Markdown event stream parser
//!
//! Converts pulldown-cmark's event stream into the document tree the ToC
//! core operates on. Each heading of rank r opens a `section` element nested
//! under the nearest open section of lower rank, mirroring how sectioned
//! documents are authored; flow content between headings is rendered to HTML
//! and carried through as raw-text nodes. A `<!-- toc -->` comment becomes
//! the `nav` element the rendered ToC is attached to.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::collections::BTreeMap;

use super::toc_marker;
use super::SourceDocument;
use crate::document_tree::{DocumentTree, NodeId, RAW_HTML_TAG};
use crate::toc::{ATTR_ID, ATTR_NOTOC, ATTR_TOCHIDDEN, TAG_SECTION};

/// Parse a markdown document into a [`SourceDocument`]
///
/// Parsing never fails: malformed markdown simply produces less structure,
/// matching the degrade-gracefully contract of the ToC pass itself.
pub fn parse_document(content: &str) -> SourceDocument {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    let parser = Parser::new_ext(content, options);

    let mut state = ParserState::new();
    for event in parser {
        state.process_event(event);
    }
    state.finish()
}

/// Parser state for converting markdown events into the document tree
struct ParserState<'a> {
    /// The tree being built, rooted at a `body` element
    tree: DocumentTree,

    /// Stack of open sections as (heading rank, section node)
    open_sections: Vec<(u8, NodeId)>,

    /// Events buffered for the current run of flow content
    pending: Vec<Event<'a>>,

    /// Heading currently being collected, if any
    heading: Option<HeadingBuilder>,

    /// The nav element created for the first toc marker
    toc_target: Option<NodeId>,

    /// Attributes carried by the toc marker
    toc_attributes: BTreeMap<String, String>,

    /// Document title, taken from the first rank-1 heading
    title: Option<String>,
}

/// Collects one heading while its events stream by
struct HeadingBuilder {
    rank: u8,
    text: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

impl<'a> ParserState<'a> {
    fn new() -> Self {
        Self {
            tree: DocumentTree::new("body"),
            open_sections: Vec::new(),
            pending: Vec::new(),
            heading: None,
            toc_target: None,
            toc_attributes: BTreeMap::new(),
            title: None,
        }
    }

    /// The element new content currently belongs to
    fn current_container(&self) -> NodeId {
        self.open_sections
            .last()
            .map(|&(_, id)| id)
            .unwrap_or_else(|| self.tree.root())
    }

    fn process_event(&mut self, event: Event<'a>) {
        match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                // Content seen so far belongs to the still-open section.
                self.flush_pending();
                self.heading = Some(HeadingBuilder {
                    rank: heading_rank(level),
                    text: String::new(),
                    id: id.map(|s| s.to_string()),
                    classes: classes.iter().map(|s| s.to_string()).collect(),
                    attrs: attrs
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.as_ref().map(|v| v.to_string())))
                        .collect(),
                });
            }
            Event::End(TagEnd::Heading(_)) => self.close_heading(),

            Event::Text(text) => {
                if let Some(heading) = self.heading.as_mut() {
                    heading.text.push_str(&text);
                } else {
                    self.pending.push(Event::Text(text));
                }
            }
            Event::Code(code) => {
                if let Some(heading) = self.heading.as_mut() {
                    heading.text.push_str(&code);
                } else {
                    self.pending.push(Event::Code(code));
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(heading) = self.heading.as_mut() {
                    heading.text.push(' ');
                } else {
                    self.pending.push(event);
                }
            }

            Event::Html(html) => match toc_marker::parse(&html) {
                Some(attrs) => self.place_toc_marker(attrs),
                None => self.pending.push(Event::Html(html)),
            },

            other => {
                // Inline formatting inside a heading is flattened to plain
                // text; the Text events still arrive above.
                if self.heading.is_none() {
                    self.pending.push(other);
                }
            }
        }
    }

    /// Close the heading being collected and open its section
    fn close_heading(&mut self) {
        let Some(builder) = self.heading.take() else {
            return;
        };

        // Pop sections that cannot contain this rank.
        while let Some(&(open_rank, _)) = self.open_sections.last() {
            if open_rank >= builder.rank {
                self.open_sections.pop();
            } else {
                break;
            }
        }

        let parent = self.current_container();
        let section = self.tree.create_element(TAG_SECTION);
        self.tree.append_child(parent, section);

        let heading = self.tree.create_element(&format!("h{}", builder.rank));
        self.tree.set_text(heading, builder.text.clone());
        if let Some(id) = builder.id.filter(|id| !id.is_empty()) {
            self.tree.set_attr(heading, ATTR_ID, id);
        }
        if !builder.classes.is_empty() {
            self.tree
                .set_attr(heading, "class", builder.classes.join(" "));
        }
        for (name, value) in &builder.attrs {
            let value = value.clone().unwrap_or_default();
            self.tree.set_attr(heading, name, value.clone());
            // The traversal markers apply to the outline node as a whole, so
            // they are mirrored onto the enclosing container for the
            // section-based strategy.
            if name == ATTR_NOTOC || name == ATTR_TOCHIDDEN {
                self.tree.set_attr(section, name, value);
            }
        }
        self.tree.append_child(section, heading);

        if self.title.is_none() && builder.rank == 1 {
            self.title = Some(builder.text);
        }
        self.open_sections.push((builder.rank, section));
    }

    /// Materialize the nav element for a toc marker
    fn place_toc_marker(&mut self, attrs: BTreeMap<String, String>) {
        if self.toc_target.is_some() {
            log::warn!("ignoring additional toc marker; the first one wins");
            return;
        }
        self.flush_pending();
        let nav = self.tree.create_element("nav");
        self.tree.set_attr(nav, "role", "doc-toc");
        let parent = self.current_container();
        self.tree.append_child(parent, nav);
        self.toc_target = Some(nav);
        self.toc_attributes = attrs;
    }

    /// Render buffered flow content to HTML and attach it as a raw node
    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, self.pending.drain(..));
        if html.trim().is_empty() {
            return;
        }
        let node = self.tree.create_element(RAW_HTML_TAG);
        self.tree.set_text(node, html);
        let parent = self.current_container();
        self.tree.append_child(parent, node);
    }

    fn finish(mut self) -> SourceDocument {
        self.flush_pending();
        SourceDocument {
            tree: self.tree,
            toc_target: self.toc_target,
            toc_attributes: self.toc_attributes,
            title: self.title,
        }
    }
}

/// Numeric rank of a pulldown heading level
fn heading_rank(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
