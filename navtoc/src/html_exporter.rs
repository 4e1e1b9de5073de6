//! HTML exporter for processed documents
//!
//! Serializes the document tree to a single HTML file: escaped text,
//! embedded CSS, and — when the ToC is dynamic — the small script that flips
//! the visibility classes on numbering spans when they are clicked.

use itertools::Itertools;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::document_tree::{DocumentTree, NodeId, RAW_HTML_TAG};
use crate::source_model::SourceDocument;
use crate::toc_config::TocConfig;

/// Errors that can occur during HTML export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Export a processed document to an HTML file
///
/// The ToC pass must already have run; this stage only serializes.
pub fn to_html(
    doc: &SourceDocument,
    config: &TocConfig,
    output_path: &Path,
) -> Result<(), ExportError> {
    let output = render_html(doc, config);

    // Write to file - create parent directories if they don't exist
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(output_path)?;
    file.write_all(output.as_bytes())?;

    Ok(())
}

/// Render a processed document to an HTML string
pub fn render_html(doc: &SourceDocument, config: &TocConfig) -> String {
    let mut output = String::new();
    let title = doc.title.as_deref().unwrap_or("Document");

    write_html_header(&mut output, title);

    output.push_str("<body>\n");
    for &child in doc.tree.children(doc.tree.root()) {
        write_node(&mut output, &doc.tree, child);
    }
    if config.dynamic {
        output.push_str("<script>\n");
        output.push_str(TOGGLE_SCRIPT);
        output.push_str("</script>\n");
    }
    output.push_str("</body>\n");
    output.push_str("</html>\n");

    output
}

/// Write HTML header with CSS styling
fn write_html_header(output: &mut String, title: &str) {
    output.push_str("<!DOCTYPE html>\n");
    output.push_str("<html lang=\"en\">\n");
    output.push_str("<head>\n");
    output.push_str("<meta charset=\"UTF-8\">\n");
    output.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    output.push_str("<style>\n");
    output.push_str(CSS_STYLES);
    output.push_str("</style>\n");
    output.push_str("</head>\n");
}

/// Write a single node and its subtree
fn write_node(output: &mut String, tree: &DocumentTree, node: NodeId) {
    // Raw nodes hold already rendered HTML and pass through verbatim.
    if tree.tag(node) == RAW_HTML_TAG {
        output.push_str(tree.text(node));
        return;
    }

    let tag = tree.tag(node);
    let attrs = tree
        .attrs(node)
        .map(|(name, value)| {
            if value.is_empty() {
                format!(" {}", name)
            } else {
                format!(" {}=\"{}\"", name, escape_html(value))
            }
        })
        .join("");

    if tree.children(node).is_empty() {
        output.push_str(&format!(
            "<{}{}>{}</{}>\n",
            tag,
            attrs,
            escape_html(tree.text(node)),
            tag
        ));
    } else {
        output.push_str(&format!("<{}{}>\n", tag, attrs));
        for &child in tree.children(node) {
            write_node(output, tree, child);
        }
        output.push_str(&format!("</{}>\n", tag));
    }
}

/// Escape HTML special characters
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Click handler flipping the visibility classes on numbering spans
const TOGGLE_SCRIPT: &str = r#"document.querySelectorAll('nav[role="doc-toc"] span.tocnumber').forEach((span) => {
    span.addEventListener('click', () => {
        span.className = span.className.split(' ').map((c) => {
            switch (c) {
                case 'tocvisible': return 'tochidden';
                case 'tochidden': return 'tocvisible';
                default: return c;
            }
        }).join(' ');
    });
});
"#;

/// Document styling, including the ToC visibility rules
const CSS_STYLES: &str = r#"
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto',
                 'Helvetica Neue', sans-serif;
    line-height: 1.6;
    color: #333;
    max-width: 900px;
    margin: 0 auto;
    padding: 40px 20px;
}

h1, h2, h3, h4, h5, h6 {
    color: #1a1a1a;
    font-weight: 600;
}

a {
    color: #0366d6;
    text-decoration: none;
}

a:hover {
    text-decoration: underline;
}

nav[role="doc-toc"] {
    border: 1px solid #e0e0e0;
    border-radius: 4px;
    padding: 16px 24px;
    margin: 24px 0;
    background-color: #f9f9f9;
}

nav[role="doc-toc"] ul {
    list-style: none;
    margin: 0;
    padding-left: 20px;
}

nav[role="doc-toc"] li {
    margin: 4px 0;
}

span.tocnumber {
    color: #0066cc;
    font-weight: 600;
    margin-right: 4px;
}

span.tocvisible,
span.tochidden {
    cursor: pointer;
    user-select: none;
}

span.tochidden ~ ul {
    display: none;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_model::parse_document;
    use crate::toc::extract_and_render;

    fn processed(content: &str, config: &TocConfig) -> SourceDocument {
        let mut doc = parse_document(content);
        let root = doc.content_root();
        let target = doc.ensure_toc_target();
        extract_and_render(
            &mut doc.tree,
            root,
            target,
            &config.extract_options(),
            &config.render_options(),
        );
        doc
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<div>"), "&lt;div&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_rendered_document_contains_nav_and_links() {
        let config = TocConfig::default();
        let doc = processed("# Title\n\n## Part one\n\n## Part two\n", &config);
        let html = render_html(&doc, &config);

        assert!(html.contains("<nav role=\"doc-toc\">"));
        assert!(html.contains("href=\"#section_1\""));
        assert!(html.contains("href=\"#section_1.2\""));
        assert!(html.contains("<title>Title</title>"));
        // No dynamic mode, no script.
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_dynamic_mode_embeds_toggle_script() {
        let mut config = TocConfig::default();
        config.dynamic = true;
        let doc = processed("## A\n\n### B\n", &config);
        let html = render_html(&doc, &config);

        assert!(html.contains("<script>"));
        assert!(html.contains("tocvisible"));
    }

    #[test]
    fn test_raw_html_passes_through_unescaped() {
        let config = TocConfig::default();
        let doc = processed("## A\n\nplain *styled* text\n", &config);
        let html = render_html(&doc, &config);

        assert!(html.contains("<em>styled</em>"));
    }

    #[test]
    fn test_heading_text_is_escaped() {
        let config = TocConfig::default();
        let doc = processed("## Fish & chips\n", &config);
        let html = render_html(&doc, &config);

        assert!(html.contains("1. Fish &amp; chips"));
    }

    #[test]
    fn test_presence_attributes_serialize_bare() {
        let config = TocConfig::default();
        let doc = processed("## Hidden {data-tochidden}\n", &config);
        let html = render_html(&doc, &config);

        // The marker mirrors onto the section; the heading carries the
        // generated anchor.
        assert!(html.contains("<section data-tochidden>"));
        assert!(html.contains("<h2 data-tochidden id=\"section_1\">"));
    }

    #[test]
    fn test_to_html_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("doc.html");

        let config = TocConfig::default();
        let doc = processed("## A\n", &config);
        to_html(&doc, &config, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
    }
}
