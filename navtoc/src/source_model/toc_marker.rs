//! ToC placement marker
//!
//! A document opts into ToC placement with an HTML comment of the form
//! `<!-- toc -->`, optionally carrying the declarative options:
//! `<!-- toc prefix="sec" max_depth="2" dynamic -->`. Values may be quoted
//! or bare; an attribute without a value is a presence flag.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)^\s*<!--\s*toc\b(.*?)-->\s*$").expect("valid regex"))
}

fn attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([A-Za-z_][A-Za-z0-9_-]*)(?:\s*=\s*"([^"]*)"|\s*=\s*([^\s"]+))?"#)
            .expect("valid regex")
    })
}

/// Parse an HTML block as a toc marker
///
/// Returns the attribute map when the block is a toc comment (possibly with
/// no attributes at all), `None` for any other content.
pub fn parse(html: &str) -> Option<BTreeMap<String, String>> {
    let caps = marker_re().captures(html)?;
    let raw = caps.get(1).map_or("", |m| m.as_str());

    let mut attrs = BTreeMap::new();
    for cap in attr_re().captures_iter(raw) {
        let name = cap[1].to_string();
        let value = cap
            .get(2)
            .or_else(|| cap.get(3))
            .map_or(String::new(), |m| m.as_str().to_string());
        attrs.insert(name, value);
    }
    Some(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_marker() {
        let attrs = parse("<!-- toc -->").unwrap();
        assert!(attrs.is_empty());
        assert!(parse("<!--toc-->\n").unwrap().is_empty());
    }

    #[test]
    fn test_marker_with_attributes() {
        let attrs = parse(r#"<!-- toc prefix="sec" max_depth="2" dynamic -->"#).unwrap();
        assert_eq!(attrs.get("prefix").map(String::as_str), Some("sec"));
        assert_eq!(attrs.get("max_depth").map(String::as_str), Some("2"));
        assert_eq!(attrs.get("dynamic").map(String::as_str), Some(""));
    }

    #[test]
    fn test_unquoted_value() {
        let attrs = parse("<!-- toc max_depth=3 -->").unwrap();
        assert_eq!(attrs.get("max_depth").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_non_marker_content() {
        assert!(parse("<!-- a plain comment -->").is_none());
        assert!(parse("<!-- tocless -->").is_none());
        assert!(parse("<div>toc</div>").is_none());
        assert!(parse("regular text").is_none());
    }

    #[test]
    fn test_marker_must_stand_alone() {
        assert!(parse("text before <!-- toc -->").is_none());
    }
}
