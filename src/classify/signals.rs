//! On-page signal extraction
//!
//! Pulls the handful of facts the checklist looks at out of an HTML document:
//! title, meta description, canonical link, robots directive and the number
//! of visible words.

use scraper::{node::Node, ElementRef, Html, Selector};

/// Elements whose text never counts as visible
const HIDDEN_TEXT_ELEMENTS: &[&str] = &["script", "style", "template"];

/// Facts extracted from one HTML document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSignals {
    /// Trimmed text of the first `<title>`, if non-empty
    pub title: Option<String>,

    /// `content` of the first `<meta name="description">`, if not blank
    pub meta_description: Option<String>,

    /// `href` of the first `<link rel="canonical">`
    ///
    /// `Some("")` means the element exists without an href.
    pub canonical: Option<String>,

    /// True if the first `<meta name="robots">` contains "noindex"
    pub noindex: bool,

    /// Whitespace-separated tokens of visible text
    pub word_count: usize,
}

/// Extracts page signals from an HTML document
pub fn extract_signals(html: &str) -> PageSignals {
    let document = Html::parse_document(html);

    let title = first_match(&document, "title")
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty());

    let meta_description = first_match(&document, r#"meta[name="description"]"#)
        .and_then(|element| element.value().attr("content"))
        .filter(|content| !content.trim().is_empty())
        .map(str::to_string);

    let canonical = first_match(&document, r#"link[rel~="canonical"]"#)
        .map(|element| element.value().attr("href").unwrap_or_default().to_string());

    let noindex = first_match(&document, r#"meta[name="robots"]"#)
        .and_then(|element| element.value().attr("content"))
        .is_some_and(|content| content.to_lowercase().contains("noindex"));

    PageSignals {
        title,
        meta_description,
        canonical,
        noindex,
        word_count: count_visible_words(&document),
    }
}

fn first_match<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

/// Counts visible words in a parsed document
///
/// Every text node counts except those below a script, style or template
/// element. Comments are separate nodes and never count.
pub fn count_visible_words(document: &Html) -> usize {
    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => {
                let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
                    Node::Element(element) => HIDDEN_TEXT_ELEMENTS.contains(&element.name()),
                    _ => false,
                });
                (!hidden).then(|| text.split_whitespace().count())
            }
            _ => None,
        })
        .sum()
}
