//! DOM node abstraction used by text reconstruction
//!
//! Traversal code is written against [`DomNode`] so it can run over a parsed
//! `scraper` document in production and over hand-built trees in tests.

use scraper::{ElementRef, Node};

/// Layout category of a node, as far as line breaking is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    /// Starts and ends on its own line
    Block,
    /// Flows with surrounding text
    Inline,
    /// Not rendered at all
    None,
}

/// Minimal view of a DOM node
pub trait DomNode: Sized {
    /// Text content when this is a text node, `None` for elements
    fn text(&self) -> Option<&str>;

    /// Child nodes in document order
    fn children(&self) -> Vec<Self>;

    /// Layout category of this node
    fn display(&self) -> Display;
}

/// A node of a parsed `scraper` document
#[derive(Debug, Clone, Copy)]
pub enum HtmlNode<'a> {
    Element(ElementRef<'a>),
    Text(&'a str),
}

impl<'a> From<ElementRef<'a>> for HtmlNode<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        Self::Element(element)
    }
}

impl<'a> DomNode for HtmlNode<'a> {
    fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(*text),
            Self::Element(_) => None,
        }
    }

    fn children(&self) -> Vec<Self> {
        let Self::Element(element) = self else {
            return Vec::new();
        };

        element
            .children()
            .filter_map(|child| match child.value() {
                Node::Text(text) => Some(HtmlNode::Text(&**text)),
                Node::Element(_) => ElementRef::wrap(child).map(HtmlNode::Element),
                _ => None,
            })
            .collect()
    }

    fn display(&self) -> Display {
        match self {
            Self::Text(_) => Display::Inline,
            Self::Element(element) => element_display(
                element.value().name(),
                element.value().attr("style"),
            ),
        }
    }
}

/// Elements laid out as blocks by default browser stylesheets
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "dd", "details", "dialog", "div",
    "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "header", "hgroup", "hr", "html", "li", "main", "nav", "ol", "p", "pre",
    "section", "summary", "table", "tr", "ul",
];

/// Elements never rendered
const HIDDEN_TAGS: &[&str] = &[
    "head", "link", "meta", "noscript", "script", "style", "template", "title",
];

/// Computes the display category of an element from its tag and inline style
///
/// An inline `display:` declaration wins over the tag default.
pub fn element_display(tag: &str, style: Option<&str>) -> Display {
    if let Some(display) = style.and_then(inline_display) {
        return display;
    }

    let tag = tag.to_ascii_lowercase();
    if HIDDEN_TAGS.contains(&tag.as_str()) {
        Display::None
    } else if BLOCK_TAGS.contains(&tag.as_str()) {
        Display::Block
    } else {
        Display::Inline
    }
}

/// Reads the last `display` declaration of an inline style attribute
fn inline_display(style: &str) -> Option<Display> {
    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .filter(|(property, _)| property.trim().eq_ignore_ascii_case("display"))
        .map(|(_, value)| {
            let value = value.trim().trim_end_matches("!important").trim();
            match value.to_ascii_lowercase().as_str() {
                "none" => Display::None,
                "inline" | "inline-block" | "inline-flex" | "contents" => Display::Inline,
                _ => Display::Block,
            }
        })
        .last()
}
