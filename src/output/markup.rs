//! Comment markup to plain text
//!
//! Post comments arrive as HTML fragments (`<br>` line breaks, quote links,
//! escaped entities). The terminal and report output want plain text.

use scraper::{Html, Node};

/// Renders an HTML fragment as plain text
///
/// Text nodes are kept with entities decoded, `<br>` becomes a newline, and
/// every other tag is dropped.
pub fn to_plain_text(html: &str) -> String {
    if !html.contains('<') && !html.contains('&') {
        return html.to_string();
    }

    let fragment = Html::parse_fragment(html);
    let mut text = String::with_capacity(html.len());

    for node in fragment.root_element().descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(element) if element.name() == "br" => text.push('\n'),
            _ => {}
        }
    }

    text
}
