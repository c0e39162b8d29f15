//! DOM operations adapter.
//!
//! Thin helpers over the `dom_query` crate so the extraction pipeline reads
//! in terms of the operations it actually performs on the course-viewer DOM.

pub use dom_query::{Document, NodeId, Selection};
pub use tendril::StrTendril;

/// Parse an HTML string (full page or fragment) into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Get tag name (lowercase).
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}

/// Get element ID attribute.
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get any attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Set an attribute value.
#[inline]
pub fn set_attribute(sel: &Selection, name: &str, value: &str) {
    sel.set_attr(name, value);
}

/// All text content of node and descendants, as a zero-copy tendril.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Outer HTML of the selection.
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

/// Direct element children of the first node of a selection, in document
/// order.
#[must_use]
pub fn element_children<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.nodes().first().map_or_else(Vec::new, |node| {
        node.children()
            .into_iter()
            .filter(dom_query::NodeRef::is_element)
            .map(Selection::from)
            .collect()
    })
}

/// First element child, if any.
#[must_use]
pub fn first_element_child<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    element_children(sel).into_iter().next()
}

/// Deep-clone an element into its own document.
///
/// The clone is selectable via `body > *` on the returned document, the
/// usual trick for working on fragments without touching the source tree.
#[must_use]
pub fn clone_element(sel: &Selection) -> Document {
    Document::from(outer_html(sel).to_string())
}

/// Check whether a node is a strict descendant of the node with the given
/// id, by walking its ancestor chain.
#[must_use]
pub fn is_descendant_of(sel: &Selection, ancestor: NodeId) -> bool {
    let Some(node) = sel.nodes().first() else {
        return false;
    };
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.id == ancestor {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Escape text for safe embedding in HTML output.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
