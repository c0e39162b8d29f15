//! Course-viewer markup catalog and content classification.
//!
//! Classification is attribute- and tag-driven against the fixed markup of
//! the target course viewer, not general heuristics. The selectors and
//! class markers below are the whole site-specific surface of the crate;
//! everything else operates on the kinds produced here.

use crate::dom::{self, NodeId, Selection};

/// Selector for the page's single content-chunk container.
pub const CONTENT_CHUNKS: &str = ".content-chunks";

/// Selector for a chunk's content container. A chunk without one is a
/// section-heading-only chunk.
pub const CHUNK_CONTAINER: &str = ".container";

/// Selector for the `M.N` display-index label of a chunk.
pub const INDEX_LABEL: &str = ".current-li";

/// Selector for the breadcrumb entries carrying module and section title.
pub const BREADCRUMB_ITEMS: &str = ".breadcrumb > li:not(.home)";

/// Class marker for text content blocks.
pub const TEXT_ASSET_CLASS: &str = "text-asset";

/// Class marker for tab-button labels. These are always skipped; their text
/// is emitted by the tab expander as headings instead.
pub const BUTTON_LABEL_CLASS: &str = "button-label";

/// All classifiable descendants of a chunk container, in document order.
pub const COMPONENTS: &str = r#".text-asset, div[role="tablist"], img, svg, code"#;

/// Markers the host page shows while a tab pane is still rendering.
pub const LOADING_MARKERS: &str = ".loading-indicator, .media-loading";

/// Name of the asset subdirectory next to the exported document.
pub const ASSETS_DIR_NAME: &str = "assets";

/// Relative path prefix used on emitted `<img>` placeholders.
pub const ASSET_BASE_PATH: &str = "./assets/";

/// The fixed set of content kinds a chunk component can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// A text content block (`text-asset` marker, not a button label).
    TextBlock,
    /// A raster image (`<img>`), asset referenced by `src`.
    Image,
    /// A vector graphic (`<svg>`), asset referenced by `data-src`.
    Graphic,
    /// A code listing (`<code>`), cloned verbatim.
    CodeBlock,
    /// The root of an interactive tab widget (`role="tablist"`).
    TabList,
    /// A tab-button label; never emitted as a block.
    TabButtonLabel,
    /// Anything else (quizzes, decorative wrappers, ...); silently skipped.
    Unsupported,
}

/// Classify a single DOM node against the course viewer's fixed markup.
#[must_use]
pub fn classify(sel: &Selection) -> ContentKind {
    if has_class(sel, BUTTON_LABEL_CLASS) {
        return ContentKind::TabButtonLabel;
    }
    if has_class(sel, TEXT_ASSET_CLASS) {
        return ContentKind::TextBlock;
    }
    if dom::get_attribute(sel, "role").as_deref() == Some("tablist") {
        return ContentKind::TabList;
    }
    match dom::tag_name(sel).as_deref() {
        Some("img") => ContentKind::Image,
        Some("svg") => ContentKind::Graphic,
        Some("code") => ContentKind::CodeBlock,
        _ => ContentKind::Unsupported,
    }
}

/// Check whether an element carries a class token.
#[must_use]
pub fn has_class(sel: &Selection, token: &str) -> bool {
    sel.attr("class")
        .is_some_and(|classes| classes.split_whitespace().any(|c| c == token))
}

/// The subtree claimed by a tab widget within a chunk.
///
/// Once a tablist is recognized, every later component that lives inside
/// its subtree is already handled (the tab expander produces it) and must
/// be excluded from direct extraction. At most one claimed region per
/// chunk is legal.
#[derive(Debug, Clone, Copy)]
pub struct ClaimedRegion {
    root: NodeId,
}

impl ClaimedRegion {
    /// Claim the subtree rooted at the given tablist element.
    #[must_use]
    pub fn claim(tablist: &Selection) -> Option<Self> {
        tablist.nodes().first().map(|node| Self { root: node.id })
    }

    /// True if the node is a strict descendant of the claimed subtree.
    #[must_use]
    pub fn contains(&self, sel: &Selection) -> bool {
        dom::is_descendant_of(sel, self.root)
    }
}

/// Check a pane fragment for a loading indicator the host page shows while
/// content is still rendering.
#[must_use]
pub fn has_loading_marker(pane_html: &str) -> bool {
    let doc = dom::parse(pane_html);
    doc.select(LOADING_MARKERS).exists()
}
