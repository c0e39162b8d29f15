//! Section extraction.
//!
//! The scan walks the chunks of the page's content root in document order
//! and linearizes each one: text blocks cloned child by child, media turned
//! into local-asset placeholders, code kept verbatim, and at most one tab
//! widget per chunk expanded in place. Metadata is parsed first so a broken
//! page fails before any asset fetch starts.

use tracing::{debug, info, warn};

use crate::assets::{AssetFetcher, PendingAsset};
use crate::dom::{self, Document, Selection};
use crate::error::{ExtractError, Result};
use crate::handlers;
use crate::markup::{self, ClaimedRegion, ContentKind};
use crate::metadata;
use crate::panel::PanelProvider;
use crate::result::ExtractionResult;
use crate::tabs::TabWidgetExpander;

/// Placeholder emitted for a heading chunk that has no element to clone.
const MISSING_HEADER: &str = "<h1>&lt;Missing section header&gt;</h1>";

/// Extracts one course section from a live page DOM.
pub struct SectionExtractor {
    fetcher: AssetFetcher,
}

impl SectionExtractor {
    /// An extractor that resolves and fetches assets through `fetcher`.
    #[must_use]
    pub fn new(fetcher: AssetFetcher) -> Self {
        Self { fetcher }
    }

    /// The fetcher assets are resolved through.
    #[must_use]
    pub fn fetcher(&self) -> &AssetFetcher {
        &self.fetcher
    }

    /// Extract the section: metadata, then every chunk of the content root.
    ///
    /// Asset fetches start as their references are discovered; the returned
    /// result carries them unsettled so the caller can await the whole batch
    /// once, at save time.
    pub async fn extract<P: PanelProvider>(
        &self,
        doc: &Document,
        panels: &mut P,
    ) -> Result<ExtractionResult> {
        let metadata = metadata::parse_section_metadata(doc)?;
        info!(
            module = metadata.module_index,
            section = metadata.section_index,
            title = %metadata.section_title,
            "extracting section"
        );

        let roots = doc.select(markup::CONTENT_CHUNKS);
        let root_nodes = roots.nodes();
        let Some(root_node) = root_nodes.first() else {
            return Err(ExtractError::MissingContentRoot);
        };
        if root_nodes.len() > 1 {
            warn!("multiple content-chunk roots on page, using the first");
        }
        let root = Selection::from(*root_node);

        let mut document_html = String::new();
        let mut assets = Vec::new();

        let chunks = dom::element_children(&root);
        let chunk_count = chunks.len();
        for chunk in chunks {
            document_html.push_str(&self.extract_chunk(&chunk, panels, &mut assets).await?);
        }

        info!(
            chunks = chunk_count,
            assets = assets.len(),
            "section extracted"
        );

        Ok(ExtractionResult {
            document_html,
            assets,
            metadata,
        })
    }

    /// Linearize one chunk.
    ///
    /// A chunk without a content container carries only the section heading:
    /// its first element child is cloned verbatim (or a placeholder heading
    /// is emitted). A content chunk becomes a `<div>` keeping the chunk's
    /// `id`, holding its components in document order with the tab widget,
    /// if any, expanded where it stood.
    async fn extract_chunk<P: PanelProvider>(
        &self,
        chunk: &Selection<'_>,
        panels: &mut P,
        assets: &mut Vec<PendingAsset>,
    ) -> Result<String> {
        let chunk_id = dom::id(chunk);
        debug!(chunk = chunk_id.as_deref().unwrap_or(""), "scanning chunk");

        let container = chunk.select(markup::CHUNK_CONTAINER);
        if !container.exists() {
            return Ok(match dom::first_element_child(chunk) {
                Some(header) => dom::outer_html(&header).to_string(),
                None => {
                    warn!("heading chunk has no element to clone");
                    MISSING_HEADER.to_string()
                }
            });
        }

        let label = dom::text_content(&container.select(markup::INDEX_LABEL))
            .trim()
            .to_string();
        let mut title_prefix = (!label.is_empty()).then(|| label.clone());

        let components = container.select(markup::COMPONENTS);

        // First pass: find the chunk's tab widget. A second one is fatal;
        // the output format has no way to represent it faithfully.
        let mut region: Option<ClaimedRegion> = None;
        for node in components.nodes() {
            let sel = Selection::from(*node);
            if markup::classify(&sel) != ContentKind::TabList {
                continue;
            }
            if region.is_some() {
                return Err(ExtractError::MultipleTabLists);
            }
            region = ClaimedRegion::claim(&sel);
        }

        // Second pass: emit. Components after the tab widget land in a
        // separate buffer so expansion output stays at the widget's place.
        let mut before = String::new();
        let mut after = String::new();
        let mut past_widget = false;

        for node in components.nodes() {
            let sel = Selection::from(*node);
            if region.as_ref().is_some_and(|r| r.contains(&sel)) {
                debug!("component lives inside the tab widget, already handled");
                continue;
            }

            let kind = markup::classify(&sel);
            if kind == ContentKind::TabList {
                let widget_id = dom::id(&sel)
                    .or_else(|| chunk_id.clone())
                    .unwrap_or_default();
                let mut panel = panels.open(&widget_id).await?;
                TabWidgetExpander::new(&self.fetcher)
                    .expand(&mut panel, &mut before, assets)
                    .await?;
                past_widget = true;
                continue;
            }

            let out = if past_widget { &mut after } else { &mut before };
            match kind {
                ContentKind::TextBlock => {
                    handlers::handle_text_block(&sel, out, &mut title_prefix);
                }
                ContentKind::Image | ContentKind::Graphic => {
                    handlers::handle_media(&sel, kind, &self.fetcher, assets, out);
                }
                ContentKind::CodeBlock => {
                    handlers::handle_code_block(&sel, out);
                }
                ContentKind::TabButtonLabel => {
                    debug!("skipping tab button label outside its widget");
                }
                ContentKind::TabList | ContentKind::Unsupported => {
                    debug!(
                        tag = dom::tag_name(&sel).unwrap_or_default(),
                        "component is not a relevant asset type"
                    );
                }
            }
        }

        let mut html = match &chunk_id {
            Some(id) => format!(r#"<div id="{}">"#, dom::escape_text(id)),
            None => "<div>".to_string(),
        };
        html.push_str(&before);
        html.push_str(&after);
        html.push_str("</div>");
        Ok(html)
    }
}
