//! Tab widget expansion.
//!
//! Hidden panes are revealed one tab at a time: for each selector button,
//! emit its label as a heading, activate it, wait for the host page to
//! settle, then extract the revealed pane. The pane snapshot is parsed as a
//! detached fragment, so nodes from a previous pane can never leak into the
//! next one.

use tracing::{debug, warn};

use crate::assets::{AssetFetcher, PendingAsset};
use crate::dom::{self, Selection};
use crate::error::{ExtractError, Result};
use crate::handlers;
use crate::markup::{self, ContentKind};
use crate::panel::TabPanel;

/// Serializes a tab widget into linear HTML by walking its tabs in order.
pub struct TabWidgetExpander<'a> {
    fetcher: &'a AssetFetcher,
}

impl<'a> TabWidgetExpander<'a> {
    /// An expander that fetches pane assets through `fetcher`.
    #[must_use]
    pub fn new(fetcher: &'a AssetFetcher) -> Self {
        Self { fetcher }
    }

    /// Expand one widget: per tab, an `<h3>` with the button label followed
    /// by the pane's extracted components.
    ///
    /// Pane components get no index-label prefix; chunk titles belong to the
    /// enclosing chunk, not to individual panes. A nested tab widget inside
    /// a pane is not expanded further: it is logged and skipped.
    pub async fn expand<P: TabPanel>(
        &self,
        panel: &mut P,
        out: &mut String,
        assets: &mut Vec<PendingAsset>,
    ) -> Result<()> {
        let labels = panel.choices()?;
        if labels.is_empty() {
            return Err(ExtractError::WidgetShape(
                "tab widget has no selector buttons".to_string(),
            ));
        }
        debug!(tabs = labels.len(), "expanding tab widget");

        for (index, label) in labels.iter().enumerate() {
            out.push_str(&format!("<h3>{}</h3>", dom::escape_text(label.trim())));

            panel.select(index).await?;
            panel.wait_until_settled().await?;

            let pane = dom::parse(&panel.current_content()?);
            for node in pane.select(markup::COMPONENTS).nodes() {
                let sel = Selection::from(*node);
                match markup::classify(&sel) {
                    ContentKind::TextBlock => {
                        handlers::handle_text_block(&sel, out, &mut None);
                    }
                    kind @ (ContentKind::Image | ContentKind::Graphic) => {
                        handlers::handle_media(&sel, kind, self.fetcher, assets, out);
                    }
                    ContentKind::CodeBlock => {
                        handlers::handle_code_block(&sel, out);
                    }
                    ContentKind::TabList => {
                        warn!(tab = %label, "nested tab widget inside a pane, skipping");
                    }
                    ContentKind::TabButtonLabel | ContentKind::Unsupported => {
                        debug!(
                            tag = dom::tag_name(&sel).unwrap_or_default(),
                            "pane component is not a relevant asset type"
                        );
                    }
                }
            }
        }

        Ok(())
    }
}
