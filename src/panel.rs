//! Interactive content panel capability.
//!
//! A tab widget only keeps the selected pane's content in the readable DOM;
//! revealing each pane requires an interaction-shaped selection event and a
//! wait for the host page's own rendering. That live, host-mutated surface
//! is isolated behind [`TabPanel`] so the expansion algorithm never depends
//! on a specific UI toolkit's reactivity quirks and can be tested against a
//! scripted fake.
//!
//! Everything here is deliberately `?Send`: the whole pipeline runs
//! single-threaded and cooperative, and real panel drivers typically hold
//! non-`Send` page handles.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ExtractError, Result};
use crate::markup;

/// Fixed wait inserted after a simulated tab selection when the pane still
/// shows a loading marker, to tolerate asynchronous host-page rendering.
pub const SETTLE_DELAY: Duration = Duration::from_millis(800);

/// One tab widget, driven through simulated user selection.
#[async_trait(?Send)]
pub trait TabPanel {
    /// Selector-button labels in their displayed order.
    fn choices(&self) -> Result<Vec<String>>;

    /// Activate the button at `index`, as a user selection would.
    ///
    /// Activation destructively replaces the current pane; any content read
    /// from the previous pane must be finished before calling this.
    async fn select(&mut self, index: usize) -> Result<()>;

    /// Inner HTML of the widget's current content pane.
    fn current_content(&self) -> Result<String>;

    /// Wait for the host page to finish rendering the selected pane.
    ///
    /// Default policy: if the pane shows a loading or media-loading marker,
    /// suspend for the fixed [`SETTLE_DELAY`]; otherwise return right away.
    async fn wait_until_settled(&mut self) -> Result<()> {
        if markup::has_loading_marker(&self.current_content()?) {
            tokio::time::sleep(SETTLE_DELAY).await;
        }
        Ok(())
    }
}

/// Supplies a [`TabPanel`] for each tab widget discovered during a scan.
///
/// `widget_id` is the tablist element's `id` attribute, falling back to the
/// enclosing chunk's `id` when the element has none.
#[async_trait(?Send)]
pub trait PanelProvider {
    /// The panel type produced by this provider.
    type Panel: TabPanel;

    /// Open a panel for the widget, or fail structurally if it cannot be
    /// driven.
    async fn open(&mut self, widget_id: &str) -> Result<Self::Panel>;
}

/// Provider for pages that are expected to carry no tab widgets.
///
/// Encountering a tablist with this provider is a structural error: the
/// snapshot cannot reveal hidden panes, so the extraction must fail rather
/// than silently drop content.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTabSupport;

/// Panel type of [`NoTabSupport`]; never instantiated.
pub enum NeverPanel {}

#[async_trait(?Send)]
impl TabPanel for NeverPanel {
    fn choices(&self) -> Result<Vec<String>> {
        match *self {}
    }

    async fn select(&mut self, _index: usize) -> Result<()> {
        match *self {}
    }

    fn current_content(&self) -> Result<String> {
        match *self {}
    }
}

#[async_trait(?Send)]
impl PanelProvider for NoTabSupport {
    type Panel = NeverPanel;

    async fn open(&mut self, widget_id: &str) -> Result<Self::Panel> {
        Err(ExtractError::WidgetShape(format!(
            "page contains a tab widget ({widget_id:?}) but no panel driver was supplied"
        )))
    }
}
