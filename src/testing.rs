//! Scripted fakes for tab-widget tests.
//!
//! A [`ScriptedPanel`] replays pre-captured pane HTML per tab, letting
//! extraction tests exercise the full expansion path without a live page.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;

use crate::error::{ExtractError, Result};
use crate::panel::{PanelProvider, TabPanel};

/// A record of one call made to a scripted panel, for ordering assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCall {
    /// `choices()` was read.
    Choices,
    /// `select(index)` was issued.
    Select(usize),
    /// `current_content()` was read.
    Content,
}

/// A fake tab widget that replays scripted pane content.
pub struct ScriptedPanel {
    tabs: Vec<(String, String)>,
    selected: Option<usize>,
    calls: Rc<RefCell<Vec<PanelCall>>>,
}

impl ScriptedPanel {
    /// An empty panel; add tabs with [`Self::with_tab`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            selected: None,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Add one tab: its button label and the pane HTML revealed on select.
    #[must_use]
    pub fn with_tab(mut self, label: impl Into<String>, pane_html: impl Into<String>) -> Self {
        self.tabs.push((label.into(), pane_html.into()));
        self
    }

    /// Shared handle to the call log, usable after the panel is consumed.
    #[must_use]
    pub fn call_log(&self) -> Rc<RefCell<Vec<PanelCall>>> {
        Rc::clone(&self.calls)
    }
}

impl Default for ScriptedPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl TabPanel for ScriptedPanel {
    fn choices(&self) -> Result<Vec<String>> {
        self.calls.borrow_mut().push(PanelCall::Choices);
        Ok(self.tabs.iter().map(|(label, _)| label.clone()).collect())
    }

    async fn select(&mut self, index: usize) -> Result<()> {
        self.calls.borrow_mut().push(PanelCall::Select(index));
        if index >= self.tabs.len() {
            return Err(ExtractError::WidgetShape(format!(
                "no tab button at index {index}"
            )));
        }
        self.selected = Some(index);
        Ok(())
    }

    fn current_content(&self) -> Result<String> {
        self.calls.borrow_mut().push(PanelCall::Content);
        let index = self.selected.ok_or_else(|| {
            ExtractError::WidgetShape("content pane read before any selection".to_string())
        })?;
        self.tabs.get(index).map(|(_, html)| html.clone()).ok_or_else(|| {
            ExtractError::WidgetShape("selected pane is absent".to_string())
        })
    }
}

/// Provider mapping widget ids to scripted panels. Each panel is consumed
/// by the first `open` for its id.
#[derive(Default)]
pub struct ScriptedPanels {
    panels: HashMap<String, ScriptedPanel>,
}

impl ScriptedPanels {
    /// An empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the panel for a widget id.
    #[must_use]
    pub fn with_panel(mut self, widget_id: impl Into<String>, panel: ScriptedPanel) -> Self {
        self.panels.insert(widget_id.into(), panel);
        self
    }
}

#[async_trait(?Send)]
impl PanelProvider for ScriptedPanels {
    type Panel = ScriptedPanel;

    async fn open(&mut self, widget_id: &str) -> Result<Self::Panel> {
        self.panels.remove(widget_id).ok_or_else(|| {
            ExtractError::WidgetShape(format!("no scripted panel for widget {widget_id:?}"))
        })
    }
}
