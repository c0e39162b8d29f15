//! # offline-academy
//!
//! Extracts a course section from a live course-viewer page into a clean,
//! self-contained HTML document plus its media assets, for offline reading.
//!
//! The viewer renders a section as a sequence of content chunks: text
//! blocks, images, vector graphics, code listings, and interactive tab
//! widgets whose panes exist in the DOM only while selected. Extraction
//! walks the chunks in document order, linearizes each into plain HTML
//! (expanding tab widgets pane by pane), starts asset fetches as their
//! references are discovered, and finally writes the document and assets
//! in a fixed module/section directory layout.
//!
//! ## Quick Start
//!
//! ```no_run
//! use offline_academy::{extract_section, save_section, DirectorySink};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let html = std::fs::read_to_string("section.html")?;
//! let result = extract_section(&html, "https://academy.example/course/3/2").await?;
//!
//! let sink = DirectorySink::new("export");
//! let report = save_section(result, &sink).await?;
//! println!("assets written: {}", report.assets_written);
//! # Ok(())
//! # }
//! ```
//!
//! Pages carrying tab widgets need a live panel driver; supply one through
//! [`PanelProvider`] and [`SectionExtractor::extract`]. The convenience
//! [`extract_section`] uses [`NoTabSupport`] and fails structurally when it
//! meets a tab widget, rather than silently dropping hidden panes.

mod error;
mod handlers;
mod options;
mod result;
mod save;

/// Asset fetching: eager, collected, settled as a batch.
pub mod assets;

/// DOM operations adapter.
pub mod dom;

/// Course-viewer markup catalog and content classification.
pub mod markup;

/// Section metadata parsing (breadcrumb titles, `M.N` index label).
pub mod metadata;

/// Interactive content panel capability.
pub mod panel;

/// Section extraction: the chunk scan and linearization.
pub mod section;

/// Storage sinks for the exported document and assets.
pub mod sink;

/// Tab widget expansion.
pub mod tabs;

/// Scripted fakes for tab-widget tests.
pub mod testing;

// Public API - re-exports
pub use assets::{AssetFetcher, AssetPayload, PendingAsset, SettledAsset};
pub use error::{AssetError, ExtractError, Result, SinkError};
pub use metadata::SectionMetadata;
pub use options::Options;
pub use panel::{NoTabSupport, PanelProvider, TabPanel};
pub use result::{ExtractionResult, SaveReport};
pub use save::{sanitize_component, save_section};
pub use section::SectionExtractor;
pub use sink::{DirectorySink, MemorySink, StorageSink};
pub use tabs::TabWidgetExpander;

use url::Url;

/// Extracts a section from page HTML using default options and no tab
/// widget support.
///
/// `base_uri` is the page's own URI, used to resolve relative asset
/// references. The returned result still carries its asset fetches
/// unsettled; pass it to [`save_section`] to await and persist them.
#[allow(clippy::missing_errors_doc)]
pub async fn extract_section(html: &str, base_uri: &str) -> Result<ExtractionResult> {
    extract_section_with_options(html, base_uri, &Options::default()).await
}

/// Extracts a section from page HTML with custom fetch options and no tab
/// widget support.
#[allow(clippy::missing_errors_doc)]
pub async fn extract_section_with_options(
    html: &str,
    base_uri: &str,
    options: &Options,
) -> Result<ExtractionResult> {
    let base = Url::parse(base_uri)?;
    let fetcher = AssetFetcher::from_options(base, options)?;
    let doc = dom::parse(html);
    SectionExtractor::new(fetcher)
        .extract(&doc, &mut NoTabSupport)
        .await
}
