//! Error types for offline-academy.
//!
//! Three focused enums, one per failure domain: structural extraction
//! failures abort the whole run, asset failures are per-item and only
//! logged, sink failures depend on what was being written.

use thiserror::Error;

/// Fatal, structural extraction errors.
///
/// Any of these means the page does not match the expected course-viewer
/// shape; extraction stops and no output is produced.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Breadcrumb titles or the `M.N` index label are absent or malformed.
    #[error("page metadata missing: {0}")]
    MissingMetadata(String),

    /// The content-chunk container was not found on the page.
    #[error("content chunk root not found")]
    MissingContentRoot,

    /// A chunk contained more than one tab widget.
    #[error("encountered multiple tablists in one chunk")]
    MultipleTabLists,

    /// A tab widget did not have the expected shape (missing buttons,
    /// missing content pane, or no panel driver available for it).
    #[error("unexpected tab widget shape: {0}")]
    WidgetShape(String),

    /// The base URI for asset resolution could not be parsed.
    #[error("invalid base URI: {0}")]
    BaseUri(#[from] url::ParseError),

    /// The HTTP client for asset fetching could not be built.
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
}

/// Per-asset errors. Recoverable: the asset is skipped, extraction and
/// save continue.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The resolved URI has no usable final path segment.
    #[error("invalid asset name, couldn't fetch: {uri}")]
    InvalidName { uri: String },

    /// Transport-level fetch failure.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status code.
    #[error("asset fetch failed with status {0}")]
    Http(u16),
}

/// Storage sink errors.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Underlying I/O failure.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Sink-specific failure (e.g. a handle that no longer exists).
    #[error("storage error: {0}")]
    Other(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
