//! Extraction and save outcomes.

use crate::assets::PendingAsset;
use crate::metadata::SectionMetadata;

/// Everything one extraction run produces: the assembled document, the
/// asset fetches still in flight, and the identity used to name output.
#[derive(Debug)]
pub struct ExtractionResult {
    /// Linearized section body, ready to be wrapped in a document envelope.
    pub document_html: String,
    /// Asset fetches collected during the scan, in discovery order.
    pub assets: Vec<PendingAsset>,
    /// Module/section identity parsed from the page.
    pub metadata: SectionMetadata,
}

/// Tally of a save: the document itself is always written or the save
/// fails, so only assets are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveReport {
    /// Assets written to the assets directory.
    pub assets_written: usize,
    /// Assets skipped because their fetch or write failed.
    pub assets_failed: usize,
}
