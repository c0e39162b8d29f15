//! Persisting an extraction result.
//!
//! Layout: `<module_index>_<module_title>/` holds the document as
//! `<module_index>_<section_index>_<section_title>.html` next to an
//! `assets/` subdirectory with every successfully fetched asset. A failed
//! asset is logged and skipped; the document and the remaining assets are
//! written regardless.

use futures::future::join_all;
use tracing::{info, warn};

use crate::assets::PendingAsset;
use crate::error::SinkError;
use crate::markup;
use crate::result::{ExtractionResult, SaveReport};
use crate::sink::StorageSink;

/// Write the document and its settled assets through the sink.
///
/// All collected fetches are awaited as one batch first; a per-asset
/// failure — fetch or write — reduces the report, never the save. Only
/// the document write and directory creation are fatal. Assets sharing a
/// derived name overwrite each other, last write wins.
pub async fn save_section<S: StorageSink>(
    result: ExtractionResult,
    sink: &S,
) -> Result<SaveReport, SinkError> {
    let ExtractionResult {
        document_html,
        assets,
        metadata,
    } = result;

    let settled = join_all(assets.into_iter().map(PendingAsset::settle)).await;

    let module_dir_name = format!(
        "{}_{}",
        metadata.module_index,
        sanitize_component(&metadata.module_title)
    );
    let document_name = format!(
        "{}_{}_{}.html",
        metadata.module_index,
        metadata.section_index,
        sanitize_component(&metadata.section_title)
    );

    let module_dir = sink.dir(None, &module_dir_name).await?;

    let document = format!("<html><body>{document_html}</body></html>");
    sink.write_file(&module_dir, &document_name, document.as_bytes())
        .await?;

    let assets_dir = sink.dir(Some(&module_dir), markup::ASSETS_DIR_NAME).await?;

    let mut report = SaveReport::default();
    for asset in settled {
        match asset.outcome {
            Ok(payload) => {
                match sink
                    .write_file(&assets_dir, &payload.name, &payload.data)
                    .await
                {
                    Ok(()) => report.assets_written += 1,
                    Err(error) => {
                        warn!(name = %payload.name, %error, "asset write failed, skipping");
                        report.assets_failed += 1;
                    }
                }
            }
            Err(error) => {
                warn!(
                    name = asset.name.as_deref().unwrap_or("<unnamed>"),
                    %error,
                    "asset fetch failed, skipping"
                );
                report.assets_failed += 1;
            }
        }
    }

    info!(
        document = %document_name,
        written = report.assets_written,
        failed = report.assets_failed,
        "section saved"
    );
    Ok(report)
}

/// Make a title safe as a single path component: whitespace runs become
/// `_`, path separators become `-`.
#[must_use]
pub fn sanitize_component(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(['/', '\\'], "-")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::assets::{AssetPayload, PendingAsset};
    use crate::error::AssetError;
    use crate::metadata::SectionMetadata;
    use crate::sink::MemorySink;

    fn metadata() -> SectionMetadata {
        SectionMetadata {
            module_index: 3,
            module_title: "Module Two".to_string(),
            section_index: 2,
            section_title: "Getting Started".to_string(),
        }
    }

    fn payload(name: &str, data: &[u8]) -> PendingAsset {
        PendingAsset::resolved(AssetPayload {
            name: name.to_string(),
            data: data.to_vec(),
        })
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component("Getting Started"), "Getting_Started");
        assert_eq!(sanitize_component("  a \t b  "), "a_b");
        assert_eq!(sanitize_component("TCP/IP \\ Basics"), "TCP-IP_-_Basics");
    }

    #[tokio::test]
    async fn test_save_layout_and_naming() {
        let sink = MemorySink::new();
        let result = ExtractionResult {
            document_html: "<p>body</p>".to_string(),
            assets: vec![payload("a.png", &[1])],
            metadata: metadata(),
        };

        let report = save_section(result, &sink).await.unwrap();
        assert_eq!(report, SaveReport { assets_written: 1, assets_failed: 0 });

        let files = sink.files();
        let doc = files.get("3_Module_Two/3_2_Getting_Started.html");
        assert_eq!(
            doc.map(|d| String::from_utf8_lossy(d).into_owned()).as_deref(),
            Some("<html><body><p>body</p></body></html>")
        );
        assert!(files.contains_key("3_Module_Two/assets/a.png"));
    }

    #[tokio::test]
    async fn test_failed_assets_are_skipped_not_fatal() {
        let sink = MemorySink::new();
        let result = ExtractionResult {
            document_html: String::new(),
            assets: vec![
                payload("ok.png", &[1]),
                PendingAsset::failed(Some("gone.png".to_string()), AssetError::Http(404)),
                PendingAsset::failed(None, AssetError::InvalidName { uri: "x/".to_string() }),
                payload("also.png", &[2]),
            ],
            metadata: metadata(),
        };

        let report = save_section(result, &sink).await.unwrap();
        assert_eq!(report, SaveReport { assets_written: 2, assets_failed: 2 });

        let files = sink.files();
        assert!(files.contains_key("3_Module_Two/assets/ok.png"));
        assert!(files.contains_key("3_Module_Two/assets/also.png"));
        assert!(!files.keys().any(|k| k.contains("gone.png")));
    }

    /// Sink that rejects writes for one file name; everything else goes to
    /// an inner [`MemorySink`].
    struct FullDiskSink {
        inner: MemorySink,
        fail_name: String,
    }

    #[async_trait::async_trait(?Send)]
    impl StorageSink for FullDiskSink {
        type Dir = String;

        async fn dir(&self, parent: Option<&String>, name: &str) -> Result<String, SinkError> {
            self.inner.dir(parent, name).await
        }

        async fn write_file(
            &self,
            dir: &String,
            name: &str,
            data: &[u8],
        ) -> Result<(), SinkError> {
            if name == self.fail_name {
                return Err(SinkError::Other(format!("disk full writing {name}")));
            }
            self.inner.write_file(dir, name, data).await
        }
    }

    #[tokio::test]
    async fn test_failed_asset_write_skips_only_that_asset() {
        let sink = FullDiskSink {
            inner: MemorySink::new(),
            fail_name: "a.png".to_string(),
        };
        let result = ExtractionResult {
            document_html: "<p>body</p>".to_string(),
            assets: vec![payload("a.png", &[1]), payload("b.png", &[2])],
            metadata: metadata(),
        };

        let report = save_section(result, &sink).await.unwrap();
        assert_eq!(report, SaveReport { assets_written: 1, assets_failed: 1 });

        let files = sink.inner.files();
        assert!(files.contains_key("3_Module_Two/3_2_Getting_Started.html"));
        assert!(files.contains_key("3_Module_Two/assets/b.png"));
        assert!(!files.keys().any(|k| k.contains("a.png")));
    }

    #[tokio::test]
    async fn test_colliding_asset_names_last_write_wins() {
        let sink = MemorySink::new();
        let result = ExtractionResult {
            document_html: String::new(),
            assets: vec![payload("img.png", &[1]), payload("img.png", &[2])],
            metadata: metadata(),
        };

        let report = save_section(result, &sink).await.unwrap();
        assert_eq!(report.assets_written, 2);
        assert_eq!(sink.files().get("3_Module_Two/assets/img.png"), Some(&vec![2]));
    }
}
