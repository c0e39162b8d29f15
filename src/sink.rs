//! Storage abstraction for exported sections.
//!
//! The export layout is two levels deep (module directory, then document
//! plus an assets subdirectory), so the sink surface is just "make a
//! directory, write a file into it". [`DirectorySink`] writes to the local
//! filesystem; [`MemorySink`] captures writes for tests.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::SinkError;

/// Destination for an exported section and its assets.
#[async_trait(?Send)]
pub trait StorageSink {
    /// Handle to a created directory.
    type Dir;

    /// Create (or reuse) a directory named `name` under `parent`, or under
    /// the sink root when `parent` is `None`.
    async fn dir(&self, parent: Option<&Self::Dir>, name: &str) -> Result<Self::Dir, SinkError>;

    /// Write a file into a directory, replacing any previous content.
    async fn write_file(&self, dir: &Self::Dir, name: &str, data: &[u8])
        -> Result<(), SinkError>;
}

/// Sink writing into a root directory on the local filesystem.
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// A sink rooted at `root`. The root itself is created on first use.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait(?Send)]
impl StorageSink for DirectorySink {
    type Dir = PathBuf;

    async fn dir(&self, parent: Option<&PathBuf>, name: &str) -> Result<PathBuf, SinkError> {
        let path = parent.unwrap_or(&self.root).join(name);
        tokio::fs::create_dir_all(&path).await?;
        Ok(path)
    }

    async fn write_file(&self, dir: &PathBuf, name: &str, data: &[u8]) -> Result<(), SinkError> {
        tokio::fs::write(dir.join(name), data).await?;
        Ok(())
    }
}

/// In-memory sink recording every write, keyed by `dir/name` path.
#[derive(Default)]
pub struct MemorySink {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemorySink {
    /// An empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    #[must_use]
    pub fn files(&self) -> BTreeMap<String, Vec<u8>> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait(?Send)]
impl StorageSink for MemorySink {
    type Dir = String;

    async fn dir(&self, parent: Option<&String>, name: &str) -> Result<String, SinkError> {
        Ok(match parent {
            Some(parent) => format!("{parent}/{name}"),
            None => name.to_string(),
        })
    }

    async fn write_file(&self, dir: &String, name: &str, data: &[u8]) -> Result<(), SinkError> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(format!("{dir}/{name}"), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn test_memory_sink_records_paths() {
        let sink = MemorySink::new();
        let module = sink.dir(None, "3_Module").await.unwrap();
        let assets = sink.dir(Some(&module), "assets").await.unwrap();
        sink.write_file(&module, "doc.html", b"<p>x</p>").await.unwrap();
        sink.write_file(&assets, "a.png", &[1, 2]).await.unwrap();

        let files = sink.files();
        assert_eq!(files.get("3_Module/doc.html").map(Vec::as_slice), Some(b"<p>x</p>".as_slice()));
        assert_eq!(files.get("3_Module/assets/a.png").map(Vec::as_slice), Some([1, 2].as_slice()));
    }

    #[tokio::test]
    async fn test_memory_sink_last_write_wins() {
        let sink = MemorySink::new();
        let dir = sink.dir(None, "d").await.unwrap();
        sink.write_file(&dir, "a.bin", &[1]).await.unwrap();
        sink.write_file(&dir, "a.bin", &[2]).await.unwrap();

        assert_eq!(sink.files().get("d/a.bin"), Some(&vec![2]));
    }

    #[tokio::test]
    async fn test_directory_sink_round_trip() {
        let root = std::env::temp_dir().join(format!("sink-test-{}", std::process::id()));
        let sink = DirectorySink::new(&root);

        let module = sink.dir(None, "1_Mod").await.unwrap();
        sink.write_file(&module, "doc.html", b"hello").await.unwrap();

        let written = tokio::fs::read(module.join("doc.html")).await.unwrap();
        assert_eq!(written, b"hello");

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }
}
