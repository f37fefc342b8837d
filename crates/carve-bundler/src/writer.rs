//! Delivery of finished modules.
//!
//! [`FsWriter`] writes through a temp file and a rename, so a reader never
//! sees a half-written module. [`MemoryWriter`] records deliveries for tests
//! and embedders.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tokio::io::AsyncWriteExt;

use crate::error::BuildError;

/// Where a finished module is delivered.
///
/// Paths handed to `write_file` are already rooted and cleaned; missing parent
/// directories are the writer's to create.
#[async_trait]
pub trait OutputWriter: Send + Sync {
    async fn write_file(&self, path: &Path, contents: &str) -> Result<(), BuildError>;

    /// Writes `contents` unchanged, no trailing newline added.
    async fn write_stdout(&self, contents: &str) -> Result<(), BuildError>;
}

/// Writes to the real filesystem and process stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWriter;

#[async_trait]
impl OutputWriter for FsWriter {
    async fn write_file(&self, path: &Path, contents: &str) -> Result<(), BuildError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BuildError::write(path, e))?;
        }

        let temp = temp_path(path);
        if let Err(e) = tokio::fs::write(&temp, contents).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(BuildError::write(path, e));
        }
        if let Err(e) = tokio::fs::rename(&temp, path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(BuildError::write(path, e));
        }

        tracing::debug!("wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }

    async fn write_stdout(&self, contents: &str) -> Result<(), BuildError> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(contents.as_bytes())
            .await
            .map_err(BuildError::Stdout)?;
        stdout.flush().await.map_err(BuildError::Stdout)
    }
}

/// `lodash.js` becomes `lodash.js.tmp` in the same directory, so the rename
/// stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Keeps every delivery in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    files: Arc<RwLock<FxHashMap<PathBuf, String>>>,
    stdout: Arc<RwLock<String>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents written to `path`, if any.
    pub fn file(&self, path: &Path) -> Option<String> {
        self.files.read().get(path).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.files.read().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Everything written to stdout so far.
    pub fn stdout(&self) -> String {
        self.stdout.read().clone()
    }
}

#[async_trait]
impl OutputWriter for MemoryWriter {
    async fn write_file(&self, path: &Path, contents: &str) -> Result<(), BuildError> {
        self.files
            .write()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    async fn write_stdout(&self, contents: &str) -> Result<(), BuildError> {
        self.stdout.write().push_str(contents);
        Ok(())
    }
}
