//! Local filesystem storage implementation.
//!
//! Keeps the article list as a pretty-printed JSON array in a single file.
//! Writes go to a temp file first and are renamed over the target, so a
//! crash mid-write leaves the previous list intact.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{Article, StorageConfig};
use crate::storage::ArticleStore;

/// Default file name for the article list.
pub const ARTICLES_FILE: &str = "articles.json";

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    articles_key: String,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            articles_key: ARTICLES_FILE.to_string(),
        }
    }

    /// Create a LocalStorage using the file name from configuration.
    pub fn with_config(root_dir: impl Into<PathBuf>, config: &StorageConfig) -> Self {
        Self {
            root_dir: root_dir.into(),
            articles_key: config.articles_file.clone(),
        }
    }

    /// Full path of the article list file.
    pub fn articles_path(&self) -> PathBuf {
        self.path(&self.articles_key)
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ArticleStore for LocalStorage {
    async fn load(&self) -> Result<Vec<Article>> {
        match self.read_json::<Vec<Article>>(&self.articles_key).await? {
            Some(articles) => {
                log::debug!(
                    "Loaded {} articles from {}",
                    articles.len(),
                    self.articles_path().display()
                );
                Ok(articles)
            }
            None => {
                log::warn!("No {} found", self.articles_path().display());
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, articles: &[Article]) -> Result<()> {
        self.write_json(&self.articles_key, articles).await?;
        log::info!(
            "Saved {} articles to {}",
            articles.len(),
            self.articles_path().display()
        );
        Ok(())
    }
}
