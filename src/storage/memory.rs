//! In-memory storage backend.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::Article;
use crate::storage::ArticleStore;

/// Article store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    articles: RwLock<Vec<Article>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `articles`.
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles: RwLock::new(articles),
        }
    }
}

#[async_trait]
impl ArticleStore for MemoryStorage {
    async fn load(&self) -> Result<Vec<Article>> {
        Ok(self.articles.read().await.clone())
    }

    async fn save(&self, articles: &[Article]) -> Result<()> {
        *self.articles.write().await = articles.to_vec();
        Ok(())
    }
}
