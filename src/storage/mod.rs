//! Storage abstractions for article persistence.
//!
//! The article list is read and written whole: callers `load` it, change it,
//! and `save` it back. Backends decide where the list lives.
//!
//! ## Directory Structure (LocalStorage)
//!
//! ```text
//! data/
//! ├── config.toml           # Optional configuration
//! └── articles.json         # JSON array of articles
//! ```

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Article;

// Re-export for convenience
pub use local::LocalStorage;
pub use memory::MemoryStorage;

/// Trait for article storage backends.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Load all articles in stored order.
    ///
    /// An uninitialised store yields an empty list.
    async fn load(&self) -> Result<Vec<Article>>;

    /// Replace the stored list with `articles`.
    async fn save(&self, articles: &[Article]) -> Result<()>;
}
