// src/models/mod.rs

//! Domain models for NewsHub.

mod article;
mod block;
mod category;
mod config;

// Re-export all public types
pub use article::{Article, ArticleDraft};
pub use block::ContentBlock;
pub use category::Category;
pub use config::{Config, FeedConfig, LoggingConfig, RenderConfig, StorageConfig};
