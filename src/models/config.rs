//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Article store settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Rendering settings for post pages and listings
    #[serde(default)]
    pub render: RenderConfig,

    /// Home page feed settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Serialize configuration back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.storage.articles_file.trim().is_empty() {
            return Err(AppError::validation("storage.articles_file is empty"));
        }
        if self.render.words_per_minute == 0 {
            return Err(AppError::validation("render.words_per_minute must be > 0"));
        }
        if self.render.image_width == 0 || self.render.image_height == 0 {
            return Err(AppError::validation(
                "render.image_width and render.image_height must be > 0",
            ));
        }
        if self.render.excerpt_length == 0 {
            return Err(AppError::validation("render.excerpt_length must be > 0"));
        }
        if self.render.placeholder_image.trim().is_empty() {
            return Err(AppError::validation("render.placeholder_image is empty"));
        }
        if self.feed.featured_count == 0 {
            return Err(AppError::validation("feed.featured_count must be > 0"));
        }
        Ok(())
    }
}

/// Article store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File name of the article list inside the data directory
    #[serde(default = "defaults::articles_file")]
    pub articles_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            articles_file: defaults::articles_file(),
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Reading speed used for the "min read" estimate
    #[serde(default = "defaults::words_per_minute")]
    pub words_per_minute: usize,

    /// Width attribute of inline images
    #[serde(default = "defaults::image_width")]
    pub image_width: u32,

    /// Height attribute of inline images
    #[serde(default = "defaults::image_height")]
    pub image_height: u32,

    /// Maximum excerpt length in grapheme clusters
    #[serde(default = "defaults::excerpt_length")]
    pub excerpt_length: usize,

    /// Feature image used when an article is created without one
    #[serde(default = "defaults::placeholder_image")]
    pub placeholder_image: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            words_per_minute: defaults::words_per_minute(),
            image_width: defaults::image_width(),
            image_height: defaults::image_height(),
            excerpt_length: defaults::excerpt_length(),
            placeholder_image: defaults::placeholder_image(),
        }
    }
}

/// Home page feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Number of latest articles in the featured section
    #[serde(default = "defaults::featured_count")]
    pub featured_count: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            featured_count: defaults::featured_count(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Storage defaults
    pub fn articles_file() -> String {
        "articles.json".into()
    }

    // Render defaults
    pub fn words_per_minute() -> usize {
        200
    }
    pub fn image_width() -> u32 {
        800
    }
    pub fn image_height() -> u32 {
        400
    }
    pub fn excerpt_length() -> usize {
        160
    }
    pub fn placeholder_image() -> String {
        "/placeholder.svg".into()
    }

    // Feed defaults
    pub fn featured_count() -> usize {
        3
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
}
