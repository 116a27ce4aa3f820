//! Content block produced by decoding an article body.

use serde::Serialize;

/// One piece of an article body: a run of text or a single inline image.
///
/// Blocks are derived from `Article::content` on demand and never persisted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Contiguous text, kept verbatim
    Text { text: String },

    /// Inline image reference
    Image { url: String },
}

impl ContentBlock {
    /// Create a text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an image block.
    pub fn image(url: impl Into<String>) -> Self {
        Self::Image { url: url.into() }
    }

    /// Image URL if this is an image block.
    pub fn as_image(&self) -> Option<&str> {
        match self {
            Self::Image { url } => Some(url),
            Self::Text { .. } => None,
        }
    }

    /// Text if this is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Image { .. } => None,
        }
    }
}
