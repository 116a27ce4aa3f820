//! Article data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{AppError, Result};
use crate::models::{Category, ContentBlock};

/// A published article as kept by the article store.
///
/// Field names serialize in camelCase so existing stored records
/// (`createdAt`, `imageUrl`) load unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Unique id, creation time in Unix milliseconds
    pub id: i64,

    /// Headline
    pub title: String,

    /// Body text with inline `[image:<url>]` markers
    pub content: String,

    /// Topic category
    pub category: Category,

    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,

    /// Feature image (data URL or path)
    pub image_url: String,
}

impl Article {
    /// Decode the body into displayable blocks.
    pub fn blocks(&self) -> Vec<ContentBlock> {
        codec::decode(&self.content)
    }

    /// Inline image URLs in body order.
    pub fn inline_images(&self) -> Vec<String> {
        codec::extract_image_urls(&self.content)
    }

    /// Public path of the article page.
    pub fn link(&self) -> String {
        format!("/post/{}", self.id)
    }

    /// Format article for display using a template.
    ///
    /// Supported placeholders:
    /// - `{id}`, `{title}`, `{category}`, `{date}`, `{link}`, `{image}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{id}", &self.id.to_string())
            .replace("{title}", &self.title)
            .replace("{category}", self.category.display_name())
            .replace("{date}", &self.created_at.format("%Y-%m-%d").to_string())
            .replace("{link}", &self.link())
            .replace("{image}", &self.image_url)
    }
}

/// Field values submitted from the editor form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    pub category: Category,

    /// New feature image; `None` keeps the existing one on update
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ArticleDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category,
            image_url: None,
        }
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Check the draft can become an article.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("title is empty"));
        }
        if let Some(url) = &self.image_url {
            if url.trim().is_empty() {
                return Err(AppError::validation("image_url is empty"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_article() -> Article {
        Article {
            id: 1_735_689_600_000,
            title: "Budget passes".to_string(),
            content: "Intro [image:/a.png] more [image:/b.png]".to_string(),
            category: Category::Business,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            image_url: "/placeholder.svg".to_string(),
        }
    }

    #[test]
    fn test_format() {
        let article = sample_article();
        let result = article.format("[{category}] {title} ({date}) {link}");
        assert_eq!(
            result,
            "[Business] Budget passes (2025-01-01) /post/1735689600000"
        );
    }

    #[test]
    fn test_inline_images() {
        assert_eq!(sample_article().inline_images(), vec!["/a.png", "/b.png"]);
    }

    #[test]
    fn test_deserialize_stored_record() {
        let json = r#"{
            "id": 1700000000000,
            "title": "Match report",
            "content": "Goal![image:data:image/png;base64,AAAA]",
            "category": "sport",
            "createdAt": "2023-11-14T22:13:20.000Z",
            "imageUrl": "/placeholder.svg"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, 1_700_000_000_000);
        assert_eq!(article.category, Category::Sport);
        assert_eq!(article.inline_images(), vec!["data:image/png;base64,AAAA"]);
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_value(sample_article()).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("imageUrl").is_some());
        assert_eq!(json["category"], "business");
    }

    #[test]
    fn test_draft_validation() {
        assert!(ArticleDraft::new("Title", "", Category::News).validate().is_ok());
        assert!(ArticleDraft::new("   ", "body", Category::News).validate().is_err());
        assert!(
            ArticleDraft::new("Title", "body", Category::News)
                .with_image(" ")
                .validate()
                .is_err()
        );
    }
}
