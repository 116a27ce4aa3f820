// src/services/articles.rs

//! Article management service.
//!
//! Implements the operations behind the admin dashboard and public pages on
//! top of an injected [`ArticleStore`]. Every mutation loads the whole list,
//! changes it and saves it back.

use chrono::{DateTime, Utc};

use crate::codec;
use crate::error::{AppError, Result};
use crate::models::{Article, ArticleDraft, Category, Config};
use crate::storage::ArticleStore;

/// Service for creating, editing and browsing articles.
pub struct ArticleService<S> {
    store: S,
    placeholder_image: String,
}

impl<S: ArticleStore> ArticleService<S> {
    /// Create a service with default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, &Config::default())
    }

    /// Create a service using the given configuration.
    pub fn with_config(store: S, config: &Config) -> Self {
        Self {
            store,
            placeholder_image: config.render.placeholder_image.clone(),
        }
    }

    /// All articles in stored order.
    pub async fn list(&self) -> Result<Vec<Article>> {
        self.store.load().await
    }

    /// Look up a single article.
    pub async fn get(&self, id: i64) -> Result<Article> {
        self.store
            .load()
            .await?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::not_found(id))
    }

    /// Publish a new article.
    pub async fn create(&self, draft: ArticleDraft) -> Result<Article> {
        self.create_at(draft, Utc::now()).await
    }

    /// Publish a new article as of `now`.
    ///
    /// The id is `now` in milliseconds, bumped past the largest existing id
    /// so ids stay unique and increasing.
    pub async fn create_at(&self, draft: ArticleDraft, now: DateTime<Utc>) -> Result<Article> {
        draft.validate()?;

        let mut articles = self.store.load().await?;
        let id = next_id(&articles, now)?;

        let article = Article {
            id,
            title: draft.title,
            content: draft.content,
            category: draft.category,
            created_at: now,
            image_url: draft
                .image_url
                .unwrap_or_else(|| self.placeholder_image.clone()),
        };

        articles.push(article.clone());
        self.store.save(&articles).await?;

        log::info!("Created article {} \"{}\"", article.id, article.title);
        Ok(article)
    }

    /// Replace an article's editable fields.
    ///
    /// `id` and `created_at` never change. The feature image is replaced
    /// only when the draft carries one.
    pub async fn update(&self, id: i64, draft: ArticleDraft) -> Result<Article> {
        draft.validate()?;

        let mut articles = self.store.load().await?;
        let article = articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::not_found(id))?;

        article.title = draft.title;
        article.content = draft.content;
        article.category = draft.category;
        if let Some(image_url) = draft.image_url {
            article.image_url = image_url;
        }
        let updated = article.clone();

        self.store.save(&articles).await?;

        log::info!("Updated article {}", id);
        Ok(updated)
    }

    /// Remove an article.
    pub async fn delete(&self, id: i64) -> Result<Article> {
        let mut articles = self.store.load().await?;
        let index = articles
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AppError::not_found(id))?;

        let removed = articles.remove(index);
        self.store.save(&articles).await?;

        log::info!("Deleted article {}", id);
        Ok(removed)
    }

    /// Articles in the category named by `slug` (case-insensitive).
    pub async fn by_category(&self, slug: &str) -> Result<Vec<Article>> {
        let category: Category = slug.parse()?;
        let articles = self.store.load().await?;
        Ok(articles
            .into_iter()
            .filter(|a| a.category == category)
            .collect())
    }

    /// The `count` most recently stored articles, newest first.
    pub async fn featured(&self, count: usize) -> Result<Vec<Article>> {
        let articles = self.store.load().await?;
        Ok(articles.into_iter().rev().take(count).collect())
    }

    /// Inline images of an article, in body order.
    pub async fn gallery(&self, id: i64) -> Result<Vec<String>> {
        Ok(self.get(id).await?.inline_images())
    }

    /// Insert an image marker into a stored article's body.
    ///
    /// Returns the updated article and the cursor position after the marker.
    pub async fn insert_image(&self, id: i64, cursor: usize, url: &str) -> Result<(Article, usize)> {
        if !codec::is_marker_safe(url) {
            log::warn!(
                "Image URL {:?} contains ']' and will not decode back unchanged",
                url
            );
        }

        let mut articles = self.store.load().await?;
        let article = articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::not_found(id))?;

        let (content, new_cursor) = codec::insert_image_marker(&article.content, cursor, url);
        article.content = content;
        let updated = article.clone();

        self.store.save(&articles).await?;

        log::debug!("Inserted image into article {} at {}", id, cursor);
        Ok((updated, new_cursor))
    }
}

/// Next article id for a creation at `now`.
fn next_id(articles: &[Article], now: DateTime<Utc>) -> Result<i64> {
    let candidate = now.timestamp_millis();
    match articles.iter().map(|a| a.id).max() {
        Some(max) if max >= candidate => max
            .checked_add(1)
            .ok_or_else(|| AppError::validation("article id space exhausted")),
        _ => Ok(candidate),
    }
}
