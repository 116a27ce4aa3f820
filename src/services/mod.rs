//! Service layer for NewsHub.
//!
//! This module contains the business logic for:
//! - Article management and browsing (`ArticleService`)

mod articles;

pub use articles::ArticleService;
