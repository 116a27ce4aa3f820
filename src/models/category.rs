//! Article topic categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Topic tag attached to every article.
///
/// Stored as its lowercase slug (`"news"`, `"sport"`, ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    News,
    Sport,
    Technology,
    Business,
}

impl Category {
    /// All categories in menu order.
    pub const ALL: [Category; 4] = [
        Category::News,
        Category::Sport,
        Category::Technology,
        Category::Business,
    ];

    /// Lowercase slug used in URLs and storage.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::News => "news",
            Category::Sport => "sport",
            Category::Technology => "technology",
            Category::Business => "business",
        }
    }

    /// Capitalised name for headings and badges.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::News => "News",
            Category::Sport => "Sport",
            Category::Technology => "Technology",
            Category::Business => "Business",
        }
    }

    /// Public listing path for this category.
    pub fn path(&self) -> String {
        format!("/category/{}", self.slug())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = AppError;

    /// Parse a slug, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::validation(format!("Unknown category '{s}'")))
    }
}
