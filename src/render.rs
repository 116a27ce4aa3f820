// src/render.rs

//! Rendering of decoded article bodies.
//!
//! Renderers consume the block list produced by [`codec::decode`] and never
//! look at markers themselves. HTML goes through the tera templates under
//! `templates/`, which autoescape every value. The helpers below back the
//! post page header (reading time, date) and listing cards (excerpt).

use chrono::{DateTime, Utc};
use tera::{Context, Tera};
use unicode_segmentation::UnicodeSegmentation;

use crate::codec;
use crate::error::Result;
use crate::models::{Article, ContentBlock, RenderConfig};

const BLOCKS_TEMPLATE: &str = "blocks.html";
const ARTICLE_TEMPLATE: &str = "article.html";

pub(crate) mod context {
    use serde::Serialize;

    use crate::models::ContentBlock;

    #[derive(Debug, Serialize)]
    pub struct Blocks<'a> {
        pub blocks: &'a [ContentBlock],
        pub image_width: u32,
        pub image_height: u32,
    }

    #[derive(Debug, Serialize)]
    pub struct ArticlePage<'a> {
        pub title: &'a str,
        pub category: &'a str,
        pub category_path: String,
        pub reading_time: String,
        pub datetime: String,
        pub date: String,
        pub image_url: &'a str,
        #[serde(flatten)]
        pub body: Blocks<'a>,
    }
}

/// Turns a block sequence into output text.
pub trait BlockRenderer {
    fn render(&self, blocks: &[ContentBlock]) -> Result<String>;

    /// Decode `content` and render it.
    fn render_content(&self, content: &str) -> Result<String> {
        self.render(&codec::decode(content))
    }
}

/// Renders blocks as HTML paragraphs and images.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    engine: Tera,
    image_width: u32,
    image_height: u32,
    words_per_minute: usize,
}

impl HtmlRenderer {
    pub fn new(config: &RenderConfig) -> Result<Self> {
        Ok(Self {
            engine: template_engine()?,
            image_width: config.image_width,
            image_height: config.image_height,
            words_per_minute: config.words_per_minute,
        })
    }

    fn blocks_context<'a>(&self, blocks: &'a [ContentBlock]) -> context::Blocks<'a> {
        context::Blocks {
            blocks,
            image_width: self.image_width,
            image_height: self.image_height,
        }
    }

    /// Render a full article: header, feature image and body.
    pub fn render_article(&self, article: &Article) -> Result<String> {
        let blocks = article.blocks();
        let page = context::ArticlePage {
            title: &article.title,
            category: article.category.display_name(),
            category_path: article.category.path(),
            reading_time: reading_time(&article.content, self.words_per_minute),
            datetime: article.created_at.to_rfc3339(),
            date: display_date(&article.created_at),
            image_url: &article.image_url,
            body: self.blocks_context(&blocks),
        };

        Ok(self
            .engine
            .render(ARTICLE_TEMPLATE, &Context::from_serialize(page)?)?)
    }
}

impl BlockRenderer for HtmlRenderer {
    fn render(&self, blocks: &[ContentBlock]) -> Result<String> {
        let context = Context::from_serialize(self.blocks_context(blocks))?;
        Ok(self.engine.render(BLOCKS_TEMPLATE, &context)?)
    }
}

/// Template engine with the built-in page templates.
fn template_engine() -> Result<Tera> {
    let mut engine = Tera::default();
    engine.add_raw_templates(vec![
        (BLOCKS_TEMPLATE, include_str!("../templates/blocks.html")),
        (ARTICLE_TEMPLATE, include_str!("../templates/article.html")),
    ])?;
    Ok(engine)
}

/// Renders blocks for a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl BlockRenderer for TextRenderer {
    fn render(&self, blocks: &[ContentBlock]) -> Result<String> {
        let mut out = String::new();
        for block in blocks {
            match block {
                ContentBlock::Text { text } => out.push_str(text),
                ContentBlock::Image { url } => {
                    if !out.is_empty() && !out.ends_with('\n') {
                        out.push('\n');
                    }
                    out.push_str(&format!("[Image: {url}]\n"));
                }
            }
        }
        Ok(out)
    }
}

/// Estimated reading time, e.g. `"3 min read"`.
///
/// Only text blocks count; image markers add no words. Never below one minute.
pub fn reading_time(content: &str, words_per_minute: usize) -> String {
    let words: usize = codec::decode(content)
        .iter()
        .filter_map(ContentBlock::as_text)
        .map(|text| text.unicode_words().count())
        .sum();
    let minutes = words.div_ceil(words_per_minute.max(1)).max(1);
    format!("{minutes} min read")
}

/// Plain-text summary of the body for listing cards.
///
/// Markers are dropped and whitespace collapsed. Truncation happens on a
/// grapheme boundary and appends `…`.
pub fn excerpt(content: &str, max_graphemes: usize) -> String {
    let text = codec::decode(content)
        .iter()
        .filter_map(ContentBlock::as_text)
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(max_graphemes).collect();
    if graphemes.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}

/// Date as shown under article titles, e.g. `Jan 05, 2025`.
pub fn display_date(created_at: &DateTime<Utc>) -> String {
    created_at.format("%b %d, %Y").to_string()
}
