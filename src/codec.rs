// src/codec.rs

//! Article content codec.
//!
//! Article bodies are flat strings in which inline images are written as
//! markers:
//!
//! ```text
//! Opening paragraph.[image:/uploads/a.png]Closing paragraph.
//! ```
//!
//! A marker is `[image:` followed by any characters except `]`, closed by `]`.
//! This syntax is the stored format of every article and must stay exact.
//! Decoding turns a body into an ordered list of [`ContentBlock`]s; encoding
//! reverses it. Both directions are total: every string decodes, and an
//! unterminated `[image:` is plain text.
//!
//! URLs are not escaped. A URL containing `]` produces a marker that decodes
//! differently from what was written; [`is_marker_safe`] lets callers detect
//! this before inserting.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::ContentBlock;

/// Opening text of an image marker.
pub const MARKER_PREFIX: &str = "[image:";

/// Closing text of an image marker.
pub const MARKER_SUFFIX: &str = "]";

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[image:([^\]]*)\]").expect("image marker regex should compile")
});

/// Build the marker token for an image URL.
pub fn marker(url: &str) -> String {
    format!("{MARKER_PREFIX}{url}{MARKER_SUFFIX}")
}

/// Whether `url` can be embedded in a marker and decode back unchanged.
pub fn is_marker_safe(url: &str) -> bool {
    !url.contains(']')
}

/// Decode an article body into blocks, left to right.
///
/// Empty text between adjacent markers (or at either end) yields no block.
pub fn decode(content: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let mut last = 0;

    for caps in MARKER_RE.captures_iter(content) {
        let (Some(whole), Some(url)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        if whole.start() > last {
            blocks.push(ContentBlock::text(&content[last..whole.start()]));
        }
        blocks.push(ContentBlock::image(url.as_str()));
        last = whole.end();
    }

    if last < content.len() {
        blocks.push(ContentBlock::text(&content[last..]));
    }

    blocks
}

/// Encode blocks back into the flat body format.
pub fn encode(blocks: &[ContentBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            ContentBlock::Text { text } => out.push_str(text),
            ContentBlock::Image { url } => {
                out.push_str(MARKER_PREFIX);
                out.push_str(url);
                out.push_str(MARKER_SUFFIX);
            }
        }
    }
    out
}

/// Inline image URLs in body order, duplicates included.
pub fn extract_image_urls(content: &str) -> Vec<String> {
    MARKER_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Splice an image marker into `content` at `cursor`.
///
/// `cursor` counts characters (Unicode scalar values), not bytes. A cursor
/// past the end inserts at the end. Returns the new content and the cursor
/// position immediately after the inserted marker.
pub fn insert_image_marker(content: &str, cursor: usize, url: &str) -> (String, usize) {
    let token = marker(url);
    let byte_pos = content
        .char_indices()
        .nth(cursor)
        .map_or(content.len(), |(i, _)| i);
    let position = content[..byte_pos].chars().count();

    let mut out = String::with_capacity(content.len() + token.len());
    out.push_str(&content[..byte_pos]);
    out.push_str(&token);
    out.push_str(&content[byte_pos..]);

    (out, position + token.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty() {
        assert!(decode("").is_empty());
    }

    #[test]
    fn test_decode_plain_text() {
        let text = "Just a paragraph.\n\nAnd another one.";
        assert_eq!(decode(text), vec![ContentBlock::text(text)]);
    }

    #[test]
    fn test_decode_single_marker() {
        assert_eq!(
            decode("[image:/uploads/a.png]"),
            vec![ContentBlock::image("/uploads/a.png")]
        );
    }

    #[test]
    fn test_decode_empty_url_marker() {
        assert_eq!(decode("[image:]"), vec![ContentBlock::image("")]);
    }

    #[test]
    fn test_decode_interleaved() {
        assert_eq!(
            decode("Before[image:a.png]Between[image:b.png]After"),
            vec![
                ContentBlock::text("Before"),
                ContentBlock::image("a.png"),
                ContentBlock::text("Between"),
                ContentBlock::image("b.png"),
                ContentBlock::text("After"),
            ]
        );
    }

    #[test]
    fn test_decode_adjacent_markers() {
        assert_eq!(
            decode("[image:a][image:b]"),
            vec![ContentBlock::image("a"), ContentBlock::image("b")]
        );
    }

    #[test]
    fn test_decode_unterminated_marker() {
        assert_eq!(
            decode("abc[image:x"),
            vec![ContentBlock::text("abc[image:x")]
        );
    }

    #[test]
    fn test_decode_unterminated_after_marker() {
        assert_eq!(
            decode("[image:a] tail [image:b"),
            vec![
                ContentBlock::image("a"),
                ContentBlock::text(" tail [image:b"),
            ]
        );
    }

    #[test]
    fn test_decode_other_brackets_are_text() {
        let text = "See [1] and [img:x] and [Image:y]";
        assert_eq!(decode(text), vec![ContentBlock::text(text)]);
    }

    #[test]
    fn test_decode_url_with_newline_and_unicode() {
        assert_eq!(
            decode("Καλημέρα[image:/фото/1.png]\n"),
            vec![
                ContentBlock::text("Καλημέρα"),
                ContentBlock::image("/фото/1.png"),
                ContentBlock::text("\n"),
            ]
        );
    }

    #[test]
    fn test_decode_data_url() {
        let body = "Intro[image:data:image/png;base64,iVBORw0KGgo=]";
        assert_eq!(
            decode(body),
            vec![
                ContentBlock::text("Intro"),
                ContentBlock::image("data:image/png;base64,iVBORw0KGgo="),
            ]
        );
    }

    #[test]
    fn test_url_with_bracket_breaks_roundtrip() {
        let (content, _) = insert_image_marker("", 0, "a]b");
        assert_eq!(content, "[image:a]b]");
        assert_eq!(
            decode(&content),
            vec![ContentBlock::image("a"), ContentBlock::text("b]")]
        );
        assert!(!is_marker_safe("a]b"));
        assert!(is_marker_safe("a[b"));
    }

    #[test]
    fn test_encode() {
        let blocks = vec![
            ContentBlock::text("Hello "),
            ContentBlock::image("x.png"),
            ContentBlock::text(" world"),
        ];
        assert_eq!(encode(&blocks), "Hello [image:x.png] world");
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn test_roundtrip_well_formed() {
        let samples = [
            "",
            "plain",
            "[image:a]",
            "[image:a][image:b]",
            "x[image:a]y[image:]z",
            "abc[image:x",
            "]][image:a]][[",
            "line one\n[image:/p.png]\nline two",
        ];
        for sample in samples {
            assert_eq!(encode(&decode(sample)), sample, "sample {sample:?}");
        }
    }

    /// Every concatenation of up to `depth` pieces drawn from `pieces`.
    fn all_strings(pieces: &[&str], depth: usize) -> Vec<String> {
        let mut all = vec![String::new()];
        let mut frontier = vec![String::new()];
        for _ in 0..depth {
            frontier = frontier
                .iter()
                .flat_map(|prefix| pieces.iter().map(move |p| format!("{prefix}{p}")))
                .collect();
            all.extend(frontier.iter().cloned());
        }
        all
    }

    #[test]
    fn test_laws_hold_for_all_short_strings() {
        let pieces = ["a", "[", "]", ":", "image", "[image:", "é"];
        let inputs = all_strings(&pieces, 5);
        assert_eq!(inputs.len(), 1 + 7 + 49 + 343 + 2401 + 16807);

        for s in &inputs {
            let blocks = decode(s);

            assert_eq!(&encode(&blocks), s, "encode(decode({s:?}))");
            assert_eq!(decode(&encode(&blocks)), blocks, "decode stable for {s:?}");
            assert!(
                blocks.iter().all(|b| b.as_text() != Some("")),
                "empty text block for {s:?}"
            );
            assert!(
                blocks
                    .windows(2)
                    .all(|w| !(w[0].as_text().is_some() && w[1].as_text().is_some())),
                "adjacent text blocks for {s:?}"
            );

            let urls: Vec<String> = blocks
                .iter()
                .filter_map(|b| b.as_image().map(str::to_string))
                .collect();
            assert_eq!(extract_image_urls(s), urls, "image urls for {s:?}");
        }
    }

    #[test]
    fn test_insert_preserves_surrounding_blocks_for_all_short_strings() {
        let pieces = ["a", "[", "]", "[image:", "é"];
        for s in all_strings(&pieces, 4) {
            let len = s.chars().count();
            for cursor in 0..=len {
                let (content, after) = insert_image_marker(&s, cursor, "u.png");
                assert_eq!(after, cursor + "[image:u.png]".len(), "cursor for {s:?}");

                let before: String = s.chars().take(cursor).collect();
                let rest: String = s.chars().skip(cursor).collect();
                assert_eq!(content, format!("{before}[image:u.png]{rest}"));
                assert_eq!(encode(&decode(&content)), content);
            }
        }
    }

    #[test]
    fn test_decode_is_stable_after_encode() {
        let content = "a[image:x]]b[image:y";
        let blocks = decode(content);
        assert_eq!(decode(&encode(&blocks)), blocks);
    }

    #[test]
    fn test_extract_image_urls_keeps_duplicates() {
        assert_eq!(
            extract_image_urls("[image:a][image:b][image:a]"),
            vec!["a", "b", "a"]
        );
        assert!(extract_image_urls("no images here").is_empty());
    }

    #[test]
    fn test_extract_matches_decode() {
        let content = "t[image:1]u[image:2][image:3]v";
        let from_blocks: Vec<String> = decode(content)
            .iter()
            .filter_map(|b| b.as_image().map(str::to_string))
            .collect();
        assert_eq!(extract_image_urls(content), from_blocks);
    }

    #[test]
    fn test_insert_image_marker() {
        let (content, cursor) = insert_image_marker("Hello world", 5, "foo.png");
        assert_eq!(content, "Hello[image:foo.png] world");
        assert_eq!(cursor, 5 + "[image:foo.png]".len());
    }

    #[test]
    fn test_insert_at_start_and_end() {
        assert_eq!(
            insert_image_marker("abc", 0, "u"),
            ("[image:u]abc".to_string(), 9)
        );
        assert_eq!(
            insert_image_marker("abc", 3, "u"),
            ("abc[image:u]".to_string(), 12)
        );
    }

    #[test]
    fn test_insert_past_end_clamps() {
        assert_eq!(
            insert_image_marker("abc", 99, "u"),
            ("abc[image:u]".to_string(), 12)
        );
    }

    #[test]
    fn test_insert_counts_chars_not_bytes() {
        let (content, cursor) = insert_image_marker("héllo", 2, "p");
        assert_eq!(content, "hé[image:p]llo");
        assert_eq!(cursor, 2 + 9);
    }

    #[test]
    fn test_insert_then_decode() {
        let (content, _) = insert_image_marker("First.Second.", 6, "/mid.png");
        assert_eq!(
            decode(&content),
            vec![
                ContentBlock::text("First."),
                ContentBlock::image("/mid.png"),
                ContentBlock::text("Second."),
            ]
        );
    }
}
