//! Plain-text excerpts for article previews.

use super::{frontmatter::strip_frontmatter, title::strip_title_heading};
use regex::Regex;
use std::sync::LazyLock;

/// Marker appended to truncated excerpts.
pub const ELLIPSIS: &str = "...";

/// `![[embedded image]]`
static EMBED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[\[.*?\]\]").unwrap());
/// `[text](url)`
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
/// Emphasis, heading and code markers.
static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[#*`_~]").unwrap());
static NEWLINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:\r?\n)+").unwrap());

/// Markup-free body text with newlines collapsed to spaces.
///
/// The heading used as the article title is left out.
pub fn plain_text(content: &str) -> String {
    let body = strip_title_heading(strip_frontmatter(content));
    let text = EMBED_RE.replace_all(&body, "");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = MARKUP_RE.replace_all(&text, "");
    let text = NEWLINES_RE.replace_all(&text, " ");
    text.trim().to_owned()
}

/// Build an excerpt of at most `max_length` characters plus [`ELLIPSIS`].
///
/// Truncation counts Unicode scalar values and may cut a word in half.
pub fn extract_excerpt(content: &str, max_length: usize) -> String {
    let text = plain_text(content);

    match text.char_indices().nth(max_length) {
        None => text,
        Some((cut, _)) => format!("{}{ELLIPSIS}", text[..cut].trim_end()),
    }
}
