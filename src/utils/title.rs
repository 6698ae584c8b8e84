//! Article title resolution.

use super::frontmatter::strip_frontmatter;
use regex::{Match, Regex};
use std::{borrow::Cow, sync::LazyLock};

/// `# heading` line.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+)$").unwrap());

/// `YYYY-MM-DD_` filename prefix.
static DATE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}_").unwrap());

/// Resolve the display title of an article.
///
/// The first non-blank level-one heading after the frontmatter wins.
/// Without one, the title is derived from the filename:
/// `2024-01-15_hello-world.md` → `hello-world`.
pub fn resolve_title(filename: &str, content: &str) -> String {
    match title_heading(strip_frontmatter(content)) {
        Some((_, title)) => title.to_owned(),
        None => title_from_filename(filename),
    }
}

/// Remove the heading line [`resolve_title`] picks, leaving the line break
/// in place. `body` must already be free of frontmatter.
pub fn strip_title_heading(body: &str) -> Cow<'_, str> {
    match title_heading(body) {
        Some((line, _)) => {
            Cow::Owned(format!("{}{}", &body[..line.start()], &body[line.end()..]))
        }
        None => Cow::Borrowed(body),
    }
}

/// First heading line with a non-blank title, and its trimmed title.
fn title_heading(body: &str) -> Option<(Match<'_>, &str)> {
    HEADING_RE.captures_iter(body).find_map(|caps| {
        let line = caps.get(0)?;
        let title = caps.get(1)?.as_str().trim();
        (!title.is_empty()).then_some((line, title))
    })
}

/// Filename without its date prefix and `.md` suffix.
pub fn title_from_filename(filename: &str) -> String {
    let stem = filename.strip_suffix(".md").unwrap_or(filename);
    let title = DATE_PREFIX_RE.replace(stem, "");

    match (title.is_empty(), stem.is_empty()) {
        (false, _) => title.into_owned(),
        (true, false) => stem.to_owned(),
        (true, true) => filename.to_owned(),
    }
}
