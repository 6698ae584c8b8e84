//! Index building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_index()
//!     │
//!     ├── collect_sources()   ──► *.md files in the source dir, by name
//!     │
//!     ├── collect_articles()  ──► frontmatter / title / excerpt per file
//!     │       │                   (files without frontmatter are skipped)
//!     │       └── TagCatalog::record()
//!     │
//!     ├── sort_articles()     ──► newest first, undated last
//!     │
//!     ├── into_entries()      ──► tags by count, ties in first-seen order
//!     │
//!     └── write_documents()   ──► index.json + tags.json (both or neither)
//! ```
//!
//! Only a missing source directory or a failed write aborts the run. A file
//! that cannot be read or has no usable frontmatter is logged and skipped.

use crate::{
    config::SiteConfig,
    data::{Article, IndexDocument, TagCatalog, TagEntry, TagsDocument, sort_articles},
    log,
    utils::{
        date::now_iso,
        excerpt::extract_excerpt,
        frontmatter::{FrontmatterError, extract_frontmatter},
        title::resolve_title,
    },
};
use serde::Serialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

/// Extension of article files.
const ARTICLE_EXT: &str = "md";

/// Errors that abort a build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("source directory `{0}` not found")]
    SourceMissing(PathBuf),

    #[error("failed to list `{0}`")]
    Scan(PathBuf, #[source] walkdir::Error),

    #[error("failed to serialize `{0}`")]
    Serialize(PathBuf, #[source] serde_json::Error),

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] io::Error),
}

/// Why a single file did not make it into the documents.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("no frontmatter found")]
    NoFrontmatter,

    #[error("invalid frontmatter: {0}")]
    InvalidFrontmatter(FrontmatterError),

    #[error("unreadable: {0}")]
    Unreadable(io::Error),
}

/// A source file left out of the documents.
#[derive(Debug)]
pub struct SkippedFile {
    pub filename: String,
    pub reason: SkipReason,
}

/// Outcome of a successful build.
#[derive(Debug)]
pub struct BuildReport {
    pub index: IndexDocument,
    pub tags: TagsDocument,
    pub skipped: Vec<SkippedFile>,
    pub index_path: PathBuf,
    pub tags_path: PathBuf,
}

/// Scan the source directory and write the index and tags documents.
pub fn build_index(config: &SiteConfig) -> Result<BuildReport, BuildError> {
    let source = config.source_dir();
    if !source.is_dir() {
        log!("error"; "source directory `{}` not found", source.display());
        return Err(BuildError::SourceMissing(source));
    }

    let files = collect_sources(&source, config)?;
    log!("build"; "found {} markdown files in {}", files.len(), source.display());

    let (mut articles, catalog, skipped) = collect_articles(&files, config);
    log!("build"; "{} articles, {} distinct tags", articles.len(), catalog.distinct_tags());
    sort_articles(&mut articles);

    let last_updated = now_iso();
    let tags = TagsDocument::new(catalog.into_entries(&articles), last_updated.clone());
    let index = IndexDocument::new(articles, last_updated);

    let index_path = config.index_path();
    let tags_path = config.tags_path();
    write_documents(&index, &tags, &index_path, &tags_path)?;

    Ok(BuildReport {
        index,
        tags,
        skipped,
        index_path,
        tags_path,
    })
}

/// List eligible article files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into. Excluded names (`README.md` by
/// default) and non-`.md` files are left out.
pub fn collect_sources(dir: &Path, config: &SiteConfig) -> Result<Vec<PathBuf>, BuildError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| BuildError::Scan(dir.to_path_buf(), err))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let is_article = path.extension().is_some_and(|ext| ext == ARTICLE_EXT);
        let excluded = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_none_or(|name| config.build.is_excluded(name));

        if is_article && !excluded {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Read and parse every file, counting tags of the accepted ones.
pub fn collect_articles(
    files: &[PathBuf],
    config: &SiteConfig,
) -> (Vec<Article>, TagCatalog, Vec<SkippedFile>) {
    let mut articles = Vec::with_capacity(files.len());
    let mut catalog = TagCatalog::new();
    let mut skipped = Vec::new();

    for path in files {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let parsed = fs::read_to_string(path)
            .map_err(SkipReason::Unreadable)
            .and_then(|content| parse_article(&filename, &content, config));

        match parsed {
            Ok(article) => {
                catalog.record(&article.tags);
                articles.push(article);
            }
            Err(reason) => {
                match &reason {
                    SkipReason::NoFrontmatter => {
                        log!("warn"; "no frontmatter found in {filename}")
                    }
                    other => log!("error"; "{filename}: {other}"),
                }
                skipped.push(SkippedFile { filename, reason });
            }
        }
    }

    (articles, catalog, skipped)
}

/// Build the article record for one file.
pub fn parse_article(
    filename: &str,
    content: &str,
    config: &SiteConfig,
) -> Result<Article, SkipReason> {
    let frontmatter = extract_frontmatter(content)
        .map_err(SkipReason::InvalidFrontmatter)?
        .ok_or(SkipReason::NoFrontmatter)?;

    let stem = filename.strip_suffix(".md").unwrap_or(filename);
    let (created_at, published_at) = frontmatter.dates();
    let prefix = config.path_prefix();
    let path = if prefix.is_empty() {
        filename.to_owned()
    } else {
        format!("{prefix}/{filename}")
    };

    Ok(Article {
        id: frontmatter.id().unwrap_or_else(|| stem.to_owned()),
        title: resolve_title(filename, content),
        excerpt: extract_excerpt(content, config.build.excerpt_length),
        tags: frontmatter.tags(),
        created_at,
        published_at,
        filename: filename.to_owned(),
        path,
    })
}

/// Write both documents, or neither.
///
/// Both are serialized up front, written to hidden temporary siblings and
/// only then renamed over the targets.
pub fn write_documents(
    index: &IndexDocument,
    tags: &TagsDocument,
    index_path: &Path,
    tags_path: &Path,
) -> Result<(), BuildError> {
    let index_json = to_json(index, index_path)?;
    let tags_json = to_json(tags, tags_path)?;

    let index_tmp = temp_path(index_path);
    let tags_tmp = temp_path(tags_path);

    let staged = stage(&index_tmp, &index_json, index_path)
        .and_then(|()| stage(&tags_tmp, &tags_json, tags_path))
        .and_then(|()| {
            fs::rename(&index_tmp, index_path)
                .map_err(|err| BuildError::Write(index_path.to_path_buf(), err))
        })
        .and_then(|()| {
            fs::rename(&tags_tmp, tags_path)
                .map_err(|err| BuildError::Write(tags_path.to_path_buf(), err))
        });

    if staged.is_err() {
        fs::remove_file(&index_tmp).ok();
        fs::remove_file(&tags_tmp).ok();
    }
    staged
}

fn to_json<T: Serialize>(value: &T, path: &Path) -> Result<String, BuildError> {
    serde_json::to_string_pretty(value).map_err(|err| BuildError::Serialize(path.to_path_buf(), err))
}

/// Write `content` to `tmp`, creating the target's parent directory.
fn stage(tmp: &Path, content: &str, target: &Path) -> Result<(), BuildError> {
    let write = || -> io::Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(tmp, content)
    };
    write().map_err(|err| BuildError::Write(target.to_path_buf(), err))
}

/// `dir/index.json` → `dir/.index.json.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

/// Report written files and skipped sources.
///
/// With `detailed`, also print every article with its tags, then every tag
/// with its count.
pub fn log_report(report: &BuildReport, detailed: bool) {
    log!("done"; "generated {} with {} articles", report.index_path.display(), report.index.total_count);
    log!("done"; "generated {} with {} tags", report.tags_path.display(), report.tags.total_tags);
    if !report.skipped.is_empty() {
        let names: Vec<_> = report.skipped.iter().map(|s| s.filename.as_str()).collect();
        log!("build"; "skipped {} files: {}", names.len(), names.join(", "));
    }

    if detailed {
        log_articles(&report.index.articles);
        log_tags(&report.tags.tags);
    }
}

fn log_articles(articles: &[Article]) {
    log!("summary"; "articles processed:");
    for article in articles {
        log!("summary"; "- {} ({})", article.title, article.tags.join(", "));
    }
}

fn log_tags(tags: &[TagEntry]) {
    log!("summary"; "tags found:");
    for tag in tags {
        log!("summary"; "- {}: {} article(s)", tag.name, tag.count);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::TempDir;

    fn site(dir: &TempDir) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.set_root(dir.path());
        config.build.summary = false;
        config
    }

    fn write_article(dir: &TempDir, name: &str, content: &str) {
        let source = dir.path().join("Article");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join(name), content).unwrap();
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_hello_world_article() {
        let dir = TempDir::new().unwrap();
        write_article(
            &dir,
            "2024-01-15_hello-world.md",
            "---\ntags: [foo, bar]\npublishedAt: \"2024-01-15T00:00:00Z\"\n---\n# Hello World\nSome text.",
        );

        let report = build_index(&site(&dir)).unwrap();
        let article = &report.index.articles[0];

        assert_eq!(article.id, "2024-01-15_hello-world");
        assert_eq!(article.title, "Hello World");
        assert_eq!(article.tags, vec!["foo", "bar"]);
        assert_eq!(article.excerpt, "Some text.");
        assert_eq!(article.created_at.as_deref(), Some("2024-01-15T00:00:00.000Z"));
        assert_eq!(article.published_at.as_deref(), Some("2024-01-15T00:00:00.000Z"));
        assert_eq!(article.filename, "2024-01-15_hello-world.md");
        assert_eq!(article.path, "Article/2024-01-15_hello-world.md");
    }

    #[test]
    fn test_file_without_frontmatter_is_skipped_once() {
        let dir = TempDir::new().unwrap();
        write_article(&dir, "kept.md", "---\ntags: [foo]\n---\nbody");
        write_article(&dir, "plain.md", "# Plain\nno metadata here");

        let report = build_index(&site(&dir)).unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].filename, "plain.md");
        assert!(matches!(report.skipped[0].reason, SkipReason::NoFrontmatter));

        let index = read_json(&report.index_path);
        let tags = read_json(&report.tags_path);
        let serialized = format!("{index}{tags}");
        assert!(!serialized.contains("plain"));
        assert_eq!(index["totalCount"], 1);
    }

    #[test]
    fn test_invalid_frontmatter_does_not_abort() {
        let dir = TempDir::new().unwrap();
        write_article(&dir, "broken.md", "---\ntags: [unclosed\n---\nbody");
        write_article(&dir, "good.md", "---\nid: good\n---\nbody");

        let report = build_index(&site(&dir)).unwrap();

        assert_eq!(report.index.total_count, 1);
        assert_eq!(report.index.articles[0].id, "good");
        assert!(matches!(
            report.skipped[0].reason,
            SkipReason::InvalidFrontmatter(_)
        ));
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        write_article(&dir, "good.md", "---\nid: good\n---\nbody");
        fs::write(dir.path().join("Article/binary.md"), [0xff, 0xfe, 0x00]).unwrap();

        let report = build_index(&site(&dir)).unwrap();

        assert_eq!(report.index.total_count, 1);
        assert!(matches!(report.skipped[0].reason, SkipReason::Unreadable(_)));
    }

    #[test]
    fn test_tag_entry_lists_dated_before_undated() {
        let dir = TempDir::new().unwrap();
        write_article(&dir, "a-undated.md", "---\nid: undated\ntags: [foo]\n---\nbody");
        write_article(
            &dir,
            "b-dated.md",
            "---\nid: dated\ntags: [foo]\npublishedAt: 2024-02-01\n---\nbody",
        );

        let report = build_index(&site(&dir)).unwrap();
        let foo = &report.tags.tags[0];

        assert_eq!(foo.name, "foo");
        assert_eq!(foo.count, 2);
        let ids: Vec<_> = foo.articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["dated", "undated"]);
    }

    #[test]
    fn test_missing_source_dir_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);

        let result = build_index(&config);

        assert!(matches!(result, Err(BuildError::SourceMissing(_))));
        assert!(!config.index_path().exists());
        assert!(!config.tags_path().exists());
    }

    #[test]
    fn test_collect_sources_filters() {
        let dir = TempDir::new().unwrap();
        write_article(&dir, "b.md", "");
        write_article(&dir, "a.md", "");
        write_article(&dir, "README.md", "");
        write_article(&dir, "notes.txt", "");
        fs::create_dir_all(dir.path().join("Article/nested")).unwrap();
        fs::write(dir.path().join("Article/nested/deep.md"), "").unwrap();
        fs::create_dir_all(dir.path().join("Article/folder.md")).unwrap();

        let config = site(&dir);
        let files = collect_sources(&config.source_dir(), &config).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_documents_shape_and_invariants() {
        let dir = TempDir::new().unwrap();
        write_article(
            &dir,
            "one.md",
            "---\nid: one\ntags: [rust, web]\ncreatedAt: 2024-01-01\n---\n# One\nFirst.",
        );
        write_article(&dir, "two.md", "---\nid: two\ntags: [rust]\n---\nSecond.");
        write_article(&dir, "three.md", "---\nid: three\n---\nThird.");

        let report = build_index(&site(&dir)).unwrap();
        let raw = fs::read_to_string(&report.index_path).unwrap();
        assert!(raw.starts_with("{\n  \"articles\": ["));

        let index = read_json(&report.index_path);
        let tags = read_json(&report.tags_path);

        let articles = index["articles"].as_array().unwrap();
        assert_eq!(index["totalCount"], articles.len());
        assert_eq!(index["lastUpdated"], tags["lastUpdated"]);
        assert_eq!(articles[0]["id"], "one");
        assert_eq!(articles[0]["publishedAt"], "2024-01-01T00:00:00.000Z");
        assert_eq!(articles[1]["createdAt"], Value::Null);
        assert_eq!(articles[1]["publishedAt"], Value::Null);

        let entries = tags["tags"].as_array().unwrap();
        assert_eq!(tags["totalTags"], entries.len());
        assert_eq!(entries[0]["name"], "rust");
        assert_eq!(entries[0]["count"], 2);
        assert_eq!(entries[1]["name"], "web");

        for article in articles {
            for tag in article["tags"].as_array().unwrap() {
                let entry = entries.iter().find(|e| &e["name"] == tag).unwrap();
                let listed = entry["articles"].as_array().unwrap();
                assert!(listed.iter().any(|a| a["id"] == article["id"]));
            }
        }
    }

    #[test]
    fn test_rebuild_overwrites_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        write_article(&dir, "a.md", "---\nid: a\n---\nbody");
        let config = site(&dir);
        fs::write(config.index_path(), "stale").unwrap();

        build_index(&config).unwrap();
        fs::remove_file(dir.path().join("Article/a.md")).unwrap();
        let report = build_index(&config).unwrap();

        assert_eq!(read_json(&report.index_path)["totalCount"], 0);
        assert!(!temp_path(&report.index_path).exists());
        assert!(!temp_path(&report.tags_path).exists());
    }

    #[test]
    fn test_custom_output_and_prefix() {
        let dir = TempDir::new().unwrap();
        write_article(&dir, "post.md", "---\nid: post\n---\nbody");
        let mut config = site(&dir);
        config.build.output = PathBuf::from("public/data");
        config.build.path_prefix = Some("/posts".into());
        config.build.excerpt_length = 2;

        let report = build_index(&config).unwrap();

        assert_eq!(report.index_path, dir.path().join("public/data/index.json"));
        assert!(report.index_path.exists());
        assert_eq!(report.index.articles[0].path, "/posts/post.md");
        assert_eq!(report.index.articles[0].excerpt, "bo...");
    }

    #[test]
    fn test_write_failure_leaves_targets_untouched() {
        let dir = TempDir::new().unwrap();
        let index_path = dir.path().join("index.json");
        fs::write(&index_path, "previous").unwrap();
        // a directory in the way of the tags temp file
        let tags_path = dir.path().join("tags.json");
        fs::create_dir_all(temp_path(&tags_path)).unwrap();

        let index = IndexDocument::new(Vec::new(), "now".into());
        let tags = TagsDocument::new(Vec::new(), "now".into());
        let result = write_documents(&index, &tags, &index_path, &tags_path);

        assert!(matches!(result, Err(BuildError::Write(..))));
        assert_eq!(fs::read_to_string(&index_path).unwrap(), "previous");
        assert!(!tags_path.exists());
        assert!(!temp_path(&index_path).exists());
    }

    #[test]
    fn test_temp_path() {
        assert_eq!(
            temp_path(Path::new("/out/index.json")),
            PathBuf::from("/out/.index.json.tmp")
        );
    }
}
