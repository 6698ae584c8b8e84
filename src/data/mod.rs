//! Article and tag data written to the json documents.
//!
//! # Architecture
//!
//! ```text
//! parse_article() ──► Article ──┬──► Vec<Article> ──► sort_articles() ──► IndexDocument
//!                               │                                    │
//!                               └──► TagCatalog::record()            │
//!                                           │                        ▼
//!                                           └──────► into_entries() ──► TagsDocument
//! ```
//!
//! # Output files
//!
//! | File         | Description                                   |
//! |--------------|-----------------------------------------------|
//! | `index.json` | All accepted articles, newest first           |
//! | `tags.json`  | Tags by frequency, each with its articles     |

mod catalog;
mod types;

pub use catalog::{TagCatalog, sort_articles};
pub use types::{Article, IndexDocument, TagEntry, TagsDocument};
