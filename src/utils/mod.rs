//! Text and date helpers for article extraction.

pub mod date;
pub mod excerpt;
pub mod frontmatter;
pub mod title;
