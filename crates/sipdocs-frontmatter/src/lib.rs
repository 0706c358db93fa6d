//! Frontmatter handling for generated API reference pages.
//!
//! TypeDoc emits plain markdown, but the docs site only renders pages that
//! open with a YAML frontmatter block. This crate derives a title for each
//! generated page and prepends the header, leaving already-headered pages alone.

pub mod frontmatter;
pub mod inject;
pub mod title;

pub use frontmatter::{extract_frontmatter, has_frontmatter, Frontmatter, FrontmatterError};
pub use inject::{
    add_frontmatter, find_invalid_pages, inject_tree, InjectError, InjectOptions, InjectReport,
    InvalidPage,
};
pub use title::{extract_title, sanitize_title};
