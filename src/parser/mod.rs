// file: src/parser/mod.rs
// description: markdown parsing module exports
// reference: internal module structure

pub mod frontmatter;
pub mod markdown;

pub use frontmatter::Frontmatter;
pub use markdown::{MarkdownParser, apply_replacements};
