pub mod check;
pub mod frontmatter;
pub mod generate;
