//! Frontmatter detection, parsing and rendering.

use serde::Deserialize;

/// Delimiter that opens and closes a frontmatter block.
pub const DELIMITER: &str = "---";

/// Frontmatter fields the docs site requires on every page.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Frontmatter {
    /// Page title (required)
    pub title: String,

    /// Page description for SEO
    #[serde(default)]
    pub description: Option<String>,
}

/// Check whether content already begins with a frontmatter block.
///
/// Only the very first bytes count. Leading whitespace means no header.
pub fn has_frontmatter(content: &str) -> bool {
    content.starts_with(DELIMITER)
}

/// Extract frontmatter from a markdown page.
///
/// Returns the parsed frontmatter and the remaining content after the frontmatter block.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    if !has_frontmatter(source) {
        return Ok((None, source));
    }

    // Find the closing ---
    let after_open = &source[DELIMITER.len()..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let frontmatter: Frontmatter = serde_yaml::from_str(yaml_content)
        .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    Ok((Some(frontmatter), remaining.trim_start()))
}

/// Render the header block for an API reference page.
///
/// `title` must already be sanitized. The block ends with a blank line so
/// the original content can be appended directly.
pub fn render_frontmatter(title: &str) -> String {
    format!(
        "{DELIMITER}\ntitle: \"{title}\"\ndescription: \"API reference for {title}\"\n{DELIMITER}\n\n"
    )
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}
