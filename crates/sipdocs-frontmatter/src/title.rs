//! Page title derivation for generated reference pages.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// First level-1 heading, with an optional TypeDoc reflection kind prefix.
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^#\s+(?:Class:|Interface:|Type Alias:|Function:|Enumeration:|Variable:)?\s*(.+)$",
    )
    .expect("Invalid heading regex")
});

/// Derive a sanitized title for a page.
///
/// Uses the first heading when one matches, otherwise the file name.
pub fn extract_title(content: &str, path: &Path) -> String {
    let raw = heading_title(content).unwrap_or_else(|| filename_title(path));
    sanitize_title(&raw)
}

/// Title from the first `# ` heading, without its reflection kind prefix.
pub fn heading_title(content: &str) -> Option<String> {
    HEADING_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Title from a file name: `.md` dropped, dashes become spaces, words capitalized.
///
/// `stealth-address.md` becomes `Stealth Address`.
pub fn filename_title(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let stem = name.strip_suffix(".md").unwrap_or(&*name);

    let mut title = String::with_capacity(stem.len());
    let mut prev_is_word = false;

    for c in stem.chars() {
        let c = if c == '-' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric() || c == '_';

        if is_word && !prev_is_word {
            title.push(c.to_ascii_uppercase());
        } else {
            title.push(c);
        }
        prev_is_word = is_word;
    }

    title
}

/// Make a title safe to embed in a double-quoted YAML string.
///
/// Markdown escapes around angle brackets are resolved, double quotes are
/// escaped and backticks are removed.
pub fn sanitize_title(raw: &str) -> String {
    raw.replace("\\<", "<")
        .replace("\\>", ">")
        .replace('"', "\\\"")
        .replace('`', "")
}
