//! Reference page validation.

use std::path::Path;

use anyhow::{Context, Result};
use sipdocs_frontmatter::{find_invalid_pages, InjectOptions};

/// Run the check command.
pub fn run(dir: &Path) -> Result<()> {
    let invalid = find_invalid_pages(dir, &InjectOptions::default())
        .with_context(|| format!("Failed to check {}", dir.display()))?;

    if invalid.is_empty() {
        tracing::info!("All pages in {} have frontmatter", dir.display());
        return Ok(());
    }

    for page in &invalid {
        match &page.error {
            Some(e) => tracing::warn!("{}: {}", page.path.display(), e),
            None => tracing::warn!("{}: missing frontmatter", page.path.display()),
        }
    }

    anyhow::bail!("{} pages would not be rendered", invalid.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn fails_on_bare_page() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("SIP.md"), "# Class: SIP\n").unwrap();

        let err = run(temp.path()).unwrap_err();

        assert_eq!(err.to_string(), "1 pages would not be rendered");
    }

    #[test]
    fn passes_after_frontmatter() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("SIP.md"), "# Class: SIP\n").unwrap();

        crate::commands::frontmatter::run(temp.path()).unwrap();

        assert!(run(temp.path()).is_ok());
    }
}
