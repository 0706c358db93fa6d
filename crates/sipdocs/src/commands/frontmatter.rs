//! Frontmatter injection without regenerating.

use std::path::Path;

use anyhow::{Context, Result};
use sipdocs_frontmatter::{inject_tree, InjectOptions};

/// Run the frontmatter command.
pub fn run(dir: &Path) -> Result<()> {
    let report = inject_tree(dir, &InjectOptions::default())
        .with_context(|| format!("Failed to add frontmatter under {}", dir.display()))?;

    tracing::info!(
        "Added frontmatter to {} of {} pages in {}",
        report.modified,
        report.scanned,
        dir.display()
    );

    Ok(())
}
