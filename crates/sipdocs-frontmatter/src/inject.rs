//! Frontmatter injection across a generated reference tree.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::frontmatter::{
    extract_frontmatter, has_frontmatter, render_frontmatter, FrontmatterError,
};
use crate::title::extract_title;

/// Which files in a reference tree receive frontmatter.
#[derive(Debug, Clone)]
pub struct InjectOptions {
    /// File extension of pages, without the dot
    pub extension: String,

    /// Hand-authored index page name, skipped at every depth
    pub index_name: String,

    /// Overview file the extraction tool writes at the top level
    pub overview_name: String,
}

impl Default for InjectOptions {
    fn default() -> Self {
        Self {
            extension: "md".to_string(),
            index_name: "index.md".to_string(),
            overview_name: "README.md".to_string(),
        }
    }
}

impl InjectOptions {
    /// Whether `path`, found while walking `root`, should get a header.
    fn is_candidate(&self, root: &Path, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        if !name.ends_with(&format!(".{}", self.extension)) || name == self.index_name {
            return false;
        }

        path != root.join(&self.overview_name)
    }
}

/// Outcome of injecting frontmatter into a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectReport {
    /// Candidate pages found
    pub scanned: usize,

    /// Pages that received a new header
    pub modified: usize,
}

/// Errors that can occur during injection.
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Prepend frontmatter to a single page.
///
/// Returns `Ok(false)` without touching the file when it already has a header.
pub fn add_frontmatter(path: &Path) -> Result<bool, InjectError> {
    let content = fs::read_to_string(path).map_err(|source| InjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if has_frontmatter(&content) {
        return Ok(false);
    }

    let title = extract_title(&content, path);
    let page = render_frontmatter(&title) + &content;

    fs::write(path, page).map_err(|source| InjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Added frontmatter to {} ({})", path.display(), title);

    Ok(true)
}

/// Candidate pages under `dir`, depth first and sorted by file name.
///
/// Symlinked pages and directories are followed.
fn candidates(dir: &Path, options: &InjectOptions) -> Result<Vec<PathBuf>, InjectError> {
    let mut pages = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|source| InjectError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_file() && options.is_candidate(dir, entry.path()) {
            pages.push(entry.into_path());
        }
    }

    Ok(pages)
}

/// Add frontmatter to every candidate page under `dir`, depth first.
///
/// Any filesystem error aborts the walk. Pages processed before the error
/// keep their new headers.
pub fn inject_tree(dir: &Path, options: &InjectOptions) -> Result<InjectReport, InjectError> {
    let mut report = InjectReport::default();

    for path in candidates(dir, options)? {
        report.scanned += 1;
        if add_frontmatter(&path)? {
            report.modified += 1;
        }
    }

    Ok(report)
}

/// A page the site generator would refuse to render.
#[derive(Debug)]
pub struct InvalidPage {
    pub path: PathBuf,
    /// Why the header is unusable; `None` when there is no header at all
    pub error: Option<FrontmatterError>,
}

/// Find candidate pages under `dir` without a parseable header.
pub fn find_invalid_pages(
    dir: &Path,
    options: &InjectOptions,
) -> Result<Vec<InvalidPage>, InjectError> {
    let mut invalid = Vec::new();

    for path in candidates(dir, options)? {
        let content = fs::read_to_string(&path).map_err(|source| InjectError::Io {
            path: path.clone(),
            source,
        })?;

        match extract_frontmatter(&content) {
            Ok((Some(_), _)) => {}
            Ok((None, _)) => invalid.push(InvalidPage { path, error: None }),
            Err(e) => invalid.push(InvalidPage {
                path,
                error: Some(e),
            }),
        }
    }

    Ok(invalid)
}
