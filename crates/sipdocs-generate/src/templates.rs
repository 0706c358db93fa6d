//! Template for the hand-authored reference index page.

use std::fs;
use std::path::Path;

use minijinja::{context, Environment};

use crate::generator::GenerateError;

const INDEX_NAME: &str = "index.md";

/// Built-in landing page for the reference section.
const INDEX_TEMPLATE: &str = include_str!("../templates/reference-index.md");

/// Template engine for the reference index, using minijinja.
pub struct IndexTemplate {
    env: Environment<'static>,
}

impl IndexTemplate {
    /// Use the built-in landing page.
    pub fn builtin() -> Result<Self, GenerateError> {
        Self::from_source(INDEX_TEMPLATE.to_string())
    }

    /// Load a landing page template from disk.
    pub fn from_file(path: &Path) -> Result<Self, GenerateError> {
        let source = fs::read_to_string(path).map_err(|e| GenerateError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_source(source)
    }

    fn from_source(source: String) -> Result<Self, GenerateError> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.add_template_owned(INDEX_NAME.to_string(), source)?;
        Ok(Self { env })
    }

    /// Render the index page for the installed package version.
    pub fn render(&self, package: &str, version: &str) -> Result<String, GenerateError> {
        let tmpl = self.env.get_template(INDEX_NAME)?;
        Ok(tmpl.render(context! { package, version })?)
    }
}
