//! Configuration file (apidocs.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use sipdocs_generate::generator::{DEFAULT_PACKAGE, DEFAULT_REFERENCE_DIR, DEFAULT_TYPES_PACKAGE};
use sipdocs_generate::{CommandSpec, GeneratorConfig};

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    package: PackageConfig,
    #[serde(default)]
    paths: PathsConfig,
    #[serde(default)]
    commands: CommandsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PackageConfig {
    #[serde(default = "default_package")]
    name: String,
    #[serde(default = "default_types_package")]
    types: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            name: default_package(),
            types: default_types_package(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PathsConfig {
    #[serde(default = "default_reference")]
    reference: PathBuf,
    /// Replacement for the built-in index page template
    index_template: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            reference: default_reference(),
            index_template: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct CommandsConfig {
    update: Option<CommandSpec>,
    extract: Option<CommandSpec>,
}

fn default_package() -> String {
    DEFAULT_PACKAGE.to_string()
}
fn default_types_package() -> String {
    DEFAULT_TYPES_PACKAGE.to_string()
}
fn default_reference() -> PathBuf {
    PathBuf::from(DEFAULT_REFERENCE_DIR)
}

impl ConfigFile {
    /// Reference directory, relative to the project root.
    pub fn reference_dir(&self) -> &Path {
        &self.paths.reference
    }

    /// Build the generator configuration for a project root.
    pub fn into_generator(self, root: &Path, skip_update: bool) -> GeneratorConfig {
        let update = self.commands.update.unwrap_or_else(|| {
            CommandSpec::new(
                "npm",
                ["update".to_string(), self.package.name.clone(), self.package.types.clone()],
            )
        });

        let defaults = GeneratorConfig::default();

        GeneratorConfig {
            root: root.to_path_buf(),
            reference_dir: self.paths.reference,
            package: self.package.name,
            update,
            extract: self.commands.extract.unwrap_or(defaults.extract),
            skip_update,
            index_template: self.paths.index_template,
            inject: defaults.inject,
        }
    }
}

/// Load configuration from the config file if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(root: &Path, path: &Path) -> Result<ConfigFile> {
    let config_path = root.join(path);
    if !config_path.exists() {
        tracing::debug!("No {} found, using defaults", config_path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;
    tracing::info!("Loaded config from {}", config_path.display());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = load_config(temp.path(), Path::new("apidocs.toml"))
            .unwrap()
            .into_generator(temp.path(), false);

        assert_eq!(config.root, temp.path());
        assert_eq!(config.reference_dir, PathBuf::from("src/content/docs/reference"));
        assert_eq!(config.package, "@sip-protocol/sdk");
        assert_eq!(
            config.update.to_string(),
            "npm update @sip-protocol/sdk @sip-protocol/types"
        );
        assert_eq!(config.extract.to_string(), "npx typedoc");
        assert!(config.index_template.is_none());
    }

    #[test]
    fn reads_overrides() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("apidocs.toml"),
            r#"
[package]
name = "@acme/sdk"
types = "@acme/types"

[paths]
reference = "docs/api"
index_template = "scripts/index.md"

[commands]
extract = ["pnpm", "exec", "typedoc", "--options", "typedoc.api.json"]
"#,
        )
        .unwrap();

        let config = load_config(temp.path(), Path::new("apidocs.toml"))
            .unwrap()
            .into_generator(temp.path(), true);

        assert_eq!(config.package, "@acme/sdk");
        assert_eq!(config.reference_dir, PathBuf::from("docs/api"));
        assert_eq!(config.update.to_string(), "npm update @acme/sdk @acme/types");
        assert_eq!(
            config.extract.to_string(),
            "pnpm exec typedoc --options typedoc.api.json"
        );
        assert_eq!(config.index_template, Some(PathBuf::from("scripts/index.md")));
        assert!(config.skip_update);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("apidocs.toml"), "[commands]\nupdate = []\n").unwrap();

        let result = load_config(temp.path(), Path::new("apidocs.toml"));

        assert!(result.is_err());
    }
}
