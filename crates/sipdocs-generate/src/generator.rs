//! API reference generation pipeline.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use sipdocs_frontmatter::{inject_tree, InjectError, InjectOptions};

use crate::package::installed_version;
use crate::process::{CommandSpec, ProcessError, ProcessRunner, SystemRunner};
use crate::templates::IndexTemplate;

/// Package whose declarations are documented.
pub const DEFAULT_PACKAGE: &str = "@sip-protocol/sdk";

/// Companion type declarations package, updated alongside the SDK.
pub const DEFAULT_TYPES_PACKAGE: &str = "@sip-protocol/types";

/// Reference section of the docs site, relative to the project root.
pub const DEFAULT_REFERENCE_DIR: &str = "src/content/docs/reference";

/// Configuration for generating the API reference.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Project root; commands run here and `node_modules` is searched from here upwards
    pub root: PathBuf,

    /// Output directory for reference pages, relative to `root`
    pub reference_dir: PathBuf,

    /// Documented package
    pub package: String,

    /// Refreshes the installed package
    pub update: CommandSpec,

    /// Runs the extraction tool
    pub extract: CommandSpec,

    /// Skip the dependency refresh step
    pub skip_update: bool,

    /// Override for the index page template, relative to `root`
    pub index_template: Option<PathBuf>,

    /// Which generated files receive frontmatter
    pub inject: InjectOptions,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            reference_dir: PathBuf::from(DEFAULT_REFERENCE_DIR),
            package: DEFAULT_PACKAGE.to_string(),
            update: CommandSpec::new("npm", ["update", DEFAULT_PACKAGE, DEFAULT_TYPES_PACKAGE]),
            extract: CommandSpec::new("npx", ["typedoc"]),
            skip_update: false,
            index_template: None,
            inject: InjectOptions::default(),
        }
    }
}

/// Result of a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Reference directory that was written
    pub output_dir: PathBuf,

    /// Pages that received frontmatter this run
    pub injected: usize,

    /// Candidate pages found, including ones that already had frontmatter
    pub scanned: usize,

    /// Whether the extraction tool's overview file was deleted
    pub overview_removed: bool,

    /// Installed package version written into the index
    pub version: String,

    /// Total run time in milliseconds
    pub duration_ms: u64,
}

/// Errors that can occur during generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Extraction failed: {0}")]
    Extraction(#[source] ProcessError),

    #[error("Failed to add frontmatter: {0}")]
    Inject(#[from] InjectError),

    #[error("Failed to render index template: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Could not read installed version of {package}: {message}")]
    PackageVersion { package: String, message: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Process exit code for this failure.
    ///
    /// Extraction failures reuse the tool's own code when it has one.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Extraction(e) => e.exit_code().filter(|code| *code != 0).unwrap_or(1),
            _ => 1,
        }
    }
}

/// Regenerates the API reference pages.
pub struct ApiDocGenerator<R = SystemRunner> {
    config: GeneratorConfig,
    runner: R,
}

impl ApiDocGenerator<SystemRunner> {
    /// Create a generator that runs real commands.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: ProcessRunner> ApiDocGenerator<R> {
    /// Create a generator with a custom command runner.
    pub fn with_runner(config: GeneratorConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Absolute-or-root-relative path of the reference directory.
    pub fn reference_dir(&self) -> PathBuf {
        self.config.root.join(&self.config.reference_dir)
    }

    /// Run the whole pipeline.
    ///
    /// Only the dependency refresh may fail without aborting the run.
    pub fn run(&self) -> Result<GenerateReport, GenerateError> {
        let start = Instant::now();
        let reference_dir = self.reference_dir();

        self.refresh_dependencies();

        // Resolve everything the index needs before any page is touched
        let template = self.index_template()?;
        let version = installed_version(&self.config.root, &self.config.package)?;
        tracing::debug!("Using {} v{}", self.config.package, version);

        fs::create_dir_all(&reference_dir).map_err(|source| GenerateError::Io {
            path: reference_dir.clone(),
            source,
        })?;

        self.extract()?;

        tracing::info!("Adding frontmatter to generated files...");
        let injected = inject_tree(&reference_dir, &self.config.inject)?;
        tracing::info!("Added frontmatter to {} files", injected.modified);

        let overview_removed = self.remove_overview(&reference_dir)?;

        tracing::info!("Creating reference index...");
        self.write_index(&reference_dir, &template, &version)?;

        Ok(GenerateReport {
            output_dir: reference_dir,
            injected: injected.modified,
            scanned: injected.scanned,
            overview_removed,
            version,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Update the package, keeping the installed version on failure.
    fn refresh_dependencies(&self) {
        if self.config.skip_update {
            tracing::info!("Skipping update of {}", self.config.package);
            return;
        }

        tracing::info!("Updating {} to latest...", self.config.package);
        if let Err(e) = self.runner.run(&self.config.update, &self.config.root) {
            tracing::warn!("Could not update SDK, using installed version ({})", e);
        }
    }

    /// Run the extraction tool; there is nothing to fall back to.
    fn extract(&self) -> Result<(), GenerateError> {
        tracing::info!("Running {}...", self.config.extract);
        self.runner
            .run(&self.config.extract, &self.config.root)
            .map_err(GenerateError::Extraction)
    }

    /// Delete the extraction tool's overview page, superseded by the index.
    fn remove_overview(&self, reference_dir: &Path) -> Result<bool, GenerateError> {
        let overview = reference_dir.join(&self.config.inject.overview_name);
        if !overview.exists() {
            return Ok(false);
        }

        fs::remove_file(&overview).map_err(|source| GenerateError::Io {
            path: overview.clone(),
            source,
        })?;
        tracing::info!("Removed auto-generated {}", self.config.inject.overview_name);

        Ok(true)
    }

    /// Built-in index template, or the configured override.
    fn index_template(&self) -> Result<IndexTemplate, GenerateError> {
        match &self.config.index_template {
            Some(path) => IndexTemplate::from_file(&self.config.root.join(path)),
            None => IndexTemplate::builtin(),
        }
    }

    /// Overwrite the reference index page.
    fn write_index(
        &self,
        reference_dir: &Path,
        template: &IndexTemplate,
        version: &str,
    ) -> Result<(), GenerateError> {
        let index = template.render(&self.config.package, version)?;

        let index_path = reference_dir.join(&self.config.inject.index_name);
        fs::write(&index_path, index).map_err(|source| GenerateError::Io {
            path: index_path,
            source,
        })
    }
}
