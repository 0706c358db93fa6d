//! sipdocs CLI - regenerates the API reference of the SIP Protocol docs site.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sipdocs_generate::GenerateError;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "sipdocs")]
#[command(about = "Regenerate the API reference from the published SDK")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the config file, relative to the project root
    #[arg(short, long, default_value = "apidocs.toml", global = true)]
    config: PathBuf,

    /// Project root containing package.json and node_modules
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Update the SDK, run TypeDoc and prepare the reference pages (default)
    Generate {
        /// Use the installed SDK without updating it
        #[arg(long)]
        skip_update: bool,
    },

    /// Add frontmatter to markdown pages that lack it
    Frontmatter {
        /// Directory to process (defaults to the reference directory)
        dir: Option<PathBuf>,
    },

    /// List reference pages the site would not render
    Check {
        /// Directory to check (defaults to the reference directory)
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Exit status for a failed run.
///
/// Looks through the whole error chain, so added context keeps the
/// extraction tool's own code.
fn exit_code(error: &anyhow::Error) -> u8 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<GenerateError>())
        .map(GenerateError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(&cli.root, &cli.config)?;

    // Execute command
    match cli.command.unwrap_or(Commands::Generate { skip_update: false }) {
        Commands::Generate { skip_update } => {
            commands::generate::run(config.into_generator(&cli.root, skip_update))?;
        }
        Commands::Frontmatter { dir } => {
            let dir = dir.unwrap_or_else(|| cli.root.join(config.reference_dir()));
            commands::frontmatter::run(&dir)?;
        }
        Commands::Check { dir } => {
            let dir = dir.unwrap_or_else(|| cli.root.join(config.reference_dir()));
            commands::check::run(&dir)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use sipdocs_generate::ProcessError;

    fn extraction_failure(code: Option<i32>) -> anyhow::Error {
        GenerateError::Extraction(ProcessError::Failed {
            command: "npx typedoc".to_string(),
            code,
        })
        .into()
    }

    #[test]
    fn keeps_extraction_exit_code() {
        assert_eq!(exit_code(&extraction_failure(Some(4))), 4);
    }

    #[test]
    fn keeps_exit_code_through_context() {
        let err = Err::<(), _>(extraction_failure(Some(4)))
            .context("Failed to generate API docs")
            .unwrap_err();

        assert_eq!(exit_code(&err), 4);
    }

    #[test]
    fn other_failures_exit_with_one() {
        assert_eq!(exit_code(&extraction_failure(None)), 1);
        assert_eq!(exit_code(&extraction_failure(Some(300))), 1);
        assert_eq!(exit_code(&anyhow::anyhow!("Failed to parse apidocs.toml")), 1);
    }
}
