//! Full API reference generation.

use anyhow::Result;
use sipdocs_generate::{ApiDocGenerator, GeneratorConfig};

/// Run the generate command.
pub fn run(config: GeneratorConfig) -> Result<()> {
    tracing::info!("Generating API documentation...");

    let result = ApiDocGenerator::new(config).run()?;

    tracing::info!(
        "API documentation generated for v{} ({} of {} pages updated) in {}ms",
        result.version,
        result.injected,
        result.scanned,
        result.duration_ms
    );
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
