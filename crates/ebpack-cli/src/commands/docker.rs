//! `ebpack docker` - generate a Dockerfile and run the engine on it.
//!
//! The Dockerfile only exists for the duration of the command; use
//! `--print` (or `ebpack render`) to keep its text.

use tracing::{info, instrument};

use crate::{cli::DockerArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(descriptors = args.descriptors.len(), build = args.build))]
pub fn execute(args: DockerArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let targets = ebpack_adapters::load_all(&args.descriptors)?;
    let packager = super::packager(&args.packaging, args.build, &config)?;

    let report = packager.package(&targets)?;
    info!(engine = %report.engine.display(), "Packaging finished");

    if output.is_json() {
        output.emit_json(&report)?;
        return Ok(());
    }

    output.success(&format!(
        "Generated {} for {}",
        report.dockerfile.file_name, report.dockerfile.params.modules
    ))?;
    output.info(&format!(
        "Engine: {} ({})",
        report.engine.display(),
        report.engine_version
    ))?;
    if let Some(image) = &report.image {
        output.success(&format!("Built image {image}"))?;
    }
    if args.print {
        output.header(&report.dockerfile.file_name)?;
        output.emit(&report.dockerfile.content)?;
    }
    Ok(())
}
