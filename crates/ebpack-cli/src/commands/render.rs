//! `ebpack render` - print a Dockerfile without touching docker or disk.

use tracing::instrument;

use crate::{cli::RenderArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(descriptors = args.descriptors.len()))]
pub fn execute(args: RenderArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let targets = ebpack_adapters::load_all(&args.descriptors)?;
    let packager = super::packager(&args.packaging, false, &config)?;
    let rendered = packager.render(&targets)?;

    if output.is_json() {
        output.emit_json(&rendered)?;
    } else {
        output.emit(&rendered.content)?;
    }
    Ok(())
}
