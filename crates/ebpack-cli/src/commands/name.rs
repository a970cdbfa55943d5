//! `ebpack name` - print the package identity of a descriptor.

use tracing::instrument;

use ebpack_core::application::PackageNamingScheme;

use crate::{cli::NameArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(descriptor = %args.descriptor.display()))]
pub fn execute(args: NameArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let descriptor = ebpack_adapters::load_descriptor(&args.descriptor)?;
    let release = super::tool_release(args.tool_version.as_deref(), &config)?;
    let identity = super::naming_scheme(release).identity(&descriptor)?;

    if output.is_json() {
        output.emit_json(&identity)?;
    } else {
        output.emit(&format!("name:    {}", identity.package_name))?;
        output.emit(&format!("version: {}", identity.package_version))?;
    }
    Ok(())
}
