//! Command handlers.
//!
//! Each handler turns parsed arguments plus [`AppConfig`] into core calls
//! and writes the result through the `OutputManager`. Adapter wiring shared
//! by several commands lives here.

pub mod completions;
pub mod config;
pub mod docker;
pub mod name;
pub mod render;

use ebpack_adapters::{
    EasyBuildFullVersion, ProcessRunner, SearchPathLocator, TempScratchSpace, builtin_templates,
    naming::module_naming,
};
use ebpack_core::{
    application::{DockerPackager, EasyBuildPns, PackagerPorts, PackagerSettings},
    domain::ToolRelease,
};

use crate::{cli::PackagingArgs, config::AppConfig, error::CliResult};

/// Tool release from the flag, else the configuration.
fn tool_release(flag: Option<&str>, config: &AppConfig) -> CliResult<ToolRelease> {
    let value = flag.unwrap_or(&config.tool.version);
    Ok(ToolRelease::new(value)?)
}

fn naming_scheme(release: ToolRelease) -> EasyBuildPns {
    EasyBuildPns::new(Box::new(EasyBuildFullVersion::new()), release)
}

/// Wire a packager from configuration, with command-line overrides applied.
fn packager(
    args: &PackagingArgs,
    build_image: bool,
    config: &AppConfig,
) -> CliResult<DockerPackager> {
    let release = tool_release(args.tool_version.as_deref(), config)?;
    let template_name = args.template.as_deref().unwrap_or(&config.docker.template);
    let scheme_name = args
        .naming_scheme
        .as_deref()
        .unwrap_or(&config.modules.naming_scheme);

    let template = builtin_templates::by_name(template_name)?;
    let modules = module_naming::by_name(scheme_name)?;

    let scratch = match &config.scratch.base_dir {
        Some(base) => TempScratchSpace::in_dir(base),
        None => TempScratchSpace::new(),
    };

    let settings = PackagerSettings {
        executable: config.docker.executable.clone(),
        module_install_root: config.modules.install_root.clone(),
        build_image: build_image || config.docker.build_image,
        ..PackagerSettings::new(release.clone())
    };

    let ports = PackagerPorts {
        naming: Box::new(naming_scheme(release)),
        modules,
        locator: Box::new(SearchPathLocator::from_env()),
        runner: Box::new(ProcessRunner::new()),
        scratch: Box::new(scratch),
    };

    Ok(DockerPackager::new(settings, template, ports))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> PackagingArgs {
        PackagingArgs {
            tool_version: None,
            naming_scheme: None,
            template: None,
        }
    }

    #[test]
    fn flag_overrides_configured_release() {
        let config = AppConfig::default();
        assert_eq!(tool_release(None, &config).unwrap().as_str(), "2.8.0");
        assert_eq!(tool_release(Some("4.5.0"), &config).unwrap().as_str(), "4.5.0");
    }

    #[test]
    fn blank_release_is_rejected() {
        assert!(tool_release(Some(" "), &AppConfig::default()).is_err());
    }

    #[test]
    fn packager_uses_configuration() {
        let mut config = AppConfig::default();
        config.docker.executable = "podman".into();
        config.docker.build_image = true;

        let p = packager(&no_overrides(), false, &config).unwrap();
        assert_eq!(p.settings().executable, "podman");
        assert!(p.settings().build_image);
        assert_eq!(p.settings().release.as_str(), "2.8.0");
    }

    #[test]
    fn unknown_scheme_fails_wiring() {
        let args = PackagingArgs {
            naming_scheme: Some("flat".into()),
            ..no_overrides()
        };
        assert!(packager(&args, false, &AppConfig::default()).is_err());
    }

    #[test]
    fn unknown_template_fails_wiring() {
        let args = PackagingArgs {
            template: Some("centos-7".into()),
            ..no_overrides()
        };
        assert_eq!(
            packager(&args, false, &AppConfig::default())
                .err()
                .map(|e| e.exit_code()),
            Some(4)
        );
    }
}
