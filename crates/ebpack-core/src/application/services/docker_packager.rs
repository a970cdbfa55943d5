//! Docker packaging - generates a Dockerfile for one or more build targets.
//!
//! Workflow:
//! 1. Check that the container engine is on the search path
//! 2. Render the Dockerfile template (no filesystem mutation yet)
//! 3. Write it into a fresh scratch directory
//! 4. Query the engine version from inside that directory
//! 5. Optionally build the image
//! 6. Remove the scratch directory, on every exit path

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError, ScratchGuard,
        ports::{CommandRunner, ModuleNamingScheme, ScratchSpace, ToolLocator},
        services::PackageNamingScheme,
    },
    domain::{
        BuildDescriptor, DEFAULT_MODULE_INSTALL_ROOT, DOCKER_EXECUTABLE, DOCKER_SCRATCH_PREFIX,
        DockerfileParams, DockerfileTemplate, DomainError, ToolRelease, dockerfile_name,
        join_module_path,
    },
    error::{EbpackError, EbpackResult},
};

/// Tunables of a [`DockerPackager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagerSettings {
    /// Tool release pinned into the image.
    pub release: ToolRelease,
    /// Container engine executable name (or path).
    pub executable: String,
    /// Module install root inside the image.
    pub module_install_root: String,
    /// Run `docker build` after generating the Dockerfile.
    pub build_image: bool,
}

impl PackagerSettings {
    pub fn new(release: ToolRelease) -> Self {
        Self {
            release,
            executable: DOCKER_EXECUTABLE.to_string(),
            module_install_root: DEFAULT_MODULE_INSTALL_ROOT.to_string(),
            build_image: false,
        }
    }
}

/// Adapters a [`DockerPackager`] talks to.
pub struct PackagerPorts {
    pub naming: Box<dyn PackageNamingScheme>,
    pub modules: Box<dyn ModuleNamingScheme>,
    pub locator: Box<dyn ToolLocator>,
    pub runner: Box<dyn CommandRunner>,
    pub scratch: Box<dyn ScratchSpace>,
}

/// A rendered Dockerfile that has not been written anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDockerfile {
    /// `Dockerfile.{name}-{version}{versionsuffix}` of the first target.
    pub file_name: String,
    pub content: String,
    pub params: DockerfileParams,
}

/// What a successful [`DockerPackager::generate`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub engine: PathBuf,
    pub engine_version: String,
    pub dockerfile: RenderedDockerfile,
    /// Tag of the built image, when image building is enabled.
    pub image: Option<String>,
}

/// Generates Dockerfiles that install the packaging tool and the target
/// software, then load its modules at login.
pub struct DockerPackager {
    settings: PackagerSettings,
    template: DockerfileTemplate,
    ports: PackagerPorts,
}

impl DockerPackager {
    pub fn new(settings: PackagerSettings, template: DockerfileTemplate, ports: PackagerPorts) -> Self {
        Self {
            settings,
            template,
            ports,
        }
    }

    pub fn settings(&self) -> &PackagerSettings {
        &self.settings
    }

    /// Check the existence of the container engine executable.
    pub fn check_availability(&self) -> EbpackResult<PathBuf> {
        let tool = &self.settings.executable;
        let path = self
            .ports
            .locator
            .locate(tool)
            .ok_or_else(|| ApplicationError::ToolNotFound { tool: tool.clone() })?;

        info!(
            "Selected packaging tool '{}' found at {}",
            tool,
            path.display()
        );
        Ok(path)
    }

    /// Render the Dockerfile for `targets` without touching the filesystem.
    #[instrument(skip_all, fields(targets = targets.len()))]
    pub fn render(&self, targets: &[BuildDescriptor]) -> EbpackResult<RenderedDockerfile> {
        let first = targets.first().ok_or(DomainError::NoBuildTargets)?;
        for target in targets {
            target.validate()?;
        }

        let segments = self.ports.modules.determine_init_module_paths(first)?;
        let init_modulepaths = join_module_path(&self.settings.module_install_root, &segments);

        let params = DockerfileParams::for_targets(targets, &self.settings.release, init_modulepaths)?;
        let content = self.template.render(&params)?;

        Ok(RenderedDockerfile {
            file_name: dockerfile_name(first),
            content,
            params,
        })
    }

    /// Check the engine, then generate. The main entry point.
    pub fn package(&self, targets: &[BuildDescriptor]) -> EbpackResult<GenerationReport> {
        let engine = self.check_availability()?;
        self.generate(&engine, targets)
    }

    /// Generate the Dockerfile in a scratch directory and run `engine` there.
    ///
    /// The scratch directory is gone when this returns, whatever the outcome.
    #[instrument(skip_all, fields(engine = %engine.display(), targets = targets.len()))]
    pub fn generate(
        &self,
        engine: &Path,
        targets: &[BuildDescriptor],
    ) -> EbpackResult<GenerationReport> {
        let dockerfile = self.render(targets)?;
        let image = if self.settings.build_image {
            Some(self.ports.naming.identity(&targets[0])?.image_tag())
        } else {
            None
        };

        let guard = ScratchGuard::create(self.ports.scratch.as_ref(), DOCKER_SCRATCH_PREFIX)?;
        let outcome = self.run_in_scratch(engine, guard.path(), &dockerfile, image.as_deref());
        let cleanup = guard.release();

        let engine_version = settle(outcome, cleanup)?;
        info!(dockerfile = %dockerfile.file_name, "Dockerfile generated");

        Ok(GenerationReport {
            engine: engine.to_path_buf(),
            engine_version,
            dockerfile,
            image,
        })
    }

    fn run_in_scratch(
        &self,
        engine: &Path,
        dir: &Path,
        dockerfile: &RenderedDockerfile,
        image: Option<&str>,
    ) -> EbpackResult<String> {
        let file = self
            .ports
            .scratch
            .write_file(dir, &dockerfile.file_name, &dockerfile.content)?;

        let version = self
            .ports
            .runner
            .run(engine, &["--version".to_string()], dir)?;

        if let Some(tag) = image {
            info!(image = %tag, "Building image");
            let args = [
                "build".to_string(),
                "-f".to_string(),
                file.display().to_string(),
                "-t".to_string(),
                tag.to_string(),
                ".".to_string(),
            ];
            self.ports.runner.run(engine, &args, dir)?;
        }

        Ok(version.stdout.trim().to_string())
    }
}

/// Combine the body outcome with the cleanup outcome; the body error wins.
fn settle<T>(outcome: EbpackResult<T>, cleanup: EbpackResult<()>) -> EbpackResult<T> {
    match (outcome, cleanup) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(cleanup)) => Err(cleanup),
        (Err(primary), Ok(())) => Err(primary),
        (Err(primary), Err(cleanup)) => Err(EbpackError::Application(
            ApplicationError::CleanupFailed {
                primary: Box::new(primary),
                cleanup: Box::new(cleanup),
            },
        )),
    }
}
