//! Parameters of a generated Dockerfile.

use serde::Serialize;

use crate::domain::{BuildDescriptor, DescriptorTemplate, DomainError, RenderContext, ToolRelease};

/// Executable name of the container engine.
pub const DOCKER_EXECUTABLE: &str = "docker";

/// Prefix of the scratch directory a Dockerfile is generated into.
pub const DOCKER_SCRATCH_PREFIX: &str = "easybuild-docker";

/// Directory inside the image under which modules are installed.
pub const DEFAULT_MODULE_INSTALL_ROOT: &str = "/app/modules/all";

/// Placeholder names every Dockerfile template must use, and nothing else.
pub const DOCKERFILE_PLACEHOLDERS: [&str; 5] = [
    "easybuild_version",
    "os_deps",
    "easybuild_filename",
    "init_modulepaths",
    "modules",
];

/// The five values substituted into a Dockerfile template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DockerfileParams {
    pub easybuild_version: String,
    pub os_deps: String,
    pub easybuild_filename: String,
    pub init_modulepaths: String,
    pub modules: String,
}

impl DockerfileParams {
    /// Derive parameters for one or more build targets.
    ///
    /// Easyconfig file names and module names are space-joined in target
    /// order; OS dependencies are the order-preserving union across targets.
    pub fn for_targets(
        targets: &[BuildDescriptor],
        release: &ToolRelease,
        init_modulepaths: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if targets.is_empty() {
            return Err(DomainError::NoBuildTargets);
        }
        for target in targets {
            target.validate()?;
        }

        let mut os_deps: Vec<&str> = Vec::new();
        for dep in targets.iter().flat_map(|t| &t.osdependencies) {
            let dep = dep.trim();
            if !dep.is_empty() && !os_deps.contains(&dep) {
                os_deps.push(dep);
            }
        }

        Ok(Self {
            easybuild_version: release.to_string(),
            os_deps: os_deps.join(" "),
            easybuild_filename: targets
                .iter()
                .map(BuildDescriptor::easyconfig_filename)
                .collect::<Vec<_>>()
                .join(" "),
            init_modulepaths: init_modulepaths.into(),
            modules: targets
                .iter()
                .map(BuildDescriptor::module_name)
                .collect::<Vec<_>>()
                .join(" "),
        })
    }

    pub fn to_context(&self) -> RenderContext {
        RenderContext::new()
            .with_variable("easybuild_version", &self.easybuild_version)
            .with_variable("os_deps", &self.os_deps)
            .with_variable("easybuild_filename", &self.easybuild_filename)
            .with_variable("init_modulepaths", &self.init_modulepaths)
            .with_variable("modules", &self.modules)
    }
}

/// A template checked to use exactly [`DOCKERFILE_PLACEHOLDERS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerfileTemplate {
    inner: DescriptorTemplate,
}

impl DockerfileTemplate {
    pub fn new(template: DescriptorTemplate) -> Result<Self, DomainError> {
        if let Some(required) = DOCKERFILE_PLACEHOLDERS
            .iter()
            .find(|p| !template.placeholders().iter().any(|t| t == *p))
        {
            return Err(DomainError::UnusedParameter {
                template: template.name().to_string(),
                parameter: required.to_string(),
            });
        }
        if let Some(unknown) = template
            .placeholders()
            .iter()
            .find(|p| !DOCKERFILE_PLACEHOLDERS.contains(&p.as_str()))
        {
            return Err(DomainError::UnresolvedPlaceholder {
                template: template.name().to_string(),
                placeholder: unknown.clone(),
            });
        }
        Ok(Self { inner: template })
    }

    /// Parse and check in one step.
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self, DomainError> {
        Self::new(DescriptorTemplate::parse(name, source)?)
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn render(&self, params: &DockerfileParams) -> Result<String, DomainError> {
        self.inner.render(&params.to_context())
    }
}

/// Join module path segments onto the install root, POSIX style.
pub fn join_module_path(root: &str, segments: &[String]) -> String {
    let mut path = root.trim_end_matches('/').to_string();
    if path.is_empty() {
        path.push('/');
    }
    for segment in segments {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        if !path.ends_with('/') {
            path.push('/');
        }
        path.push_str(segment);
    }
    path
}

/// `Dockerfile.{name}-{version}{versionsuffix}`
pub fn dockerfile_name(target: &BuildDescriptor) -> String {
    format!("Dockerfile.{}", target.label())
}
