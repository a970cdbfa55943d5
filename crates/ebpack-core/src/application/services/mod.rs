//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "name a package" or "generate a Dockerfile".

pub mod docker_packager;
pub mod naming_service;

pub use docker_packager::{
    DockerPackager, GenerationReport, PackagerPorts, PackagerSettings, RenderedDockerfile,
};
pub use naming_service::{EasyBuildPns, PackageNamingScheme};
