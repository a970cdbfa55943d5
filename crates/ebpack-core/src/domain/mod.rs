//! Core domain layer for ebpack.
//!
//! Pure logic only: no filesystem, no processes, no environment lookups.
//! Everything with side effects goes through the ports in
//! `crate::application::ports`.

pub mod descriptor;
pub mod dockerfile;
pub mod error;
pub mod identity;
pub mod template;

pub use descriptor::{BuildDescriptor, Toolchain};
pub use dockerfile::{
    DEFAULT_MODULE_INSTALL_ROOT, DOCKER_EXECUTABLE, DOCKER_SCRATCH_PREFIX,
    DOCKERFILE_PLACEHOLDERS, DockerfileParams, DockerfileTemplate, dockerfile_name, join_module_path,
};
pub use error::{DomainError, ErrorCategory};
pub use identity::{PackageIdentity, ToolRelease};
pub use template::{DescriptorTemplate, RenderContext};
