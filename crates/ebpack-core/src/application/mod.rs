//! Application layer for ebpack.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (EasyBuildPns, DockerPackager)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Scratch**: Scoped ownership of temporary directories
//! - **Errors**: Application-specific error types

pub mod error;
pub mod ports;
pub mod scratch;
pub mod services;

// Re-export main services
pub use services::{
    DockerPackager, EasyBuildPns, GenerationReport, PackageNamingScheme, PackagerPorts,
    PackagerSettings, RenderedDockerfile,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    CommandOutput, CommandRunner, FullVersionResolver, ModuleNamingScheme, ScratchSpace,
    ToolLocator,
};

pub use error::ApplicationError;
pub use scratch::ScratchGuard;
