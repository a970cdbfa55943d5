//! ebpack Core - Hexagonal Architecture Implementation
//!
//! Package naming and Dockerfile generation for software installed by
//! EasyBuild, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            ebpack-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (EasyBuildPns, DockerPackager)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Locator, Runner, Scratch, Naming, ...) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    ebpack-adapters (Infrastructure)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ebpack_core::{
//!     application::{DockerPackager, PackagerSettings},
//!     domain::{BuildDescriptor, ToolRelease},
//! };
//!
//! let settings = PackagerSettings::new(ToolRelease::new("2.8.0").unwrap());
//! let packager = DockerPackager::new(settings, template, ports);
//! let report = packager
//!     .package(&[BuildDescriptor::new("foo", "1.2.3")])
//!     .unwrap();
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DockerPackager, EasyBuildPns, GenerationReport, PackageNamingScheme, PackagerPorts,
        PackagerSettings, RenderedDockerfile,
        ports::{CommandRunner, FullVersionResolver, ModuleNamingScheme, ScratchSpace, ToolLocator},
    };
    pub use crate::domain::{
        BuildDescriptor, DescriptorTemplate, DockerfileTemplate, PackageIdentity, RenderContext,
        ToolRelease, Toolchain,
    };
    pub use crate::error::{EbpackError, EbpackResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
