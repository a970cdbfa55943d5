//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `ebpack-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `FullVersionResolver`, `ModuleNamingScheme`: naming collaborators
//!   - `ToolLocator`, `CommandRunner`: the container engine
//!   - `ScratchSpace`: temporary directories and files

pub mod output;

pub use output::{
    CommandOutput, CommandRunner, FullVersionResolver, ModuleNamingScheme, ScratchSpace,
    ToolLocator,
};

#[cfg(test)]
pub use output::{
    MockCommandRunner, MockFullVersionResolver, MockModuleNamingScheme, MockScratchSpace,
    MockToolLocator,
};
