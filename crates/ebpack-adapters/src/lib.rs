//! Infrastructure adapters for ebpack.
//!
//! This crate implements the ports defined in `ebpack-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod descriptor_loader;
pub mod locator;
pub mod naming;
pub mod process;
pub mod scratch;

// Re-export commonly used adapters
pub use descriptor_loader::{load_all, load_descriptor};
pub use locator::SearchPathLocator;
pub use naming::{EasyBuildFullVersion, EasyBuildMns, HierarchicalMns};
pub use process::ProcessRunner;
pub use scratch::{MemoryScratchSpace, TempScratchSpace};
