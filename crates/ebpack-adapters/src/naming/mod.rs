//! Naming collaborators: full versions and module naming schemes.

mod full_version;
pub mod module_naming;

pub use full_version::EasyBuildFullVersion;
pub use module_naming::{EasyBuildMns, HierarchicalMns};
