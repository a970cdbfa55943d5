//! Module naming schemes, as far as generated images need them.

use ebpack_core::{
    application::{ApplicationError, ports::ModuleNamingScheme},
    domain::BuildDescriptor,
    error::EbpackResult,
};

/// Names accepted by [`by_name`].
pub const SCHEME_NAMES: [&str; 2] = ["easybuild", "hierarchical"];

/// Flat `<name>/<version>` layout: everything lives under the install root.
#[derive(Debug, Clone, Copy, Default)]
pub struct EasyBuildMns;

impl ModuleNamingScheme for EasyBuildMns {
    fn determine_init_module_paths(&self, _: &BuildDescriptor) -> EbpackResult<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Lmod hierarchy: only `Core` is visible before a compiler is loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchicalMns;

impl ModuleNamingScheme for HierarchicalMns {
    fn determine_init_module_paths(&self, _: &BuildDescriptor) -> EbpackResult<Vec<String>> {
        Ok(vec!["Core".to_string()])
    }
}

/// Look up a scheme by its configuration name (case-insensitive).
pub fn by_name(name: &str) -> EbpackResult<Box<dyn ModuleNamingScheme>> {
    match name.to_ascii_lowercase().as_str() {
        "easybuild" | "easybuildmns" => Ok(Box::new(EasyBuildMns)),
        "hierarchical" | "hierarchicalmns" => Ok(Box::new(HierarchicalMns)),
        _ => Err(ApplicationError::UnknownNamingScheme {
            name: name.to_string(),
            known: SCHEME_NAMES.join(", "),
        }
        .into()),
    }
}
