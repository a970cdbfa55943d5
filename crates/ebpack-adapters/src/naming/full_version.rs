//! The EasyBuild full-version convention.

use ebpack_core::{
    application::{ApplicationError, ports::FullVersionResolver},
    domain::BuildDescriptor,
    error::EbpackResult,
};

/// `{version}{-toolchain-name-version}{versionsuffix}`, omitting the
/// toolchain part for the `system`/`dummy` toolchain.
#[derive(Debug, Clone, Copy, Default)]
pub struct EasyBuildFullVersion;

impl EasyBuildFullVersion {
    pub fn new() -> Self {
        Self
    }
}

impl FullVersionResolver for EasyBuildFullVersion {
    fn determine_full_version(&self, descriptor: &BuildDescriptor) -> EbpackResult<String> {
        let tc = &descriptor.toolchain;
        let toolchain = if tc.is_system() {
            String::new()
        } else {
            if tc.version.trim().is_empty() {
                return Err(ApplicationError::ResolverFailed {
                    collaborator: "full version resolver",
                    descriptor: descriptor.name.clone(),
                    reason: format!("toolchain '{}' has no version", tc.name),
                }
                .into());
            }
            format!("-{}-{}", tc.name, tc.version)
        };

        Ok(format!(
            "{}{}{}",
            descriptor.version, toolchain, descriptor.versionsuffix
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebpack_core::domain::Toolchain;

    #[test]
    fn system_toolchain_is_omitted() {
        let d = BuildDescriptor::new("foo", "1.2.3");
        assert_eq!(
            EasyBuildFullVersion.determine_full_version(&d).unwrap(),
            "1.2.3"
        );
    }

    #[test]
    fn toolchain_and_suffix_are_appended() {
        let d = BuildDescriptor::new("Python", "2.7.9")
            .with_toolchain(Toolchain::new("intel", "2015a"))
            .with_versionsuffix("-bare");
        assert_eq!(
            EasyBuildFullVersion.determine_full_version(&d).unwrap(),
            "2.7.9-intel-2015a-bare"
        );
    }

    #[test]
    fn dummy_toolchain_is_omitted() {
        let d = BuildDescriptor::new("GCC", "4.9.2")
            .with_toolchain(Toolchain::new("dummy", "dummy"))
            .with_versionsuffix("-binutils");
        assert_eq!(
            EasyBuildFullVersion.determine_full_version(&d).unwrap(),
            "4.9.2-binutils"
        );
    }

    #[test]
    fn toolchain_without_version_is_an_error() {
        let d = BuildDescriptor::new("foo", "1").with_toolchain(Toolchain::new("GCC", ""));
        assert!(EasyBuildFullVersion.determine_full_version(&d).is_err());
    }
}
