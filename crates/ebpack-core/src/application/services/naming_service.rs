//! Package naming schemes.

use tracing::debug;

use crate::{
    application::ports::FullVersionResolver,
    domain::{BuildDescriptor, PackageIdentity, ToolRelease},
    error::EbpackResult,
};

/// Policy mapping a build descriptor to a package name and version.
pub trait PackageNamingScheme: Send + Sync {
    /// Package name.
    fn name(&self, descriptor: &BuildDescriptor) -> EbpackResult<String>;

    /// Package version.
    fn version(&self, descriptor: &BuildDescriptor) -> EbpackResult<String>;

    fn identity(&self, descriptor: &BuildDescriptor) -> EbpackResult<PackageIdentity> {
        Ok(PackageIdentity {
            package_name: self.name(descriptor)?,
            package_version: self.version(descriptor)?,
        })
    }
}

/// The default scheme.
///
/// The name is `{name}-{full version}`; the version is `eb-{tool release}`,
/// so two packagings of the same software by different tool releases stay
/// distinguishable.
pub struct EasyBuildPns {
    full_version: Box<dyn FullVersionResolver>,
    release: ToolRelease,
}

impl EasyBuildPns {
    pub fn new(full_version: Box<dyn FullVersionResolver>, release: ToolRelease) -> Self {
        Self {
            full_version,
            release,
        }
    }

    pub fn release(&self) -> &ToolRelease {
        &self.release
    }
}

impl PackageNamingScheme for EasyBuildPns {
    fn name(&self, descriptor: &BuildDescriptor) -> EbpackResult<String> {
        debug!(?descriptor, "Descriptor passed to name()");
        descriptor.validate()?;
        let full_version = self.full_version.determine_full_version(descriptor)?;
        Ok(format!("{}-{}", descriptor.name, full_version))
    }

    fn version(&self, descriptor: &BuildDescriptor) -> EbpackResult<String> {
        descriptor.validate()?;
        Ok(format!("eb-{}", self.release))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::MockFullVersionResolver;
    use crate::domain::{DomainError, Toolchain};
    use crate::error::EbpackError;

    fn scheme_with(resolved: &'static str, release: &str) -> EasyBuildPns {
        let mut resolver = MockFullVersionResolver::new();
        resolver
            .expect_determine_full_version()
            .returning(move |_| Ok(resolved.to_string()));
        EasyBuildPns::new(Box::new(resolver), ToolRelease::new(release).unwrap())
    }

    #[test]
    fn scenario_foo() {
        let pns = scheme_with("1.2.3", "4.5.0");
        let foo = BuildDescriptor::new("foo", "1.2.3").with_osdependency("libssl-dev");

        assert_eq!(pns.name(&foo).unwrap(), "foo-1.2.3");
        assert_eq!(pns.version(&foo).unwrap(), "eb-4.5.0");
    }

    #[test]
    fn name_uses_resolver_output_verbatim() {
        let pns = scheme_with("2.7.9-GCC-4.9.2-bare", "2.8.0");
        let py = BuildDescriptor::new("Python", "2.7.9")
            .with_toolchain(Toolchain::new("GCC", "4.9.2"))
            .with_versionsuffix("-bare");
        assert_eq!(pns.name(&py).unwrap(), "Python-2.7.9-GCC-4.9.2-bare");
    }

    #[test]
    fn version_ignores_descriptor_version_fields() {
        let pns = scheme_with("unused", "4.5.0");
        let a = BuildDescriptor::new("a", "1.0");
        let b = BuildDescriptor::new("b", "9.9.9").with_versionsuffix("-x");
        assert_eq!(pns.version(&a).unwrap(), pns.version(&b).unwrap());
        assert_eq!(pns.version(&b).unwrap(), "eb-4.5.0");
    }

    #[test]
    fn malformed_descriptor_is_rejected_by_both() {
        let pns = scheme_with("1", "4.5.0");
        let bad = BuildDescriptor::new("", "1");
        assert!(matches!(
            pns.name(&bad),
            Err(EbpackError::Domain(DomainError::MissingRequiredField { field: "name" }))
        ));
        assert!(pns.version(&bad).is_err());
    }

    #[test]
    fn resolver_error_propagates() {
        let mut resolver = MockFullVersionResolver::new();
        resolver.expect_determine_full_version().returning(|d| {
            Err(ApplicationError::ResolverFailed {
                collaborator: "full version resolver",
                descriptor: d.name.clone(),
                reason: "toolchain version missing".into(),
            }
            .into())
        });
        let pns = EasyBuildPns::new(Box::new(resolver), ToolRelease::new("1").unwrap());

        let err = pns.name(&BuildDescriptor::new("foo", "1")).unwrap_err();
        assert!(err.to_string().contains("toolchain version missing"));
    }

    #[test]
    fn identity_combines_both() {
        let pns = scheme_with("1.2.3", "4.5.0");
        let id = pns.identity(&BuildDescriptor::new("foo", "1.2.3")).unwrap();
        assert_eq!(id.package_name, "foo-1.2.3");
        assert_eq!(id.package_version, "eb-4.5.0");
    }
}
