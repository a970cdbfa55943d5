//! Build descriptors: one buildable software unit as seen by the packager.
//!
//! A descriptor is consumed read-only. Only the identity fields and the OS
//! dependency list matter here; everything else an easyconfig may carry is
//! ignored.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Toolchain names that do not contribute to the full version.
const TRIVIAL_TOOLCHAINS: [&str; 2] = ["system", "dummy"];

/// Compiler toolchain a descriptor is built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolchain {
    pub name: String,
    #[serde(default)]
    pub version: String,
}

impl Toolchain {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// The `system` toolchain.
    pub fn system() -> Self {
        Self::new("system", "")
    }

    /// `true` for `system` and the legacy `dummy` toolchain.
    pub fn is_system(&self) -> bool {
        TRIVIAL_TOOLCHAINS.contains(&self.name.as_str())
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::system()
    }
}

/// Identity and OS requirements of one buildable software unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDescriptor {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub versionsuffix: String,
    #[serde(default)]
    pub toolchain: Toolchain,
    #[serde(default)]
    pub osdependencies: Vec<String>,
}

impl BuildDescriptor {
    /// Descriptor on the system toolchain with no suffix and no OS deps.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            versionsuffix: String::new(),
            toolchain: Toolchain::system(),
            osdependencies: Vec::new(),
        }
    }

    pub fn with_versionsuffix(mut self, suffix: impl Into<String>) -> Self {
        self.versionsuffix = suffix.into();
        self
    }

    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    pub fn with_osdependency(mut self, dep: impl Into<String>) -> Self {
        self.osdependencies.push(dep.into());
        self
    }

    /// Check that the identity fields are usable.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "name" });
        }
        if self.version.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "version" });
        }
        // name, version and suffix end up in file names
        for (field, value) in [
            ("name", &self.name),
            ("version", &self.version),
            ("versionsuffix", &self.versionsuffix),
        ] {
            if value.contains('/') || value.contains('\\') {
                return Err(DomainError::InvalidDescriptor {
                    name: self.name.clone(),
                    reason: format!("{field} cannot contain path separators"),
                });
            }
        }
        // rendered Dockerfiles place these inside single-quoted shell strings
        let quoted = [
            ("name", &self.name),
            ("version", &self.version),
            ("versionsuffix", &self.versionsuffix),
            ("toolchain.name", &self.toolchain.name),
            ("toolchain.version", &self.toolchain.version),
        ]
        .into_iter()
        .chain(self.osdependencies.iter().map(|d| ("osdependencies", d)));
        for (field, value) in quoted {
            if value.contains('\'') || value.chars().any(char::is_control) {
                return Err(DomainError::InvalidDescriptor {
                    name: self.name.clone(),
                    reason: format!("{field} cannot contain quotes or control characters"),
                });
            }
        }
        Ok(())
    }

    /// `{name}-{version}{versionsuffix}`
    pub fn label(&self) -> String {
        format!("{}-{}{}", self.name, self.version, self.versionsuffix)
    }

    /// File name of the easyconfig the tool processes: `{label}.eb`.
    pub fn easyconfig_filename(&self) -> String {
        format!("{}.eb", self.label())
    }

    /// Environment module name: `{name}/{version}{versionsuffix}`.
    pub fn module_name(&self) -> String {
        format!("{}/{}{}", self.name, self.version, self.versionsuffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_names_include_suffix() {
        let d = BuildDescriptor::new("Python", "2.7.9").with_versionsuffix("-bare");
        assert_eq!(d.label(), "Python-2.7.9-bare");
        assert_eq!(d.easyconfig_filename(), "Python-2.7.9-bare.eb");
        assert_eq!(d.module_name(), "Python/2.7.9-bare");
    }

    #[test]
    fn derived_names_without_suffix() {
        let d = BuildDescriptor::new("foo", "1.2.3");
        assert_eq!(d.easyconfig_filename(), "foo-1.2.3.eb");
        assert_eq!(d.module_name(), "foo/1.2.3");
    }

    #[test]
    fn validate_rejects_empty_name_and_version() {
        assert_eq!(
            BuildDescriptor::new("", "1.0").validate(),
            Err(DomainError::MissingRequiredField { field: "name" })
        );
        assert_eq!(
            BuildDescriptor::new("foo", "  ").validate(),
            Err(DomainError::MissingRequiredField { field: "version" })
        );
    }

    #[test]
    fn validate_rejects_path_separators() {
        let d = BuildDescriptor::new("../etc", "1.0");
        assert!(matches!(
            d.validate(),
            Err(DomainError::InvalidDescriptor { .. })
        ));
    }

    #[test]
    fn validate_rejects_shell_breaking_characters() {
        let cases = [
            BuildDescriptor::new("foo", "1.0").with_osdependency("libssl-dev' && rm -rf /"),
            BuildDescriptor::new("foo", "1.0").with_versionsuffix("-it's"),
            BuildDescriptor::new("foo", "1.0\nRUN id"),
            BuildDescriptor::new("foo", "1.0").with_toolchain(Toolchain::new("GCC", "4'9")),
        ];
        for d in cases {
            let err = d.validate().unwrap_err();
            assert!(
                err.to_string().contains("cannot contain quotes"),
                "{d:?}: {err}"
            );
        }
    }

    #[test]
    fn plus_signs_and_dots_are_valid() {
        let d = BuildDescriptor::new("libsigc++", "2.10.0").with_osdependency("libc6-dev");
        assert!(d.validate().is_ok());
    }

    #[test]
    fn empty_suffix_is_valid() {
        assert!(BuildDescriptor::new("foo", "1.2.3").validate().is_ok());
    }

    #[test]
    fn dummy_toolchain_is_system() {
        assert!(Toolchain::new("dummy", "dummy").is_system());
        assert!(!Toolchain::new("GCC", "4.9.2").is_system());
    }

    #[test]
    fn deserialises_with_defaults() {
        let d: BuildDescriptor =
            serde_json::from_str(r#"{"name": "foo", "version": "1.2.3"}"#).unwrap();
        assert_eq!(d.versionsuffix, "");
        assert!(d.toolchain.is_system());
        assert!(d.osdependencies.is_empty());
    }
}
