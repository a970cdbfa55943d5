//! Loads build descriptors from files.
//!
//! # Format
//!
//! One descriptor per file, TOML (`.toml`) or JSON (`.json`):
//!
//! ```toml
//! name           = "Python"
//! version        = "2.7.9"
//! versionsuffix  = "-bare"               # optional
//! osdependencies = ["libssl-dev"]        # optional
//!
//! [toolchain]                            # optional, defaults to system
//! name    = "GCC"
//! version = "4.9.2"
//! ```
//!
//! Files are deserialised and then validated, so a loaded descriptor is
//! always safe to hand to the naming scheme.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use ebpack_core::{application::ApplicationError, domain::BuildDescriptor, error::EbpackResult};

/// Supported descriptor encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    Toml,
    Json,
}

impl DescriptorFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse descriptor text in the given format.
pub fn parse_descriptor(
    source: &str,
    format: DescriptorFormat,
    origin: &Path,
) -> EbpackResult<BuildDescriptor> {
    let descriptor: BuildDescriptor = match format {
        DescriptorFormat::Toml => {
            toml::from_str(source).map_err(|e| load_error(origin, e.message()))?
        }
        DescriptorFormat::Json => {
            serde_json::from_str(source).map_err(|e| load_error(origin, &e.to_string()))?
        }
    };
    descriptor.validate()?;
    Ok(descriptor)
}

/// Read and parse one descriptor file.
#[instrument(fields(path = %path.display()))]
pub fn load_descriptor(path: &Path) -> EbpackResult<BuildDescriptor> {
    let format = DescriptorFormat::from_path(path)
        .ok_or_else(|| load_error(path, "unsupported extension (expected .toml or .json)"))?;

    let source = fs::read_to_string(path).map_err(|e| load_error(path, &e.to_string()))?;
    let descriptor = parse_descriptor(&source, format, path)?;

    debug!(label = %descriptor.label(), "Loaded descriptor");
    Ok(descriptor)
}

/// Load several descriptor files, stopping at the first failure.
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> EbpackResult<Vec<BuildDescriptor>> {
    paths.iter().map(|p| load_descriptor(p.as_ref())).collect()
}

fn load_error(path: &Path, reason: &str) -> ebpack_core::error::EbpackError {
    ApplicationError::DescriptorLoad {
        path: PathBuf::from(path),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebpack_core::domain::Toolchain;
    use ebpack_core::error::EbpackError;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_minimal_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "foo.toml",
            "name = \"foo\"\nversion = \"1.2.3\"\nosdependencies = [\"libssl-dev\"]\n",
        );

        let d = load_descriptor(&path).unwrap();
        assert_eq!(
            d,
            BuildDescriptor::new("foo", "1.2.3").with_osdependency("libssl-dev")
        );
        assert!(d.toolchain.is_system());
    }

    #[test]
    fn loads_toml_with_toolchain_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "python.toml",
            r#"
name = "Python"
version = "2.7.9"
versionsuffix = "-bare"

[toolchain]
name = "GCC"
version = "4.9.2"
"#,
        );

        let d = load_descriptor(&path).unwrap();
        assert_eq!(d.toolchain, Toolchain::new("GCC", "4.9.2"));
        assert_eq!(d.versionsuffix, "-bare");
    }

    #[test]
    fn loads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "bar.JSON",
            r#"{"name": "bar", "version": "2.0", "toolchain": {"name": "foss", "version": "2016a"}}"#,
        );
        let d = load_descriptor(&path).unwrap();
        assert_eq!(d.label(), "bar-2.0");
        assert_eq!(d.toolchain, Toolchain::new("foss", "2016a"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_descriptor(Path::new("foo.eb")).unwrap_err();
        assert!(matches!(
            err,
            EbpackError::Application(ApplicationError::DescriptorLoad { .. })
        ));
        assert!(err.to_string().contains("unsupported extension"));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_descriptor(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(
            err,
            EbpackError::Application(ApplicationError::DescriptorLoad { .. })
        ));
    }

    #[test]
    fn missing_version_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "foo.toml", "name = \"foo\"\n");
        let err = load_descriptor(&path).unwrap_err();
        assert!(err.to_string().contains("version"), "{err}");
    }

    #[test]
    fn invalid_values_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "foo.toml", "name = \"\"\nversion = \"1\"\n");
        let err = load_descriptor(&path).unwrap_err();
        assert!(matches!(err, EbpackError::Domain(_)));
    }

    #[test]
    fn load_all_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.toml", "name = \"a\"\nversion = \"1\"\n");
        let b = write(dir.path(), "b.json", r#"{"name": "b", "version": "2"}"#);

        let all = load_all(&[a, b]).unwrap();
        let names: Vec<_> = all.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }
}
