//! Package identity value objects.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Release version of the packaging tool itself.
///
/// Injected at startup (configuration or CLI flag) and read-only afterwards.
/// It is pinned into generated images and forms the package version, so it
/// tracks which tool release produced an artifact rather than the version of
/// the wrapped software.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToolRelease(String);

impl ToolRelease {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidToolRelease {
                value,
                reason: "release version cannot be empty".into(),
            });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidToolRelease {
                value,
                reason: "release version cannot contain whitespace".into(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ToolRelease {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ToolRelease> for String {
    fn from(release: ToolRelease) -> Self {
        release.0
    }
}

/// Name and version under which a build is packaged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageIdentity {
    pub package_name: String,
    pub package_version: String,
}

impl PackageIdentity {
    /// Container image reference `{name}:{version}`.
    ///
    /// Both parts are lower-cased. In the repository part, characters outside
    /// `[a-z0-9._-]` become `-`, as do separator runs other than `.`, `_`,
    /// `__` or dashes, and leading or trailing separators are dropped.
    pub fn image_tag(&self) -> String {
        let tag: String = self
            .package_version
            .to_lowercase()
            .chars()
            .map(|c| match c {
                'a'..='z' | '0'..='9' | '_' | '.' | '-' => c,
                _ => '_',
            })
            .collect();
        format!("{}:{}", image_repository(&self.package_name), tag)
    }
}

fn image_repository(name: &str) -> String {
    let mapped: String = name
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' | '.' | '-' => c,
            _ => '-',
        })
        .collect();

    let mut out = String::with_capacity(mapped.len());
    let mut separator = String::new();
    for c in mapped.chars() {
        if c.is_ascii_alphanumeric() {
            if !out.is_empty() && !separator.is_empty() {
                let valid = matches!(separator.as_str(), "." | "_" | "__")
                    || separator.chars().all(|s| s == '-');
                out.push_str(if valid { &separator } else { "-" });
            }
            separator.clear();
            out.push(c);
        } else {
            separator.push(c);
        }
    }
    out
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.package_name, self.package_version)
    }
}
