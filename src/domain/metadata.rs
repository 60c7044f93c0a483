//! The package metadata registered with a packaging tool.

use serde::{Deserialize, Serialize};

use crate::domain::RequirementList;

/// Descriptive metadata for a distributable package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// The distribution name, for example `NetworkSecurity`.
    pub name: String,

    /// The package version, for example `0.0.1`.
    pub version: String,

    /// The package author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// The author's contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
}

impl PackageInfo {
    /// Creates package info with just a name and version.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            author: None,
            author_email: None,
        }
    }
}

/// Package metadata together with its install requirements.
///
/// This is the value handed to the packaging tool. It is constructed once per
/// invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    #[serde(flatten)]
    info: PackageInfo,
    install_requires: RequirementList,
}

impl PackageMetadata {
    /// Combines package info with the loaded requirement list.
    #[must_use]
    pub const fn new(info: PackageInfo, install_requires: RequirementList) -> Self {
        Self {
            info,
            install_requires,
        }
    }

    /// The package info.
    #[must_use]
    pub const fn info(&self) -> &PackageInfo {
        &self.info
    }

    /// The install requirements, in file order.
    #[must_use]
    pub const fn install_requires(&self) -> &RequirementList {
        &self.install_requires
    }

    /// Serializes the metadata as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EDITABLE_MARKER;

    #[test]
    fn serializes_flat_with_install_requires() {
        let info = PackageInfo {
            author: Some("Vivek Raj".to_string()),
            ..PackageInfo::new("NetworkSecurity", "0.0.1")
        };
        let requirements = RequirementList::parse("pandas\n-e.\nnumpy\n", EDITABLE_MARKER);
        let metadata = PackageMetadata::new(info, requirements);

        let value: serde_json::Value =
            serde_json::from_str(&metadata.to_json_pretty().unwrap()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "name": "NetworkSecurity",
                "version": "0.0.1",
                "author": "Vivek Raj",
                "install_requires": ["pandas", "numpy"],
            })
        );
    }

    #[test]
    fn zero_dependencies_is_valid() {
        let metadata =
            PackageMetadata::new(PackageInfo::new("demo", "1.0"), RequirementList::default());
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["install_requires"], serde_json::json!([]));
        assert!(metadata.install_requires().is_empty());
    }
}
