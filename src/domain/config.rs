use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{EDITABLE_MARKER, PackageInfo};

/// Configuration for loading requirements and describing the package.
///
/// Stored as `reqlist.toml` in the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Package metadata, if the project has been initialised with it.
    package: Option<PackageInfo>,

    /// The requirements file, relative to the project root unless absolute.
    requirements_file: PathBuf,

    /// The exact line excluded from the requirement list.
    ///
    /// Matched against trimmed lines by string equality only.
    editable_marker: String,

    /// Whether a missing or unreadable requirements file is an error.
    ///
    /// When `false` (default), the file is reported and treated as declaring
    /// zero dependencies.
    strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package: None,
            requirements_file: default_requirements_file(),
            editable_marker: default_editable_marker(),
            strict: false,
        }
    }
}

impl Config {
    /// The file name of the configuration within a project root.
    pub const FILE_NAME: &'static str = "reqlist.toml";

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        toml::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Loads the configuration from a project root, falling back to the
    /// defaults if it is missing or invalid.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        Self::load(&root.join(Self::FILE_NAME)).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config: {e}");
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content).map_err(ConfigError::Write)
    }

    /// Returns the package metadata, if configured.
    #[must_use]
    pub const fn package(&self) -> Option<&PackageInfo> {
        self.package.as_ref()
    }

    /// Sets the package metadata.
    pub fn set_package(&mut self, package: PackageInfo) {
        self.package = Some(package);
    }

    /// Returns the configured requirements file, as written.
    #[must_use]
    pub fn requirements_file(&self) -> &Path {
        &self.requirements_file
    }

    /// Sets the requirements file.
    pub fn set_requirements_file(&mut self, path: PathBuf) {
        self.requirements_file = path;
    }

    /// Resolves the requirements file against the project root.
    ///
    /// Absolute paths are returned unchanged.
    #[must_use]
    pub fn requirements_path(&self, root: &Path) -> PathBuf {
        root.join(&self.requirements_file)
    }

    /// Returns the editable-install marker.
    #[must_use]
    pub fn editable_marker(&self) -> &str {
        &self.editable_marker
    }

    /// Whether a missing requirements file is an error.
    #[must_use]
    pub const fn strict(&self) -> bool {
        self.strict
    }

    /// Sets the `strict` configuration option.
    pub const fn set_strict(&mut self, value: bool) {
        self.strict = value;
    }
}

/// Errors reading or writing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    /// The file is not valid configuration TOML.
    #[error("Failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),

    /// The file could not be written.
    #[error("Failed to write config file: {0}")]
    Write(#[source] std::io::Error),
}

fn default_requirements_file() -> PathBuf {
    PathBuf::from("requirements.txt")
}

fn default_editable_marker() -> String {
    EDITABLE_MARKER.to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_requirements_file")]
        requirements_file: PathBuf,

        #[serde(default = "default_editable_marker")]
        editable_marker: String,

        #[serde(default)]
        strict: bool,

        // tables come after plain keys in TOML
        #[serde(default, skip_serializing_if = "Option::is_none")]
        package: Option<PackageInfo>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                package,
                requirements_file,
                editable_marker,
                strict,
            } => Self {
                package,
                requirements_file,
                editable_marker,
                strict,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            package: config.package,
            requirements_file: config.requirements_file,
            editable_marker: config.editable_marker,
            strict: config.strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nrequirements_file = \"deps/prod.txt\"\neditable_marker = \"-e .\"\nstrict = true\n\n[package]\nname = \"NetworkSecurity\"\nversion = \"0.0.1\"\nauthor = \"Vivek Raj\"\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.requirements_file(), Path::new("deps/prod.txt"));
        assert_eq!(config.editable_marker(), "-e .");
        assert!(config.strict());
        let package = config.package().unwrap();
        assert_eq!(package.name, "NetworkSecurity");
        assert_eq!(package.version, "0.0.1");
        assert_eq!(package.author.as_deref(), Some("Vivek Raj"));
        assert_eq!(package.author_email, None);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(matches!(error, ConfigError::Read(_)));
        assert!(error.to_string().starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nstrict = \"yes\"\n").unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.to_string().starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.editable_marker(), "-e.");
        assert_eq!(actual.requirements_file(), Path::new("requirements.txt"));
    }

    #[test]
    fn load_or_default_without_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(Config::load_or_default(tmp.path()), Config::default());
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(Config::FILE_NAME);

        let mut config = Config::default();
        config.set_package(PackageInfo::new("NetworkSecurity", "0.0.1"));
        config.set_strict(true);
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn requirements_path_resolves_against_root() {
        let root = Path::new("/project");
        let mut config = Config::default();
        assert_eq!(
            config.requirements_path(root),
            Path::new("/project/requirements.txt")
        );

        config.set_requirements_file(PathBuf::from("/abs/reqs.txt"));
        assert_eq!(config.requirements_path(root), Path::new("/abs/reqs.txt"));
    }
}
